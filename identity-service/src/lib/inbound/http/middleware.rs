use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
}

/// Middleware that validates bearer tokens and adds the subject to request
/// extensions.
///
/// Every rejection produces the same 401 body; the sub-reason (absent,
/// malformed, bad signature, expired) is only distinguished in the logs.
pub async fn authenticate<UD: UserDirectory>(
    State(state): State<AppState<UD>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).map_err(|reason| {
        tracing::warn!(reason, "Rejected bearer token");
        unauthorized_response()
    })?;

    let claims = state.token_service.validate(token).map_err(|e| {
        tracing::warn!(reason = %e, "Rejected bearer token");
        unauthorized_response()
    })?;

    let user_id = UserId::from_string(&claims.subject_id).map_err(|e| {
        tracing::warn!(reason = %e, "Token subject is not a valid user id");
        unauthorized_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        name: claims.name,
    });

    Ok(next.run(req).await)
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Invalid or expired token"
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, &'static str> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header")?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header is not a bearer token")
}

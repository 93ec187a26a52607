use std::sync::Arc;
use std::time::Duration;

use auth_core::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::reset_test_users::reset_test_users;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserDirectory;
use crate::domain::user::service::IdentityService;

pub struct AppState<UD: UserDirectory> {
    pub identity_service: Arc<IdentityService<UD>>,
    pub token_service: Arc<TokenService>,
}

impl<UD: UserDirectory> Clone for AppState<UD> {
    fn clone(&self) -> Self {
        Self {
            identity_service: Arc::clone(&self.identity_service),
            token_service: Arc::clone(&self.token_service),
        }
    }
}

pub fn create_router<UD: UserDirectory>(
    identity_service: Arc<IdentityService<UD>>,
    token_service: Arc<TokenService>,
) -> Router {
    let state = AppState {
        identity_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register::<UD>))
        .route("/api/auth/login", post(login::<UD>))
        .route("/api/auth/reset-test-users", delete(reset_test_users::<UD>));

    let protected_routes = Router::new()
        .route("/api/users/me", get(current_user::<UD>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UD>,
        ));

    // No headers in the span: the Authorization header carries credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

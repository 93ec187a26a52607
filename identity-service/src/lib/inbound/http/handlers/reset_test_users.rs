use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::IdentityServicePort;
use crate::domain::user::ports::UserDirectory;
use crate::inbound::http::router::AppState;

/// Suffix matching the throwaway accounts created by test runs.
const TEST_EMAIL_SUFFIX: &str = "@example.com";

pub async fn reset_test_users<UD: UserDirectory>(
    State(state): State<AppState<UD>>,
) -> Result<ApiSuccess<ResetTestUsersResponseData>, ApiError> {
    let deleted = state
        .identity_service
        .purge_test_users(TEST_EMAIL_SUFFIX)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetTestUsersResponseData { deleted },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetTestUsersResponseData {
    pub deleted: u64,
}

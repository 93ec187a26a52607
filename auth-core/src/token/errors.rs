use thiserror::Error;

/// Error type for token issuance and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}

/// Rejected token service configuration.
///
/// Raised at construction, before any token is issued: a service running
/// with an empty secret would mint forgeable tokens, so startup must fail
/// instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("Signing secret must be present and non-empty")]
    MissingSecret,

    #[error("Token issuer must be present and non-empty")]
    MissingIssuer,

    #[error("Token audience must be present and non-empty")]
    MissingAudience,

    #[error("Token lifetime must be a positive number of minutes")]
    InvalidLifetime,
}

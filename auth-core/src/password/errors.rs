use thiserror::Error;

/// Error type for password hashing.
///
/// Verification does not error; see [`super::VerifyOutcome`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

//! Authentication core library
//!
//! Provides the security-sensitive pieces of the identity service:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-limited token issuance and validation (JWT, HS256)
//!
//! The surrounding service wires these against its own user directory and
//! request layer. Both components are pure computations over their inputs
//! plus startup configuration, so shared instances can serve concurrent
//! requests without coordination.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::{PasswordHasher, VerifyOutcome};
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert_eq!(hasher.verify("my_password", &hash), VerifyOutcome::Match);
//! assert_eq!(hasher.verify("not_it", &hash), VerifyOutcome::Mismatch);
//! ```
//!
//! ## Tokens
//! ```
//! use auth_core::{TokenConfig, TokenService, TokenSubject};
//!
//! let service = TokenService::new(TokenConfig {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     issuer: "identity-service".to_string(),
//!     audience: "identity-clients".to_string(),
//!     lifetime_minutes: 60,
//! })
//! .unwrap();
//!
//! let subject = TokenSubject {
//!     id: "user123".to_string(),
//!     name: "Ann".to_string(),
//!     email: "ann@example.com".to_string(),
//! };
//! let token = service.issue(&subject).unwrap();
//! let claims = service.validate(&token).unwrap();
//! assert_eq!(claims.subject_id, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::VerifyOutcome;
pub use token::Claims;
pub use token::TokenConfig;
pub use token::TokenConfigError;
pub use token::TokenError;
pub use token::TokenService;
pub use token::TokenSubject;

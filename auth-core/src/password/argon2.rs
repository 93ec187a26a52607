use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Outcome of verifying a plaintext against a stored hash.
///
/// Deliberately a closed sum rather than a `Result`: a wrong password is an
/// expected outcome, and the caller must handle the corrupt-hash case
/// separately from a plain mismatch. No variant carries detail about why
/// verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Plaintext matches the stored hash.
    Match,
    /// Plaintext does not match the stored hash.
    Mismatch,
    /// Stored hash is not a parseable PHC string. Indicates corruption in
    /// the directory, not a caller mistake.
    MalformedHash,
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id with a
/// random per-call salt). The cost parameters are the crate defaults
/// (m=19456 KiB, t=2, p=1), a fixed interactive-login profile; they are
/// never derived from caller input.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Each call generates a fresh random salt, so hashing the same
    /// plaintext twice yields different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptyPassword` - Plaintext is empty
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Recomputes the hash with the salt and parameters embedded in the
    /// stored PHC string; the digest comparison is constant-time inside the
    /// argon2 crate. Never errors and never reveals why a verification
    /// failed beyond the outcome variant.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    pub fn verify(&self, password: &str, hash: &str) -> VerifyOutcome {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return VerifyOutcome::MalformedHash,
        };

        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => VerifyOutcome::Match,
            Err(HashError::Password) => VerifyOutcome::Mismatch,
            // Anything else means the PHC string parsed but its contents
            // (salt, params, digest) are unusable.
            Err(_) => VerifyOutcome::MalformedHash,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert_eq!(hasher.verify(password, &hash), VerifyOutcome::Match);
        assert_eq!(
            hasher.verify("wrong_password", &hash),
            VerifyOutcome::Mismatch
        );
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let first = hasher.hash(password).expect("Failed to hash password");
        let second = hasher.hash(password).expect("Failed to hash password");

        // Random salt per call: same plaintext, different hash strings.
        assert_ne!(first, second);

        // Both still verify.
        assert_eq!(hasher.verify(password, &first), VerifyOutcome::Match);
        assert_eq!(hasher.verify(password, &second), VerifyOutcome::Match);
    }

    #[test]
    fn test_hash_empty_password() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.hash(""), Err(PasswordError::EmptyPassword));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = PasswordHasher::new();
        assert_eq!(
            hasher.verify("password", "not_a_phc_string"),
            VerifyOutcome::MalformedHash
        );
        assert_eq!(hasher.verify("password", ""), VerifyOutcome::MalformedHash);
    }

    #[test]
    fn test_verify_empty_password_against_real_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("something").expect("Failed to hash password");

        // An empty attempt is a mismatch, not an error.
        assert_eq!(hasher.verify("", &hash), VerifyOutcome::Mismatch);
    }
}

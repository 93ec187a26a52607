use std::sync::Arc;

use async_trait::async_trait;
use auth_core::PasswordHasher;
use auth_core::TokenService;
use auth_core::TokenSubject;
use auth_core::VerifyOutcome;
use chrono::Utc;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::IdentityError;
use crate::user::ports::IdentityServicePort;
use crate::user::ports::UserDirectory;

/// Domain service implementation for identity operations.
///
/// Constructed once at startup; holds no mutable state, so a shared
/// instance serves concurrent requests without coordination.
pub struct IdentityService<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    password_hasher: PasswordHasher,
    token_service: Arc<TokenService>,
    /// Verified against when a login email is unknown, so the miss path
    /// costs one hash computation like the wrong-password path.
    decoy_hash: String,
}

impl<UD> IdentityService<UD>
where
    UD: UserDirectory,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User directory implementation
    /// * `token_service` - Configured token service
    pub fn new(directory: Arc<UD>, token_service: Arc<TokenService>) -> Result<Self, IdentityError> {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash("decoy-password-for-unknown-logins")?;

        Ok(Self {
            directory,
            password_hasher,
            token_service,
            decoy_hash,
        })
    }
}

#[async_trait]
impl<UD> IdentityServicePort for IdentityService<UD>
where
    UD: UserDirectory,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, IdentityError> {
        if self
            .directory
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailAlreadyExists);
        }

        // Hash before anything touches the directory.
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.directory.insert(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, IdentityError> {
        let user = match self.directory.find_by_email(email).await? {
            Some(user) => user,
            None => {
                // Burn a verification anyway; see decoy_hash.
                let _ = self.password_hasher.verify(password, &self.decoy_hash);
                tracing::debug!("Login attempt for unknown email");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        match self.password_hasher.verify(password, &user.password_hash) {
            VerifyOutcome::Match => {}
            VerifyOutcome::Mismatch => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                return Err(IdentityError::InvalidCredentials);
            }
            VerifyOutcome::MalformedHash => {
                tracing::error!(user_id = %user.id, "Stored password hash is unreadable");
                return Err(IdentityError::CorruptPasswordHash);
            }
        }

        let subject = TokenSubject {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        };
        let access_token = self.token_service.issue(&subject)?;

        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(IssuedToken { access_token })
    }

    async fn current_user(&self, id: &UserId) -> Result<User, IdentityError> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound)
    }

    async fn purge_test_users(&self, email_suffix: &str) -> Result<u64, IdentityError> {
        let deleted = self.directory.delete_by_email_suffix(email_suffix).await?;
        tracing::info!(deleted, "Test users purged");
        Ok(deleted)
    }
}

use async_trait::async_trait;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::IdentityError;

/// Port for identity service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// Hashes the password before anything is persisted.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `InvalidPassword` - Password is empty
    /// * `DatabaseError` - Directory operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, IdentityError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, uniformly
    /// * `CorruptPasswordHash` - Stored hash is structurally invalid
    /// * `DatabaseError` - Directory operation failed
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, IdentityError>;

    /// Resolve the identity record behind a validated token subject.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this id
    /// * `DatabaseError` - Directory operation failed
    async fn current_user(&self, id: &UserId) -> Result<User, IdentityError>;

    /// Delete every identity whose email ends with the given suffix.
    ///
    /// # Returns
    /// Number of deleted identities
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn purge_test_users(&self, email_suffix: &str) -> Result<u64, IdentityError>;
}

/// User directory: persistence collaborator for identity records.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Persist a new identity record.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another record holds this email
    /// * `DatabaseError` - Directory operation failed
    async fn insert(&self, user: User) -> Result<User, IdentityError>;

    /// Retrieve an identity record by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityError>;

    /// Retrieve an identity record by its email login key (exact,
    /// case-sensitive match).
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError>;

    /// Remove an identity record.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this id
    /// * `DatabaseError` - Directory operation failed
    async fn delete(&self, id: &UserId) -> Result<(), IdentityError>;

    /// Remove every identity whose email ends with the given suffix.
    ///
    /// # Returns
    /// Number of deleted records
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn delete_by_email_suffix(&self, suffix: &str) -> Result<u64, IdentityError>;
}

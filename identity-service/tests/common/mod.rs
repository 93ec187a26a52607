use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth_core::TokenConfig;
use auth_core::TokenService;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserDirectory;
use identity_service::domain::user::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::IdentityError;

/// Test application that spawns a real server on a random port, backed by
/// an in-memory user directory so no external services are needed.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

/// In-memory user directory for tests.
pub struct InMemoryUserDirectory {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn insert(&self, user: User) -> Result<User, IdentityError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(IdentityError::EmailAlreadyExists);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), IdentityError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);
        if users.len() == before {
            return Err(IdentityError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_email_suffix(&self, suffix: &str) -> Result<u64, IdentityError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| !u.email.as_str().ends_with(suffix));
        Ok((before - users.len()) as u64)
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let token_service = Arc::new(
            TokenService::new(TokenConfig {
                secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
                issuer: "identity-service".to_string(),
                audience: "identity-clients".to_string(),
                lifetime_minutes: 60,
            })
            .expect("Failed to create token service"),
        );

        let directory = Arc::new(InMemoryUserDirectory::new());
        let identity_service = Arc::new(
            IdentityService::new(directory, Arc::clone(&token_service))
                .expect("Failed to create identity service"),
        );

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let application = create_router(identity_service, token_service);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server crashed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
    }
}

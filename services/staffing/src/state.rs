//! Shared handler state.

use std::fmt;
use std::sync::Arc;

use secrecy::ExposeSecret;
use token_codec::{KeyProvider, TokenCodec};
use tracing::info;

use crate::config::{BootstrapUser, Config};
use crate::models::{Assignment, Employee, Project, User, UserDraft};
use crate::storage::{CredentialStore, InMemoryRepository, Repository, StorageError};

/// Token issuing and verification settings.
#[derive(Clone)]
pub struct TokenSettings {
    /// Signature scheme and encoding
    pub codec: TokenCodec,
    /// `typ` header of issued tokens
    pub token_type: String,
    /// Signing and verification keys
    pub keys: Arc<dyn KeyProvider>,
}

impl TokenSettings {
    /// Settings from configuration.
    #[must_use]
    pub fn from_config(config: &Config, keys: Arc<dyn KeyProvider>) -> Self {
        Self {
            codec: TokenCodec::new(config.algorithm)
                .with_signature_encoding(config.signature_encoding),
            token_type: config.token_type.clone(),
            keys,
        }
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("codec", &self.codec)
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Token settings
    pub tokens: TokenSettings,
    /// Login lookups
    pub credentials: Arc<dyn CredentialStore>,
    /// Users
    pub users: Arc<dyn Repository<User>>,
    /// Projects
    pub projects: Arc<dyn Repository<Project>>,
    /// Employees
    pub employees: Arc<dyn Repository<Employee>>,
    /// Assignments
    pub assignments: Arc<dyn Repository<Assignment>>,
}

impl AppState {
    /// State backed by in-memory repositories. Users and credentials share
    /// one store.
    #[must_use]
    pub fn in_memory(tokens: TokenSettings) -> Self {
        let users = Arc::new(InMemoryRepository::<User>::new());
        Self {
            tokens,
            credentials: users.clone(),
            users,
            projects: Arc::new(InMemoryRepository::new()),
            employees: Arc::new(InMemoryRepository::new()),
            assignments: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Replace the credential store.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Create the bootstrap account unless the username is taken.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub async fn seed_user(&self, user: &BootstrapUser) -> Result<(), StorageError> {
        if self.credentials.find_by_username(&user.username).await?.is_some() {
            return Ok(());
        }

        let created = self
            .users
            .create(UserDraft {
                username: user.username.clone(),
                email: user.email.clone(),
                password: user.password.expose_secret().to_string(),
                role: "admin".to_string(),
            })
            .await?;
        info!(user_id = created.user_id, username = %created.username, "Bootstrap user created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserFilter;
    use secrecy::SecretString;
    use test_utils::fixtures::primary_key_pair;
    use token_codec::StaticKeyProvider;

    fn state() -> AppState {
        let keys = primary_key_pair();
        let provider = StaticKeyProvider::new(keys.private_pem_str(), keys.public_pem_str());
        AppState::in_memory(TokenSettings::from_config(&Config::default(), Arc::new(provider)))
    }

    #[tokio::test]
    async fn test_seed_user_is_idempotent() {
        let state = state();
        let admin = BootstrapUser {
            username: "admin".to_string(),
            password: SecretString::from("pw"),
            email: "admin@example.com".to_string(),
        };

        state.seed_user(&admin).await.unwrap();
        state.seed_user(&admin).await.unwrap();

        let users = state.users.find_all(&UserFilter::default()).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, "admin");
        assert!(state.credentials.find_by_username("admin").await.unwrap().is_some());
    }
}

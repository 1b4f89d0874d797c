use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// Domain service implementation for registration and login.
///
/// Stateless between calls; the three storage capabilities are injected
/// separately and are usually backed by one store instance.
pub struct AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    password_hasher: auth::PasswordHasher,
    token_issuer: auth::TokenIssuer,
}

impl<US, UP, AP> AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - Persists new users
    /// * `user_provider` - Looks users up by email
    /// * `app_provider` - Looks applications up by id
    /// * `password_hasher` - Argon2 hasher with the deployment's cost
    /// * `token_issuer` - Token issuer with the deployment's TTL
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        password_hasher: auth::PasswordHasher,
        token_issuer: auth::TokenIssuer,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            password_hasher,
            token_issuer,
        }
    }

    async fn hash_password(&self, password: String) -> Result<PasswordHash, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map(PasswordHash::new)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: PasswordHash,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, password_hash.as_str()))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<US, UP, AP> AuthServicePort for AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        let RegisterCommand { email, password } = command;

        tracing::info!(email = %email, "Registering user");

        let password_hash = self.hash_password(password).await.map_err(|e| {
            tracing::error!(email = %email, error = %e, "Failed to hash password");
            e
        })?;

        let user_id = self
            .user_saver
            .save_user(&email, &password_hash)
            .await
            .map_err(|e| match e {
                StorageError::UserExists(_) => {
                    tracing::warn!(email = %email, "User already exists");
                    AuthError::UserExists
                }
                other => {
                    tracing::error!(email = %email, error = %other, "Failed to save user");
                    AuthError::Internal(other.to_string())
                }
            })?;

        tracing::info!(email = %email, user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, AuthError> {
        let LoginCommand {
            email,
            password,
            app_id,
        } = command;

        tracing::info!(email = %email, app_id = %app_id, "Attempting to login user");

        let user = match self.user_provider.user(&email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound(_)) => {
                // Unknown emails pay the same Argon2 cost as a password check
                let _ = self.hash_password(password).await;
                tracing::warn!(email = %email, "Invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(email = %email, error = %e, "Failed to get user");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        let is_valid = self
            .verify_password(password, user.password_hash.clone())
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to verify password");
                e
            })?;

        if !is_valid {
            tracing::warn!(email = %email, "Invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        // An unknown app is an operator error and is reported as internal,
        // unlike an unknown email.
        let app = self.app_provider.app(app_id).await.map_err(|e| {
            tracing::error!(app_id = %app_id, error = %e, "Failed to get app");
            AuthError::Internal(e.to_string())
        })?;

        let token = self
            .token_issuer
            .issue(
                user.id.0,
                user.email.as_str(),
                app.id.0,
                app.secret.as_bytes(),
            )
            .map_err(|e| {
                tracing::error!(app_id = %app_id, error = %e, "Failed to generate token");
                AuthError::Internal(e.to_string())
            })?;

        tracing::info!(user_id = %user.id, app_id = %app_id, "User logged in successfully");

        Ok(token)
    }
}

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for auth domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Normalized email and plaintext password
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Authenticate a user and issue a token for one application.
    ///
    /// # Arguments
    /// * `command` - Normalized email, plaintext password and app id
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Unknown app, storage, hashing or signing failure
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError>;
}

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Insert a user record.
    ///
    /// # Errors
    /// * `UserExists` - The store's uniqueness constraint on email rejected the insert
    /// * `Database` - Any other storage failure
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StorageError>;
}

/// Reads users by email.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage failure
    async fn user(&self, email: &EmailAddress) -> Result<User, StorageError>;
}

/// Reads applications by id.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// # Errors
    /// * `AppNotFound` - No application with this id
    /// * `Database` - Storage failure
    async fn app(&self, app_id: AppId) -> Result<App, StorageError>;
}

use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `InvalidInput` - Password cannot be hashed (too long)
    /// * `DuplicateUser` - Email is already registered
    /// * `Storage` - Store operation failed
    /// * `Hashing` - Password hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Check credentials and open a session.
    ///
    /// # Returns
    /// Signed session token with its expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `Storage` - Store operation failed
    /// * `Token` - Token signing failed
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError>;

    /// Resolve a session token to the user it was issued for.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is invalid or expired, or the user is gone
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Report back an identity already resolved by [`AuthServicePort::authenticate`].
    fn validate(&self, identity: AuthenticatedUser) -> AuthenticatedUser;

    /// List every registered user, newest first.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;
}

/// Persistence operations for user credentials.
///
/// Implementations own their concurrency control and must reject a second
/// user with an already registered email.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve all users from storage, newest first.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list_all(&self) -> Result<Vec<User>, AuthError>;
}

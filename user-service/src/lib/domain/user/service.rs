use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialStore;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Password hashing and verification run on the blocking thread pool.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and session token handling
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| AuthError::Task(e.to_string()))??;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.store.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = credentials.password;

        let Some(user) = self.store.find_by_email(credentials.email.trim()).await? else {
            tracing::debug!("Login rejected: unknown email");
            let err = tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password))
                .await
                .map_err(|e| AuthError::Task(e.to_string()))?;
            return Err(err.into());
        };

        let stored_hash = user.password_hash.clone();
        let subject = user.id;
        let issued = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, subject)
        })
        .await
        .map_err(|e| AuthError::Task(e.to_string()))?
        .map_err(|e| {
            let err = AuthError::from(e);
            if matches!(err, AuthError::InvalidCredentials) {
                tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            }
            err
        })?;

        tracing::info!(user_id = %user.id, expires_at = %issued.expires_at, "Session issued");

        Ok(Session {
            token: issued.token,
            expires_at: issued.expires_at,
            max_age: self.authenticator.session_ttl(),
        })
    }

    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let subject = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AuthError::Unauthenticated
        })?;

        let user_id = UserId::from_string(&subject).map_err(|e| {
            tracing::warn!(error = %e, "Session token carries an unusable subject");
            AuthError::Unauthenticated
        })?;

        match self.store.find_by_id(&user_id).await {
            Ok(Some(user)) => Ok(user.into()),
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "Session subject no longer exists");
                Err(AuthError::Unauthenticated)
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to resolve session subject");
                Err(AuthError::Unauthenticated)
            }
        }
    }

    fn validate(&self, identity: AuthenticatedUser) -> AuthenticatedUser {
        identity
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.store.list_all().await
    }
}

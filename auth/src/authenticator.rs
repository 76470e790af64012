use chrono::Duration;

use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session
/// token handling.
///
/// Built once at startup from immutable settings and shared read-only
/// between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    session_ttl: Duration,
    /// Digest at the configured cost, verified against when no account matches.
    placeholder_hash: String,
}

const PLACEHOLDER_PASSWORD: &str = "placeholder-password-never-issued";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key shared by token issuing and validation
    /// * `password_cost` - bcrypt work factor
    /// * `session_ttl` - Lifetime of issued session tokens
    ///
    /// # Errors
    /// * `JwtError::MissingSecret` - Secret is empty
    /// * `PasswordError::InvalidCost` - Work factor out of range
    pub fn new(
        jwt_secret: &[u8],
        password_cost: u32,
        session_ttl: Duration,
    ) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::new(password_cost)?;
        let placeholder_hash = password_hasher.hash(PLACEHOLDER_PASSWORD)?;

        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::new(jwt_secret)?,
            token_validator: TokenValidator::new(jwt_secret)?,
            session_ttl,
            placeholder_hash,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs one verification at the configured cost so the rejection takes
    /// as long as a wrong password would.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        if let Err(e) = self.verify_password(password, &self.placeholder_hash) {
            return e.into();
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token without password verification.
    pub fn issue_token(&self, subject: impl ToString) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(subject, self.session_ttl)
    }

    /// Validate a session token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.token_validator.validate(token)
    }
}

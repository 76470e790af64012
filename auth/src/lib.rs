//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the user service:
//! - Password hashing (bcrypt, configurable work factor)
//! - Session token issuing and validation (HS256 JWT, typed claims)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenIssuer, TokenValidator};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret).unwrap();
//! let validator = TokenValidator::new(secret).unwrap();
//!
//! let issued = issuer.issue("user123", Duration::hours(24)).unwrap();
//! assert_eq!(validator.validate(&issued.token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 4, Duration::hours(24)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a session token
//! let session = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Gate: validate the token back to its subject
//! assert_eq!(auth.validate_token(&session.token).unwrap(), "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::SessionClaims;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;

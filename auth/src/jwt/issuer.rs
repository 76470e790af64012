use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::SessionClaims;
use super::errors::JwtError;
use super::SIGNING_ALGORITHM;

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs session tokens with a shared HMAC secret.
///
/// The algorithm is fixed to HS256 and written into every token header.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    /// Create an issuer for the given signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - The validator must be constructed with the same secret
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
        })
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: impl ToString, ttl: Duration) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue_at(
        &self,
        subject: impl ToString,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = SessionClaims::new(subject, issued_at, ttl);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("Expiry is out of range".to_string()))?;

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

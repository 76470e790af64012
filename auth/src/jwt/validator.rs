use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::SessionClaims;
use super::errors::JwtError;
use super::SIGNING_ALGORITHM;

/// Verifies session tokens signed by a [`TokenIssuer`](super::TokenIssuer)
/// holding the same secret.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl TokenValidator {
    /// Create a validator for the given signing secret.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against our own clock, see `validate_at`.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Validate a token against the current time.
    ///
    /// # Returns
    /// Subject the token was issued for
    pub fn validate(&self, token: &str) -> Result<String, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// Checks run in order, the first failure wins:
    /// 1. structure (`Malformed`)
    /// 2. header algorithm equals HS256 (`UnexpectedAlgorithm`)
    /// 3. signature (`BadSignature`), then the claim shape (`Malformed`)
    /// 4. `now >= exp` (`Expired`)
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let algorithm = read_algorithm(token)?;
        if algorithm != "HS256" {
            return Err(JwtError::UnexpectedAlgorithm(algorithm));
        }

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::UnexpectedAlgorithm(algorithm.clone())
                }
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.sub.is_empty() {
            return Err(JwtError::Malformed("Empty subject".to_string()));
        }

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims.sub)
    }
}

/// Parse just enough of the token to read the declared algorithm.
fn read_algorithm(token: &str) -> Result<String, JwtError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::Malformed(
            "Expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::Malformed(format!("Header is not base64url: {}", e)))?;
    let header: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::Malformed(format!("Header is not valid JSON: {}", e)))?;

    Ok(header.alg)
}

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// Fixed shape: a token that does not deserialize into this structure is
/// rejected as malformed before any field is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    #[serde(default)]
    pub iat: i64,
}

impl SessionClaims {
    /// Create claims for `subject` valid for `ttl` starting at `issued_at`.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.to_string(),
            exp: iat + ttl.num_seconds(),
            iat,
        }
    }

    /// A token is expired from the exact second of its `exp` claim onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by both access and refresh tokens.
///
/// Deliberately minimal: the user identifier plus the timestamps needed for
/// expiry checks. Tokens carry nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` from now.
    pub fn for_subject(sub: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Check if the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

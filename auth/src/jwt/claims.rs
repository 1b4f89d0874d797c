use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ttl::TokenTtl;

/// Access token payload.
///
/// The serialized form is a wire contract shared with token consumers:
/// exactly the keys `uid`, `email`, `app_id` and `exp`, with `exp` as a Unix
/// timestamp in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub uid: i64,

    /// User email as stored
    pub email: String,

    /// Application the token is scoped to
    pub app_id: i32,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims with an explicit expiration timestamp.
    pub fn new(uid: i64, email: impl Into<String>, app_id: i32, exp: i64) -> Self {
        Self {
            uid,
            email: email.into(),
            app_id,
            exp,
        }
    }

    /// Create claims expiring `ttl` after `issued_at`.
    pub fn issued_at(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: TokenTtl,
    ) -> Self {
        let expiration = issued_at + ttl.as_duration();
        Self::new(uid, email, app_id, expiration.timestamp())
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_issued_at_adds_ttl() {
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = Claims::issued_at(1, "alice@example.com", 1, issued_at, TokenTtl::default());

        assert_eq!(claims.uid, 1);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 1);
        assert_eq!(claims.exp, 1_700_000_000 + 3600);
    }

    #[test]
    fn test_wire_keys() {
        let claims = Claims::new(7, "bob@example.com", 3, 1234567890);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "uid": 7,
                "email": "bob@example.com",
                "app_id": 3,
                "exp": 1234567890
            })
        );
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new(1, "a@b.c", 1, 1000);

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenTtl;

/// Builds and signs access tokens.
///
/// Holds only the deployment TTL; the signing secret is supplied per call
/// because every application signs with its own secret.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    ttl: TokenTtl,
}

impl TokenIssuer {
    pub fn new(ttl: TokenTtl) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> TokenTtl {
        self.ttl
    }

    /// Issue a token expiring one TTL from now.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Application the token is scoped to
    /// * `secret` - That application's signing secret
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        uid: i64,
        email: &str,
        app_id: i32,
        secret: &[u8],
    ) -> Result<String, JwtError> {
        self.issue_at(uid, email, app_id, secret, Utc::now())
    }

    /// Issue a token expiring one TTL after `issued_at`.
    pub fn issue_at(
        &self,
        uid: i64,
        email: &str,
        app_id: i32,
        secret: &[u8],
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::issued_at(uid, email, app_id, issued_at, self.ttl);
        JwtHandler::new(secret).encode(&claims)
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new(TokenTtl::default())
    }
}

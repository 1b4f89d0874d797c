use chrono::Duration;

use super::errors::JwtError;

/// Token lifetime, fixed per deployment.
///
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl(Duration);

impl TokenTtl {
    pub const DEFAULT_SECONDS: i64 = 3600;

    /// Create a TTL from a number of seconds.
    ///
    /// # Errors
    /// * `InvalidTtl` - `seconds` is zero or negative
    pub fn new(seconds: i64) -> Result<Self, JwtError> {
        if seconds <= 0 {
            return Err(JwtError::InvalidTtl(seconds));
        }
        Ok(Self(Duration::seconds(seconds)))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self(Duration::seconds(Self::DEFAULT_SECONDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(TokenTtl::default().as_seconds(), 3600);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(TokenTtl::new(0), Err(JwtError::InvalidTtl(0))));
        assert!(matches!(TokenTtl::new(-5), Err(JwtError::InvalidTtl(-5))));
    }

    #[test]
    fn test_accepts_positive() {
        let ttl = TokenTtl::new(90).unwrap();
        assert_eq!(ttl.as_duration(), Duration::seconds(90));
    }
}

//! Authentication configuration
//!
//! Loaded once at startup and shared process-wide. The signing secret is
//! deliberately not `Debug`-printed or serialized; it is never logged and
//! never rotated at runtime.

use crate::errors::{ClinicError, Result};
use chrono::Duration;

/// Default credential lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Process-wide authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    token_ttl: Duration,
}

impl AuthConfig {
    /// Create a configuration with the default 60-minute token lifetime
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        Self::with_ttl(secret, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    /// Create a configuration with an explicit token lifetime
    pub fn with_ttl(secret: impl Into<Vec<u8>>, token_ttl: Duration) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ClinicError::internal("signing secret must not be empty"));
        }
        if token_ttl <= Duration::zero() {
            return Err(ClinicError::internal("token lifetime must be positive"));
        }
        Ok(Self { secret, token_ttl })
    }

    /// The signing secret bytes
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// The credential lifetime
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_sixty_minutes() {
        let config = AuthConfig::new(b"test-secret".to_vec()).unwrap();
        assert_eq!(config.token_ttl(), Duration::minutes(60));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(AuthConfig::new(Vec::new()).is_err());
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        assert!(AuthConfig::with_ttl(b"s".to_vec(), Duration::zero()).is_err());
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let config = AuthConfig::new(b"top-secret".to_vec()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("<redacted>"));
    }
}

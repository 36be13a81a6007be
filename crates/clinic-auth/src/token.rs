//! Bearer credential tokens
//!
//! A token is `base64url(claims_json) "." base64url(hmac_sha256(claims))`,
//! where the claims are `{sub, exp}`: the subject's user id and an absolute
//! expiry. Tokens are minted at login, never stored server-side, and there is
//! no refresh or revocation; after expiry the client re-authenticates with
//! credentials.
//!
//! Validation and issuance are clock-parameterized internally so expiry
//! behavior is testable without sleeping.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use clinic_core::{AuthConfig, Result, UserId};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Why a token failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Cannot parse the token or verify its signature
    #[error("token is malformed or has an invalid signature")]
    Malformed,
    /// Signature verifies but the embedded expiry has passed
    #[error("token has expired")]
    Expired,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: UserId,
    exp: i64,
}

/// Issues and validates bearer credentials
///
/// Stateless; a pure function of the signing secret loaded once at startup.
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    /// Create a service bound to the process-wide configuration
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a credential for `subject`, expiring after the configured TTL
    pub fn issue(&self, subject: UserId) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Validate a credential, returning the embedded subject
    pub fn validate(&self, token: &str) -> std::result::Result<UserId, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Issue a credential as of `now`
    pub fn issue_at(&self, subject: UserId, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: subject,
            exp: (now + self.config.token_ttl()).timestamp(),
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| clinic_core::ClinicError::internal(format!("claims encoding: {e}")))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let mac_b64 = URL_SAFE_NO_PAD.encode(self.sign(payload_b64.as_bytes()));
        Ok(format!("{payload_b64}.{mac_b64}"))
    }

    /// Validate a credential as of `now`
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<UserId, TokenError> {
        let (payload_b64, mac_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let mac = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut verifier = self.keyed_mac();
        verifier.update(payload_b64.as_bytes());
        verifier.verify_slice(&mac).map_err(|_| TokenError::Malformed)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims.sub)
    }

    fn keyed_mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length; new_from_slice cannot fail.
        HmacSha256::new_from_slice(self.config.secret())
            .expect("HMAC key of any length is accepted")
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.keyed_mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn service() -> TokenService {
        TokenService::new(AuthConfig::new(b"unit-test-secret".to_vec()).unwrap())
    }

    #[test]
    fn issued_token_round_trips() {
        let service = service();
        let subject = UserId::new();
        let token = service.issue(subject).unwrap();
        assert_eq!(service.validate(&token).unwrap(), subject);
    }

    #[test]
    fn token_is_valid_one_second_before_expiry_and_not_after() {
        let service = service();
        let subject = UserId::new();
        let issued = Utc::now();
        let token = service.issue_at(subject, issued).unwrap();

        let ttl = Duration::minutes(60);
        assert_eq!(
            service.validate_at(&token, issued + ttl - Duration::seconds(1)),
            Ok(subject)
        );
        assert_eq!(
            service.validate_at(&token, issued + ttl + Duration::seconds(1)),
            Err(TokenError::Expired)
        );
        // The boundary itself is expired: valid only while now < exp.
        assert_eq!(
            service.validate_at(&token, issued + ttl),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn foreign_signature_is_malformed() {
        let ours = service();
        let theirs = TokenService::new(AuthConfig::new(b"other-secret".to_vec()).unwrap());
        let token = theirs.issue(UserId::new()).unwrap();
        assert_eq!(ours.validate(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn tampered_payload_is_malformed() {
        let service = service();
        let token = service.issue(UserId::new()).unwrap();
        let (payload, mac) = token.split_once('.').unwrap();
        let mut flipped = payload.to_string();
        flipped.replace_range(0..1, if payload.starts_with('A') { "B" } else { "A" });
        assert_eq!(
            service.validate(&format!("{flipped}.{mac}")),
            Err(TokenError::Malformed)
        );
    }

    proptest! {
        #[test]
        fn arbitrary_strings_never_validate_or_panic(garbage in ".{0,128}") {
            let service = service();
            prop_assert!(service.validate(&garbage).is_err());
        }
    }
}

//! Identity resolution
//!
//! The single mandatory gate for every protected operation. Runs as a
//! middleware stage before any handler: parse the bearer header, validate the
//! token, load the subject, and hand the handler an [`AuthContext`]. The two
//! anonymous operations (create account, login) never pass through here.

use crate::token::{TokenError, TokenService};
use clinic_core::{AuthContext, ClinicError, Result};
use clinic_store::UserStore;
use std::sync::Arc;
use tracing::debug;

/// Resolves a request's bearer credential to an acting identity
pub struct IdentityResolver {
    tokens: TokenService,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    /// Create a resolver over the token service and user store
    pub fn new(tokens: TokenService, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Resolve the `Authorization` header value to an [`AuthContext`]
    ///
    /// - absent or non-Bearer header, malformed or expired token:
    ///   `Unauthenticated`
    /// - subject no longer in the user store: `NotFound`
    pub async fn resolve(&self, authorization: Option<&str>) -> Result<AuthContext> {
        let header = authorization
            .ok_or_else(|| ClinicError::unauthenticated("missing Authorization header"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ClinicError::unauthenticated("expected a Bearer credential"))?;

        let subject = self.tokens.validate(token).map_err(|e| {
            debug!(reason = %e, "token validation failed");
            match e {
                TokenError::Malformed => ClinicError::unauthenticated("invalid token"),
                TokenError::Expired => ClinicError::unauthenticated("token has expired"),
            }
        })?;

        let user = self
            .users
            .find_by_id(subject)
            .await?
            .ok_or_else(|| ClinicError::not_found("user not found"))?;

        Ok(AuthContext::new(user.id, user.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::domain::{Contact, Gender, PersonalDetails, User};
    use clinic_core::{AuthConfig, Role, UserId};
    use clinic_store::MemoryStores;

    fn fixtures() -> (IdentityResolver, TokenService, Arc<MemoryStores>) {
        let stores = Arc::new(MemoryStores::new());
        let tokens = TokenService::new(AuthConfig::new(b"resolver-test".to_vec()).unwrap());
        let resolver = IdentityResolver::new(tokens.clone(), stores.clone());
        (resolver, tokens, stores)
    }

    async fn seed_user(stores: &MemoryStores, role: Role) -> UserId {
        let user = User {
            id: UserId::new(),
            username: format!("user-{}", UserId::new()),
            role,
            personal_details: PersonalDetails {
                first_name: "Res".into(),
                last_name: "Olver".into(),
                age: 50,
                gender: Gender::Other,
            },
            contact: Contact {
                email: "r@example.com".into(),
                phone: vec![],
            },
            password_hash: "hash".into(),
            specialization: None,
            license_number: None,
        };
        UserStore::insert(stores, user).await.unwrap()
    }

    #[tokio::test]
    async fn resolves_a_valid_bearer_token() {
        let (resolver, tokens, stores) = fixtures();
        let user_id = seed_user(&stores, Role::Doctor).await;
        let token = tokens.issue(user_id).unwrap();

        let ctx = resolver
            .resolve(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.role, Role::Doctor);
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let (resolver, _, _) = fixtures();
        let err = resolver.resolve(None).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthenticated() {
        let (resolver, _, _) = fixtures();
        let err = resolver
            .resolve(Some("Basic dXNlcjpwYXNz"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated() {
        let (resolver, _, _) = fixtures();
        let err = resolver
            .resolve(Some("Bearer not-a-token"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn unknown_subject_is_not_found() {
        let (resolver, tokens, _) = fixtures();
        let token = tokens.issue(UserId::new()).unwrap();
        let err = resolver
            .resolve(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}

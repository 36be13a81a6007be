//! Account handling
//!
//! Register and login are the two anonymous operations; everything else in
//! the backend sits behind the identity resolver. The login response carries
//! the freshly minted credential plus the public profile, never the hash.

use clinic_auth::{PasswordHasher, TokenService};
use clinic_core::domain::{Contact, PersonalDetails, User, UserProfile};
use clinic_core::{AuthContext, ClinicError, Result, Role, UserId};
use clinic_store::UserStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const MIN_PASSWORD_LEN: usize = 8;

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Unique login name
    pub username: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Requested role
    pub role: Role,
    /// Name, age, gender
    pub personal_details: PersonalDetails,
    /// Email and phone numbers
    pub contact: Contact,
    /// Medical specialization (doctors)
    pub specialization: Option<String>,
    /// License number (doctors)
    pub license_number: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// Login response: the bearer credential plus the public profile
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer credential for subsequent requests
    pub access_token: String,
    /// The authenticated user, hash excluded
    pub user: UserProfile,
}

/// Account operations
pub struct UserHandler {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
}

impl UserHandler {
    /// Create a handler over the injected collaborators
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new account (anonymous)
    pub async fn register(&self, request: RegisterRequest) -> Result<UserId> {
        if request.username.is_empty() {
            return Err(ClinicError::invalid_input("username is required"));
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(ClinicError::invalid_input(
                "password must be at least 8 characters",
            ));
        }
        if request.contact.email.is_empty() {
            return Err(ClinicError::invalid_input("email is required"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User {
            id: UserId::new(),
            username: request.username,
            role: request.role,
            personal_details: request.personal_details,
            contact: request.contact,
            password_hash,
            specialization: request.specialization,
            license_number: request.license_number,
        };
        // Duplicate usernames surface as Conflict from the store.
        let user_id = self.users.insert(user).await?;
        info!(%user_id, "user registered");
        Ok(user_id)
    }

    /// Authenticate and mint a credential (anonymous)
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| ClinicError::not_found("user not found"))?;

        if !self.hasher.verify(&request.password, &user.password_hash)? {
            return Err(ClinicError::unauthenticated("incorrect password"));
        }

        let access_token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user authenticated");
        Ok(LoginResponse {
            access_token,
            user: user.profile(),
        })
    }

    /// The acting user's own profile
    pub async fn profile(&self, ctx: &AuthContext) -> Result<UserProfile> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| ClinicError::not_found("user not found"))?;
        Ok(user.profile())
    }

    /// Directory listing, optionally restricted to one role
    ///
    /// Available to any authenticated user; only public profiles leave here.
    pub async fn directory(&self, _ctx: &AuthContext, role: Option<Role>) -> Result<Vec<UserProfile>> {
        let users = self.users.find_by_role(role).await?;
        Ok(users.iter().map(User::profile).collect())
    }
}

//! Per-request identity context
//!
//! Produced by the identity resolver, consumed by policy checks and handlers.
//! The role captured here is the authorization role for the whole request.

use crate::types::{Role, UserId};
use serde::{Deserialize, Serialize};

/// The resolved identity acting on a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// The acting user
    pub user_id: UserId,
    /// The acting user's role
    pub role: Role,
}

impl AuthContext {
    /// Build a context from a resolved identity
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

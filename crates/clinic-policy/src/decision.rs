//! Policy decisions
//!
//! Decisions are data. Handlers convert a denial into the externally visible
//! `Forbidden` error with [`Decision::require`]; the reason stays structured
//! so clients get a stable message without a shared exception type.

use clinic_core::{ClinicError, Result};
use serde::{Deserialize, Serialize};

/// Why a policy denied an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// The acting role may never perform this operation
    WrongRole,
    /// The actor is not the owner of the target resource
    NotOwner,
    /// The actor is neither participant of the target resource
    NotParticipant,
}

impl DenyReason {
    /// Stable client-facing message
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::WrongRole => "role is not permitted to perform this operation",
            DenyReason::NotOwner => "resource is not owned by the acting user",
            DenyReason::NotParticipant => "acting user is not a participant of this resource",
        }
    }
}

/// The outcome of evaluating a policy rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The operation may proceed
    Allow,
    /// The operation is denied
    Deny(DenyReason),
}

impl Decision {
    /// True if the decision is `Allow`
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert a denial into the `Forbidden` error a handler returns
    pub fn require(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(ClinicError::forbidden(reason.message())),
        }
    }

    /// Allow iff the predicate holds, denying with the given reason
    pub fn allow_if(condition: bool, reason: DenyReason) -> Self {
        if condition {
            Decision::Allow
        } else {
            Decision::Deny(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_maps_denial_to_forbidden() {
        let err = Decision::Deny(DenyReason::NotOwner).require().unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(Decision::Allow.require().is_ok());
    }

    #[test]
    fn allow_if_carries_the_reason() {
        assert_eq!(
            Decision::allow_if(false, DenyReason::WrongRole),
            Decision::Deny(DenyReason::WrongRole)
        );
        assert!(Decision::allow_if(true, DenyReason::WrongRole).is_allowed());
    }
}

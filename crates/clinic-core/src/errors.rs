//! Unified error system for the clinic backend
//!
//! One error type covers the whole taxonomy visible to clients. Handlers
//! construct variants through the helper methods; the HTTP glue maps them to
//! status codes via [`ClinicError::status_code`]. Messages are short and
//! machine-stable; internal detail (storage errors, token parse failures)
//! never crosses the boundary verbatim.

use serde::{Deserialize, Serialize};

/// Unified error type for all clinic backend operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ClinicError {
    /// Missing, malformed, or expired credential
    #[error("Unauthenticated: {message}")]
    Unauthenticated {
        /// Short, machine-stable description
        message: String,
    },

    /// Role or ownership policy denial
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Short, machine-stable description
        message: String,
    },

    /// Referenced entity absent
    #[error("Not found: {message}")]
    NotFound {
        /// Short, machine-stable description
        message: String,
    },

    /// Missing required field, malformed date or identifier
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Short, machine-stable description
        message: String,
    },

    /// Duplicate username or replayed state transition
    #[error("Conflict: {message}")]
    Conflict {
        /// Short, machine-stable description
        message: String,
    },

    /// Storage or unexpected failure
    #[error("Internal error: {message}")]
    Internal {
        /// Short, machine-stable description
        message: String,
    },
}

impl ClinicError {
    /// Create an unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The HTTP status code this error maps to at the routing boundary
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::InvalidInput { .. } => 400,
            Self::Conflict { .. } => 409,
            Self::Internal { .. } => 500,
        }
    }
}

/// Standard Result type for clinic backend operations
pub type Result<T> = std::result::Result<T, ClinicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_cover_the_taxonomy() {
        assert_eq!(ClinicError::unauthenticated("x").status_code(), 401);
        assert_eq!(ClinicError::forbidden("x").status_code(), 403);
        assert_eq!(ClinicError::not_found("x").status_code(), 404);
        assert_eq!(ClinicError::invalid_input("x").status_code(), 400);
        assert_eq!(ClinicError::conflict("x").status_code(), 409);
        assert_eq!(ClinicError::internal("x").status_code(), 500);
    }

    #[test]
    fn display_is_prefixed_and_stable() {
        let err = ClinicError::forbidden("only patients can book appointments");
        assert_eq!(
            err.to_string(),
            "Forbidden: only patients can book appointments"
        );
    }
}

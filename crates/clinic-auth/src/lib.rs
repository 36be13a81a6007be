//! Authentication layer for the clinic backend
//!
//! Two pieces:
//! - [`token::TokenService`] - issues and validates signed, time-bounded
//!   bearer credentials; stateless, keyed by the process-wide secret.
//! - [`resolver::IdentityResolver`] - the single entry gate every protected
//!   operation passes through: bearer header to validated token to user
//!   record to [`clinic_core::AuthContext`].
//!
//! The password-hash primitive is an external collaborator behind the
//! [`password::PasswordHasher`] trait.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod password;
pub mod resolver;
pub mod token;

pub use password::{PasswordHasher, StubHasher};
pub use resolver::IdentityResolver;
pub use token::{TokenError, TokenService};

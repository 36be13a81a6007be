//! Policy engine for the clinic backend
//!
//! Pure decision functions, one family per resource kind. Every function
//! takes the acting identity and a resource snapshot and returns a
//! [`Decision`]; nothing here touches storage, so every rule is unit-testable
//! without fixtures beyond the snapshot itself.
//!
//! # Evaluation order
//!
//! The role gate is always evaluated first. For detail reads the handler then
//! checks existence, then the ownership/participant predicate. Mutations skip
//! the separate existence check entirely: they are issued as one conditional
//! storage operation whose filter carries the ownership predicate, and a
//! zero-match result is reported as a denial without revealing whether the
//! document exists.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod decision;
pub mod engine;
pub mod rules;

pub use decision::{Decision, DenyReason};
pub use rules::{role_gate, role_permits, AccessKind, ResourceKind};

//! Identifier and role types used across the clinic backend

pub mod identifiers;
pub mod role;

pub use identifiers::*;
pub use role::Role;

//! Clinic backend core types
//!
//! This crate provides the shared foundation for the clinic backend:
//! - `types/` - Identifier newtypes and the role enum
//! - `domain/` - Document types for every resource kind
//! - `errors` - Unified error type with the HTTP status mapping
//! - `time` - ISO-8601 parsing for request date fields
//! - `config` - Authentication configuration, validated at load
//!
//! # Design Principles
//!
//! - Every document carries exactly the identity references needed to decide
//!   who may act on it; policy evaluation never requires a join.
//! - The credential hash lives on `User` but is excluded from every public
//!   projection (`UserProfile`).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Identifier and role types
pub mod types;

/// Document types for every resource kind
pub mod domain;

/// Unified error type
pub mod errors;

/// ISO-8601 parsing for request date fields
pub mod time;

/// Authentication configuration
pub mod config;

/// Per-request identity context
pub mod context;

pub use config::AuthConfig;
pub use context::AuthContext;
pub use errors::{ClinicError, Result};
pub use time::parse_iso_datetime;
pub use types::identifiers::{
    AppointmentId, BillId, ConsultationId, MedicalHistoryId, MedicalRecordId, MessageId,
    PrescriptionId, TestResultId, UserId,
};
pub use types::role::Role;

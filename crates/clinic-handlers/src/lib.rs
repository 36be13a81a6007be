//! Resource handlers for the clinic backend
//!
//! One handler per resource kind. Every protected method takes the
//! [`clinic_core::AuthContext`] produced by the identity resolver and follows
//! the same shape: validate the input, consult the policy engine, perform
//! exactly one storage operation, and project the result. Mutations go
//! through ownership-scoped conditional operations so no authorization check
//! can be invalidated between check and write.
//!
//! Collaborators are injected as `Arc<dyn Trait>`; nothing here owns a
//! connection or a global handle, which is what lets the integration tests
//! run every flow against the in-memory backend.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod appointments;
pub mod billing;
pub mod consultations;
pub mod messages;
pub mod prescriptions;
pub mod projections;
pub mod records;
pub mod test_results;
pub mod users;

pub use appointments::AppointmentHandler;
pub use billing::BillingHandler;
pub use consultations::ConsultationHandler;
pub use messages::MessageHandler;
pub use prescriptions::PrescriptionHandler;
pub use records::RecordsHandler;
pub use test_results::TestResultHandler;
pub use users::UserHandler;

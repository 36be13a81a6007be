//! Document types for every resource kind
//!
//! Each document carries the identity references the policy layer needs to
//! decide who may act on it: an appointment knows its patient and doctor, a
//! bill knows its patient and creator, a message knows both endpoints.

pub mod appointment;
pub mod bill;
pub mod consultation;
pub mod message;
pub mod prescription;
pub mod records;
pub mod test_result;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use bill::{Bill, PaymentStatus};
pub use consultation::{Consultation, ConsultationStatus};
pub use message::{Message, MessageStatus};
pub use prescription::{Medication, Prescription};
pub use records::{MedicalHistory, MedicalRecord};
pub use test_result::{TestResult, TestStatus};
pub use user::{Contact, Gender, PersonalDetails, User, UserProfile};

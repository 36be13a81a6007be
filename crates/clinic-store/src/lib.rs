//! Storage collaborators for the clinic backend
//!
//! One async trait per resource kind, with typed filter and patch structs.
//! Mutating operations take a filter that must carry the ownership predicate
//! derived from the policy decision, and execute as a single conditional
//! operation returning a matched/deleted count. Handlers never read, modify,
//! and write back across two round trips.
//!
//! The `memory` module provides an in-memory backend implementing every
//! trait; it backs the integration tests and any deployment without a real
//! document store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod memory;
pub mod traits;

pub use memory::MemoryStores;
pub use traits::{
    AppointmentFilter, AppointmentPatch, AppointmentStore, BillFilter, BillPatch, BillStore,
    ConsultationStore, MedicalHistoryFilter, MedicalHistoryStore, MedicalRecordFilter,
    MedicalRecordStore, MessageStore, PrescriptionStore, TestResultFilter, TestResultStore,
    UserStore,
};

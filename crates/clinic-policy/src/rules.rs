//! Declarative role-gate table
//!
//! One table answers "may this role ever perform this access on this resource
//! kind", independent of any particular document. Ownership and participant
//! refinement happens afterwards in [`crate::engine`]. Keeping the gate
//! tabular removes the per-endpoint role branching that tends to drift
//! between resources.

use crate::decision::{Decision, DenyReason};
use clinic_core::Role;
use serde::{Deserialize, Serialize};

/// The eight resource kinds under policy control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Appointments between a patient and a doctor
    Appointment,
    /// Prescriptions written by doctors
    Prescription,
    /// Clinical records
    MedicalRecord,
    /// Diagnosed condition histories
    MedicalHistory,
    /// Lab test results
    TestResult,
    /// Bills and payments
    Bill,
    /// Internal messages
    Message,
    /// Remote consultation meetings
    Consultation,
}

impl ResourceKind {
    /// All resource kinds, in a fixed order (used by exhaustive policy tests)
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Appointment,
        ResourceKind::Prescription,
        ResourceKind::MedicalRecord,
        ResourceKind::MedicalHistory,
        ResourceKind::TestResult,
        ResourceKind::Bill,
        ResourceKind::Message,
        ResourceKind::Consultation,
    ];
}

/// The four access kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// Insert a new document
    Create,
    /// Read one or many documents
    Read,
    /// Mutate an existing document
    Update,
    /// Remove a document
    Delete,
}

impl AccessKind {
    /// All access kinds, in a fixed order
    pub const ALL: [AccessKind; 4] = [
        AccessKind::Create,
        AccessKind::Read,
        AccessKind::Update,
        AccessKind::Delete,
    ];
}

/// Permitted (resource, access, role) triples
///
/// Absence from this table means the role can never perform the access, no
/// matter which document is targeted.
const ROLE_GATES: &[(ResourceKind, AccessKind, Role)] = &[
    // Appointments: booked by patients, visible to both participants,
    // mutable by both with asymmetric field rights, cancellable by the
    // patient only.
    (ResourceKind::Appointment, AccessKind::Create, Role::Patient),
    (ResourceKind::Appointment, AccessKind::Read, Role::Patient),
    (ResourceKind::Appointment, AccessKind::Read, Role::Doctor),
    (ResourceKind::Appointment, AccessKind::Update, Role::Patient),
    (ResourceKind::Appointment, AccessKind::Update, Role::Doctor),
    (ResourceKind::Appointment, AccessKind::Delete, Role::Patient),
    // Prescriptions: write-once by doctors, listed by the owning patient.
    (ResourceKind::Prescription, AccessKind::Create, Role::Doctor),
    (ResourceKind::Prescription, AccessKind::Read, Role::Patient),
    // Medical records and histories: authored by doctors, readable by the
    // author and the owning patient.
    (ResourceKind::MedicalRecord, AccessKind::Create, Role::Doctor),
    (ResourceKind::MedicalRecord, AccessKind::Read, Role::Doctor),
    (ResourceKind::MedicalRecord, AccessKind::Read, Role::Patient),
    (ResourceKind::MedicalHistory, AccessKind::Create, Role::Doctor),
    (ResourceKind::MedicalHistory, AccessKind::Read, Role::Doctor),
    (ResourceKind::MedicalHistory, AccessKind::Read, Role::Patient),
    // Test results: authored by doctors, readable by author and patient.
    (ResourceKind::TestResult, AccessKind::Create, Role::Doctor),
    (ResourceKind::TestResult, AccessKind::Read, Role::Doctor),
    (ResourceKind::TestResult, AccessKind::Read, Role::Patient),
    // Bills: issued by admin/receptionist; admin sees all, receptionist
    // own-created, patient own; the only update is the patient paying.
    (ResourceKind::Bill, AccessKind::Create, Role::Admin),
    (ResourceKind::Bill, AccessKind::Create, Role::Receptionist),
    (ResourceKind::Bill, AccessKind::Read, Role::Admin),
    (ResourceKind::Bill, AccessKind::Read, Role::Receptionist),
    (ResourceKind::Bill, AccessKind::Read, Role::Patient),
    (ResourceKind::Bill, AccessKind::Update, Role::Patient),
    // Messages: send gated by the role-pair allow-list (nurses hold no
    // allowed pair); every role may read its own inbox.
    (ResourceKind::Message, AccessKind::Create, Role::Patient),
    (ResourceKind::Message, AccessKind::Create, Role::Doctor),
    (ResourceKind::Message, AccessKind::Create, Role::Admin),
    (ResourceKind::Message, AccessKind::Create, Role::Receptionist),
    (ResourceKind::Message, AccessKind::Read, Role::Patient),
    (ResourceKind::Message, AccessKind::Read, Role::Doctor),
    (ResourceKind::Message, AccessKind::Read, Role::Admin),
    (ResourceKind::Message, AccessKind::Read, Role::Nurse),
    (ResourceKind::Message, AccessKind::Read, Role::Receptionist),
    // Consultations: created by the doctor, readable by either participant.
    (ResourceKind::Consultation, AccessKind::Create, Role::Doctor),
    (ResourceKind::Consultation, AccessKind::Read, Role::Doctor),
    (ResourceKind::Consultation, AccessKind::Read, Role::Patient),
];

/// True if the role gate permits this access on this resource kind
pub fn role_permits(kind: ResourceKind, access: AccessKind, role: Role) -> bool {
    ROLE_GATES
        .iter()
        .any(|&(k, a, r)| k == kind && a == access && r == role)
}

/// Evaluate the role gate as a decision
pub fn role_gate(kind: ResourceKind, access: AccessKind, role: Role) -> Decision {
    Decision::allow_if(role_permits(kind, access, role), DenyReason::WrongRole)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nurses_never_pass_a_write_gate() {
        for kind in ResourceKind::ALL {
            for access in [AccessKind::Create, AccessKind::Update, AccessKind::Delete] {
                assert!(
                    !role_permits(kind, access, Role::Nurse),
                    "nurse unexpectedly permitted {access:?} on {kind:?}"
                );
            }
        }
    }

    #[test]
    fn gate_denies_with_wrong_role() {
        assert_eq!(
            role_gate(ResourceKind::Prescription, AccessKind::Create, Role::Patient),
            Decision::Deny(DenyReason::WrongRole)
        );
        assert!(
            role_gate(ResourceKind::Prescription, AccessKind::Create, Role::Doctor).is_allowed()
        );
    }
}

//! Exhaustive enumeration of the role gate
//!
//! Every (role, resource, access) cell is asserted against the permission
//! table, so any drift in the declarative rules shows up as a named failure.

use clinic_core::Role;
use clinic_policy::{role_permits, AccessKind, ResourceKind};

/// The full set of permitted cells, spelled out independently of the
/// implementation's table.
fn expected_permits() -> Vec<(ResourceKind, AccessKind, Role)> {
    use AccessKind::*;
    use ResourceKind::*;
    use Role::*;

    vec![
        (Appointment, Create, Patient),
        (Appointment, Read, Patient),
        (Appointment, Read, Doctor),
        (Appointment, Update, Patient),
        (Appointment, Update, Doctor),
        (Appointment, Delete, Patient),
        (Prescription, Create, Doctor),
        (Prescription, Read, Patient),
        (MedicalRecord, Create, Doctor),
        (MedicalRecord, Read, Doctor),
        (MedicalRecord, Read, Patient),
        (MedicalHistory, Create, Doctor),
        (MedicalHistory, Read, Doctor),
        (MedicalHistory, Read, Patient),
        (TestResult, Create, Doctor),
        (TestResult, Read, Doctor),
        (TestResult, Read, Patient),
        (Bill, Create, Admin),
        (Bill, Create, Receptionist),
        (Bill, Read, Admin),
        (Bill, Read, Receptionist),
        (Bill, Read, Patient),
        (Bill, Update, Patient),
        (Message, Create, Patient),
        (Message, Create, Doctor),
        (Message, Create, Admin),
        (Message, Create, Receptionist),
        (Message, Read, Patient),
        (Message, Read, Doctor),
        (Message, Read, Admin),
        (Message, Read, Nurse),
        (Message, Read, Receptionist),
        (Consultation, Create, Doctor),
        (Consultation, Read, Doctor),
        (Consultation, Read, Patient),
    ]
}

#[test]
fn every_cell_of_the_matrix_matches_the_table() {
    let expected = expected_permits();
    let mut cells = 0;
    for kind in ResourceKind::ALL {
        for access in AccessKind::ALL {
            for role in Role::ALL {
                cells += 1;
                let want = expected.contains(&(kind, access, role));
                assert_eq!(
                    role_permits(kind, access, role),
                    want,
                    "cell ({kind:?}, {access:?}, {role}) expected {want}"
                );
            }
        }
    }
    assert_eq!(cells, 8 * 4 * 5);
}

#[test]
fn no_role_holds_delete_outside_appointments() {
    for kind in ResourceKind::ALL {
        if kind == ResourceKind::Appointment {
            continue;
        }
        for role in Role::ALL {
            assert!(!role_permits(kind, AccessKind::Delete, role));
        }
    }
}

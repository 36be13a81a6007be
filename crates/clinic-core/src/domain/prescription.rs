//! Prescription documents

use crate::types::{PrescriptionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single medication entry on a prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Drug name
    pub name: String,
    /// Dosage, e.g. "500mg"
    pub dosage: String,
    /// Intake schedule, e.g. "twice daily"
    pub frequency: String,
}

/// A prescription, written once by its authoring doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    /// Primary key
    pub id: PrescriptionId,
    /// Owning patient
    pub patient_id: UserId,
    /// Authoring doctor
    pub doctor_id: UserId,
    /// When it was issued
    pub prescribed_date: DateTime<Utc>,
    /// Medication entries
    pub medications: Vec<Medication>,
}

impl Prescription {
    /// Issue a new prescription dated now
    pub fn issue(patient_id: UserId, doctor_id: UserId, medications: Vec<Medication>) -> Self {
        Self {
            id: PrescriptionId::new(),
            patient_id,
            doctor_id,
            prescribed_date: Utc::now(),
            medications,
        }
    }
}

//! Medical record and medical history documents

use crate::types::{MedicalHistoryId, MedicalRecordId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A clinical record uploaded by a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    /// Primary key
    pub id: MedicalRecordId,
    /// Owning patient
    pub patient_id: UserId,
    /// Authoring doctor
    pub doctor_id: UserId,
    /// Kind of record, e.g. "X-Ray", "Lab Report"
    pub record_type: String,
    /// Clinical description
    pub description: String,
    /// Location of the attached document
    pub file_url: String,
    /// Upload time
    pub uploaded_at: DateTime<Utc>,
}

impl MedicalRecord {
    /// Create a record dated now
    pub fn create(
        patient_id: UserId,
        doctor_id: UserId,
        record_type: String,
        description: String,
        file_url: String,
    ) -> Self {
        Self {
            id: MedicalRecordId::new(),
            patient_id,
            doctor_id,
            record_type,
            description,
            file_url,
            uploaded_at: Utc::now(),
        }
    }
}

/// A patient's diagnosed conditions, registered by a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalHistory {
    /// Primary key
    pub id: MedicalHistoryId,
    /// Owning patient
    pub patient_id: UserId,
    /// Diagnosing doctor
    pub diagnosed_by: UserId,
    /// Diagnosed conditions
    pub conditions: Vec<String>,
    /// Supporting document locations
    pub documents: Vec<String>,
    /// Registration time
    pub registered_at: DateTime<Utc>,
}

impl MedicalHistory {
    /// Register a history entry dated now
    pub fn register(
        patient_id: UserId,
        diagnosed_by: UserId,
        conditions: Vec<String>,
        documents: Vec<String>,
    ) -> Self {
        Self {
            id: MedicalHistoryId::new(),
            patient_id,
            diagnosed_by,
            conditions,
            documents,
            registered_at: Utc::now(),
        }
    }
}

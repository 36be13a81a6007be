//! Lab test result documents

use crate::types::{MedicalRecordId, TestResultId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Test result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// Results available
    Completed,
    /// Awaiting lab work
    Pending,
}

/// A lab test result attached to a medical record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Primary key
    pub id: TestResultId,
    /// The medical record this test belongs to
    pub medical_record_id: MedicalRecordId,
    /// Owning patient
    pub patient_id: UserId,
    /// Authoring doctor
    pub doctor_id: UserId,
    /// Name of the test, e.g. "Complete Blood Count"
    pub test_name: String,
    /// When the test was taken
    pub test_date: DateTime<Utc>,
    /// Results payload
    pub results: String,
    /// Status
    pub status: TestStatus,
    /// Doctor's remarks
    pub remarks: String,
}

impl TestResult {
    /// Post a completed test result
    #[allow(clippy::too_many_arguments)]
    pub fn post(
        medical_record_id: MedicalRecordId,
        patient_id: UserId,
        doctor_id: UserId,
        test_name: String,
        test_date: DateTime<Utc>,
        results: String,
        remarks: Option<String>,
    ) -> Self {
        Self {
            id: TestResultId::new(),
            medical_record_id,
            patient_id,
            doctor_id,
            test_name,
            test_date,
            results,
            status: TestStatus::Completed,
            remarks: remarks.unwrap_or_default(),
        }
    }
}

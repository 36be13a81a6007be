//! Lab test result handling
//!
//! Posted by the authoring doctor against an existing medical record; listed
//! by the author (with patient demographics) or the owning patient (with the
//! prescribing doctor's attribution line).

use crate::projections::{doctor_attribution, user_map, PatientDetails};
use chrono::{DateTime, Utc};
use clinic_core::domain::{TestResult, TestStatus};
use clinic_core::{
    parse_iso_datetime, AuthContext, ClinicError, MedicalRecordId, Result, Role, TestResultId,
    UserId,
};
use clinic_policy::engine::test_result as policy;
use clinic_store::{TestResultFilter, TestResultStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Test result creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestResultRequest {
    /// The medical record this test belongs to
    pub medical_record_id: MedicalRecordId,
    /// The tested patient
    pub patient_id: UserId,
    /// Name of the test
    pub test_name: String,
    /// ISO-8601 date the test was taken
    pub test_date: String,
    /// Results payload
    pub results: String,
    /// Optional remarks
    pub remarks: Option<String>,
}

/// One row of a test result listing
#[derive(Debug, Clone, Serialize)]
pub struct TestResultView {
    /// Test result id
    pub test_result_id: TestResultId,
    /// The medical record this test belongs to
    pub medical_record_id: MedicalRecordId,
    /// Name of the test
    pub test_name: String,
    /// When the test was taken
    pub test_date: DateTime<Utc>,
    /// Results payload
    pub results: String,
    /// Status
    pub status: TestStatus,
    /// Remarks
    pub remarks: String,
    /// Patient demographics, present when a doctor is listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_details: Option<PatientDetails>,
    /// "Dr. First Last", present when a patient is listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

/// Test result operations
pub struct TestResultHandler {
    test_results: Arc<dyn TestResultStore>,
    users: Arc<dyn UserStore>,
}

impl TestResultHandler {
    /// Create a handler over the injected collaborators
    pub fn new(test_results: Arc<dyn TestResultStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            test_results,
            users,
        }
    }

    /// Post a test result authored by the acting doctor
    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateTestResultRequest,
    ) -> Result<TestResultId> {
        policy::may_create(ctx).require()?;
        if request.test_name.is_empty() || request.results.is_empty() {
            return Err(ClinicError::invalid_input(
                "test_name and results are required",
            ));
        }
        let date = parse_iso_datetime("test_date", &request.test_date)?;
        if self.users.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicError::not_found("patient not found"));
        }

        let result = TestResult::post(
            request.medical_record_id,
            request.patient_id,
            ctx.user_id,
            request.test_name,
            date,
            request.results,
            request.remarks,
        );
        let id = self.test_results.insert(result).await?;
        info!(test_result_id = %id, doctor = %ctx.user_id, "test result posted");
        Ok(id)
    }

    /// List test results on the acting user's own side
    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<TestResultView>> {
        policy::may_list(ctx).require()?;

        let filter = match ctx.role {
            Role::Doctor => TestResultFilter {
                doctor_id: Some(ctx.user_id),
                ..TestResultFilter::default()
            },
            _ => TestResultFilter {
                patient_id: Some(ctx.user_id),
                ..TestResultFilter::default()
            },
        };
        let results = self.test_results.find_many(&filter).await?;

        let counterpart_ids = results.iter().map(|t| match ctx.role {
            Role::Doctor => t.patient_id,
            _ => t.doctor_id,
        });
        let related = user_map(self.users.as_ref(), counterpart_ids).await?;

        Ok(results
            .into_iter()
            .map(|t| {
                let (patient_details, uploaded_by) = match ctx.role {
                    Role::Doctor => (
                        related.get(&t.patient_id).map(PatientDetails::from_user),
                        None,
                    ),
                    _ => (None, related.get(&t.doctor_id).map(doctor_attribution)),
                };
                TestResultView {
                    test_result_id: t.id,
                    medical_record_id: t.medical_record_id,
                    test_name: t.test_name,
                    test_date: t.test_date,
                    results: t.results,
                    status: t.status,
                    remarks: t.remarks,
                    patient_details,
                    uploaded_by,
                }
            })
            .collect())
    }
}

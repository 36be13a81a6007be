//! Prescription handling
//!
//! Write-once by the authoring doctor; listed by the owning patient with the
//! prescriber's name attached.

use crate::projections::user_map;
use chrono::{DateTime, Utc};
use clinic_core::domain::{Medication, Prescription};
use clinic_core::{AuthContext, ClinicError, PrescriptionId, Result, UserId};
use clinic_policy::engine::prescription as policy;
use clinic_store::{PrescriptionStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Prescription creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrescriptionRequest {
    /// The patient being prescribed to
    pub patient_id: UserId,
    /// Medication entries, at least one
    pub medications: Vec<Medication>,
}

/// One row of a patient's prescription listing
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionView {
    /// Prescription id
    pub prescription_id: PrescriptionId,
    /// When it was issued
    pub prescribed_date: DateTime<Utc>,
    /// Medication entries
    pub medications: Vec<Medication>,
    /// Prescriber's given name
    pub doctor_first_name: String,
    /// Prescriber's family name
    pub doctor_last_name: String,
}

/// Prescription operations
pub struct PrescriptionHandler {
    prescriptions: Arc<dyn PrescriptionStore>,
    users: Arc<dyn UserStore>,
}

impl PrescriptionHandler {
    /// Create a handler over the injected collaborators
    pub fn new(prescriptions: Arc<dyn PrescriptionStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            prescriptions,
            users,
        }
    }

    /// Post a prescription authored by the acting doctor
    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreatePrescriptionRequest,
    ) -> Result<PrescriptionId> {
        policy::may_create(ctx).require()?;
        if request.medications.is_empty() {
            return Err(ClinicError::invalid_input(
                "medications must contain at least one entry",
            ));
        }
        if self.users.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicError::not_found("patient not found"));
        }

        let prescription =
            Prescription::issue(request.patient_id, ctx.user_id, request.medications);
        let id = self.prescriptions.insert(prescription).await?;
        info!(prescription_id = %id, doctor = %ctx.user_id, "prescription created");
        Ok(id)
    }

    /// List the acting patient's prescriptions
    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<PrescriptionView>> {
        policy::may_list(ctx, ctx.user_id).require()?;

        let prescriptions = self.prescriptions.find_for_patient(ctx.user_id).await?;
        let doctors = user_map(
            self.users.as_ref(),
            prescriptions.iter().map(|p| p.doctor_id),
        )
        .await?;

        Ok(prescriptions
            .into_iter()
            .map(|p| {
                let (first, last) = doctors
                    .get(&p.doctor_id)
                    .map(|d| {
                        (
                            d.personal_details.first_name.clone(),
                            d.personal_details.last_name.clone(),
                        )
                    })
                    .unwrap_or_default();
                PrescriptionView {
                    prescription_id: p.id,
                    prescribed_date: p.prescribed_date,
                    medications: p.medications,
                    doctor_first_name: first,
                    doctor_last_name: last,
                }
            })
            .collect())
    }
}

//! Consultation meeting handling
//!
//! Doctors upload meeting links; either participant may fetch the details.
//! The detail read checks role, then existence, then participation, in that
//! order.

use crate::projections::PatientDetails;
use chrono::{DateTime, Utc};
use clinic_core::domain::{Consultation, ConsultationStatus};
use clinic_core::{
    parse_iso_datetime, AuthContext, ClinicError, ConsultationId, Result, Role, UserId,
};
use clinic_policy::engine::consultation as policy;
use clinic_policy::{role_gate, AccessKind, ResourceKind};
use clinic_store::{ConsultationStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Meeting link upload input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsultationRequest {
    /// The participating patient
    pub patient_id: UserId,
    /// Video meeting link
    pub meeting_link: String,
    /// ISO-8601 scheduled time
    pub consultation_date: String,
}

/// Doctor details shown to the participating patient
#[derive(Debug, Clone, Serialize)]
pub struct ConsultingDoctor {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Specialization, empty when not recorded
    pub specialization: String,
    /// Email address
    pub email: String,
    /// License number, empty when not recorded
    pub license_number: String,
}

/// Consultation detail projection
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationView {
    /// Consultation id
    pub consultation_id: ConsultationId,
    /// Video meeting link
    pub meeting_link: String,
    /// Scheduled time
    pub consultation_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: ConsultationStatus,
    /// Notes
    pub notes: String,
    /// Counterpart doctor, present when the patient is viewing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_details: Option<ConsultingDoctor>,
    /// Counterpart patient, present when the doctor is viewing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_details: Option<PatientDetails>,
}

/// Consultation operations
pub struct ConsultationHandler {
    consultations: Arc<dyn ConsultationStore>,
    users: Arc<dyn UserStore>,
}

impl ConsultationHandler {
    /// Create a handler over the injected collaborators
    pub fn new(consultations: Arc<dyn ConsultationStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            consultations,
            users,
        }
    }

    /// Upload a meeting link for a consultation hosted by the acting doctor
    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateConsultationRequest,
    ) -> Result<ConsultationId> {
        policy::may_create(ctx).require()?;
        if request.meeting_link.is_empty() {
            return Err(ClinicError::invalid_input("meeting_link is required"));
        }
        let date = parse_iso_datetime("consultation_date", &request.consultation_date)?;
        if self.users.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicError::not_found("patient not found"));
        }

        let consultation =
            Consultation::schedule(ctx.user_id, request.patient_id, request.meeting_link, date);
        let id = self.consultations.insert(consultation).await?;
        info!(consultation_id = %id, doctor = %ctx.user_id, "meeting link uploaded");
        Ok(id)
    }

    /// Fetch the meeting details for a consultation the actor participates in
    pub async fn get(&self, ctx: &AuthContext, id: ConsultationId) -> Result<ConsultationView> {
        role_gate(ResourceKind::Consultation, AccessKind::Read, ctx.role).require()?;

        let consultation = self
            .consultations
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinicError::not_found("consultation not found"))?;
        policy::may_view(ctx, &consultation).require()?;

        let counterpart_id = if ctx.role == Role::Doctor {
            consultation.patient_id
        } else {
            consultation.doctor_id
        };
        let counterpart = self.users.find_by_id(counterpart_id).await?;

        let (doctor_details, patient_details) = match ctx.role {
            Role::Doctor => (
                None,
                counterpart.as_ref().map(PatientDetails::from_user),
            ),
            _ => (
                counterpart.as_ref().map(|u| ConsultingDoctor {
                    first_name: u.personal_details.first_name.clone(),
                    last_name: u.personal_details.last_name.clone(),
                    specialization: u.specialization.clone().unwrap_or_default(),
                    email: u.contact.email.clone(),
                    license_number: u.license_number.clone().unwrap_or_default(),
                }),
                None,
            ),
        };

        Ok(ConsultationView {
            consultation_id: consultation.id,
            meeting_link: consultation.meeting_link,
            consultation_date: consultation.consultation_date,
            status: consultation.status,
            notes: consultation.notes,
            doctor_details,
            patient_details,
        })
    }
}

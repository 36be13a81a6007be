//! Appointment handling
//!
//! Patients book for themselves; both participants list their own side;
//! updates carry asymmetric field rights; cancellation is patient-only.
//! Updates and cancellation are issued as ownership-scoped conditional
//! operations, so the storage layer re-checks ownership atomically with the
//! write.

use crate::projections::{user_map, DoctorDetails, PatientDetails};
use chrono::{DateTime, Utc};
use clinic_core::domain::{Appointment, AppointmentStatus};
use clinic_core::{
    parse_iso_datetime, AppointmentId, AuthContext, ClinicError, Result, Role, UserId,
};
use clinic_policy::engine::appointment as policy;
use clinic_store::{AppointmentFilter, AppointmentPatch, AppointmentStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Booking input
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    /// Doctor to book with
    pub doctor_id: UserId,
    /// ISO-8601 scheduled time
    pub appointment_date: String,
    /// Optional notes
    pub notes: Option<String>,
}

/// Update input; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    /// Reassign the doctor (patients only)
    pub doctor_id: Option<UserId>,
    /// Move the scheduled time
    pub appointment_date: Option<String>,
    /// Replace the notes (doctors only)
    pub notes: Option<String>,
}

/// Booking confirmation
#[derive(Debug, Clone, Serialize)]
pub struct BookedAppointment {
    /// The new appointment's id
    pub appointment_id: AppointmentId,
    /// Initial status, always `Scheduled`
    pub status: AppointmentStatus,
}

/// One row of an appointment listing
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    /// Appointment id
    pub appointment_id: AppointmentId,
    /// Scheduled time
    pub appointment_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: AppointmentStatus,
    /// Notes
    pub notes: String,
    /// Counterpart doctor, present when a patient is listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_details: Option<DoctorDetails>,
    /// Counterpart patient, present when a doctor is listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_details: Option<PatientDetails>,
}

/// Appointment operations
pub struct AppointmentHandler {
    appointments: Arc<dyn AppointmentStore>,
    users: Arc<dyn UserStore>,
}

impl AppointmentHandler {
    /// Create a handler over the injected collaborators
    pub fn new(appointments: Arc<dyn AppointmentStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            appointments,
            users,
        }
    }

    /// Book an appointment for the acting patient
    pub async fn book(
        &self,
        ctx: &AuthContext,
        request: BookAppointmentRequest,
    ) -> Result<BookedAppointment> {
        policy::may_book(ctx, ctx.user_id).require()?;

        let date = parse_iso_datetime("appointment_date", &request.appointment_date)?;
        let doctor = self
            .users
            .find_by_id(request.doctor_id)
            .await?
            .ok_or_else(|| ClinicError::not_found("doctor not found"))?;
        if doctor.role != Role::Doctor {
            return Err(ClinicError::invalid_input("doctor_id must reference a doctor"));
        }

        let appointment = Appointment::book(ctx.user_id, request.doctor_id, date, request.notes);
        let status = appointment.status;
        let appointment_id = self.appointments.insert(appointment).await?;
        info!(%appointment_id, patient = %ctx.user_id, "appointment booked");
        Ok(BookedAppointment {
            appointment_id,
            status,
        })
    }

    /// List the acting user's appointments with counterpart projections
    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<AppointmentView>> {
        let filter = match ctx.role {
            Role::Patient => AppointmentFilter::for_patient(ctx.user_id),
            Role::Doctor => AppointmentFilter::for_doctor(ctx.user_id),
            _ => {
                return clinic_policy::role_gate(
                    clinic_policy::ResourceKind::Appointment,
                    clinic_policy::AccessKind::Read,
                    ctx.role,
                )
                .require()
                .map(|_| Vec::new())
            }
        };
        let appointments = self.appointments.find_many(&filter).await?;

        let counterpart_ids = appointments.iter().map(|a| match ctx.role {
            Role::Patient => a.doctor_id,
            _ => a.patient_id,
        });
        let related = user_map(self.users.as_ref(), counterpart_ids).await?;

        Ok(appointments
            .into_iter()
            .map(|a| {
                let (doctor_details, patient_details) = match ctx.role {
                    Role::Patient => (
                        related.get(&a.doctor_id).map(DoctorDetails::from_user),
                        None,
                    ),
                    _ => (
                        None,
                        related.get(&a.patient_id).map(PatientDetails::from_user),
                    ),
                };
                AppointmentView {
                    appointment_id: a.id,
                    appointment_date: a.appointment_date,
                    status: a.status,
                    notes: a.notes,
                    doctor_details,
                    patient_details,
                }
            })
            .collect())
    }

    /// Apply a partial update to an appointment the actor participates in
    pub async fn update(
        &self,
        ctx: &AuthContext,
        appointment_id: AppointmentId,
        request: UpdateAppointmentRequest,
    ) -> Result<()> {
        let changes = policy::ChangeSet {
            doctor: request.doctor_id.is_some(),
            date: request.appointment_date.is_some(),
            notes: request.notes.is_some(),
        };
        if !(changes.doctor || changes.date || changes.notes) {
            return Err(ClinicError::invalid_input("no fields to update"));
        }
        policy::fields_permitted(ctx.role, changes).require()?;

        let date = request
            .appointment_date
            .as_deref()
            .map(|d| parse_iso_datetime("appointment_date", d))
            .transpose()?;
        if let Some(doctor_id) = request.doctor_id {
            let doctor = self
                .users
                .find_by_id(doctor_id)
                .await?
                .ok_or_else(|| ClinicError::not_found("doctor not found"))?;
            if doctor.role != Role::Doctor {
                return Err(ClinicError::invalid_input("doctor_id must reference a doctor"));
            }
        }

        // Ownership rides in the filter; the conditional write is the
        // participant check.
        let filter = AppointmentFilter {
            id: Some(appointment_id),
            patient_id: (ctx.role == Role::Patient).then_some(ctx.user_id),
            doctor_id: (ctx.role == Role::Doctor).then_some(ctx.user_id),
        };
        let patch = AppointmentPatch {
            doctor_id: request.doctor_id,
            appointment_date: date,
            notes: request.notes,
            status: None,
        };
        let matched = self.appointments.update_one(&filter, patch).await?;
        if matched == 0 {
            return Err(ClinicError::forbidden(
                "appointment is not owned by the acting user",
            ));
        }
        info!(%appointment_id, actor = %ctx.user_id, "appointment updated");
        Ok(())
    }

    /// Cancel (remove) the acting patient's appointment
    pub async fn cancel(&self, ctx: &AuthContext, appointment_id: AppointmentId) -> Result<()> {
        policy::may_cancel(ctx, ctx.user_id).require()?;

        let filter = AppointmentFilter {
            id: Some(appointment_id),
            patient_id: Some(ctx.user_id),
            doctor_id: None,
        };
        let deleted = self.appointments.delete_one(&filter).await?;
        if deleted == 0 {
            return Err(ClinicError::forbidden(
                "appointment is not owned by the acting user",
            ));
        }
        info!(%appointment_id, patient = %ctx.user_id, "appointment cancelled");
        Ok(())
    }
}

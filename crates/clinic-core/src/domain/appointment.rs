//! Appointment documents

use crate::types::{AppointmentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Booked and upcoming
    Scheduled,
    /// Cancelled by the patient
    Cancelled,
    /// Took place
    Completed,
}

/// An appointment, jointly owned by its patient and its doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Primary key
    pub id: AppointmentId,
    /// Owning patient
    pub patient_id: UserId,
    /// Assigned doctor
    pub doctor_id: UserId,
    /// Scheduled time
    pub appointment_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: AppointmentStatus,
    /// Free-form notes
    pub notes: String,
}

impl Appointment {
    /// Book a new appointment; status starts as `Scheduled`
    pub fn book(
        patient_id: UserId,
        doctor_id: UserId,
        appointment_date: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            patient_id,
            doctor_id,
            appointment_date,
            status: AppointmentStatus::Scheduled,
            notes: notes.unwrap_or_default(),
        }
    }
}

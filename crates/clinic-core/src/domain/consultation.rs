//! Consultation meeting documents

use crate::types::{ConsultationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Consultation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationStatus {
    /// Upcoming
    Scheduled,
    /// Cancelled
    Cancelled,
    /// Took place
    Completed,
}

/// A remote consultation between a doctor and a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    /// Primary key
    pub id: ConsultationId,
    /// Hosting doctor
    pub doctor_id: UserId,
    /// Participating patient
    pub patient_id: UserId,
    /// Video meeting link
    pub meeting_link: String,
    /// Scheduled time
    pub consultation_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: ConsultationStatus,
    /// Free-form notes
    pub notes: String,
    /// When the link was uploaded
    pub created_at: DateTime<Utc>,
}

impl Consultation {
    /// Schedule a consultation; status starts as `Scheduled`
    pub fn schedule(
        doctor_id: UserId,
        patient_id: UserId,
        meeting_link: String,
        consultation_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ConsultationId::new(),
            doctor_id,
            patient_id,
            meeting_link,
            consultation_date,
            status: ConsultationStatus::Scheduled,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

//! Billing documents

use crate::types::{BillId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting payment
    Unpaid,
    /// Settled by the patient
    Paid,
}

/// A bill issued to a patient
///
/// `created_by` is the receptionist who issued it, absent when an admin did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Primary key
    pub id: BillId,
    /// Billed patient
    pub patient_id: UserId,
    /// Issuing receptionist, if any
    pub created_by: Option<UserId>,
    /// Total amount in the clinic's currency
    pub total_amount: f64,
    /// Itemized services
    pub services: Vec<String>,
    /// Payment status
    pub payment_status: PaymentStatus,
    /// How it was paid, set on the Unpaid -> Paid transition
    pub payment_method: Option<String>,
    /// When it was paid
    pub paid_at: Option<DateTime<Utc>>,
    /// When it was issued
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Issue a new bill; status starts as `Unpaid`
    pub fn issue(
        patient_id: UserId,
        created_by: Option<UserId>,
        total_amount: f64,
        services: Vec<String>,
    ) -> Self {
        Self {
            id: BillId::new(),
            patient_id,
            created_by,
            total_amount,
            services,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            paid_at: None,
            created_at: Utc::now(),
        }
    }
}

//! Billing handling
//!
//! Admin and receptionists issue bills; visibility is role-scoped (admin all,
//! receptionist own-created, patient own); the only mutation is the patient
//! paying their own bill, executed as one conditional `Unpaid -> Paid`
//! transition so a concurrent or repeated payment can never double-apply.

use crate::projections::user_map;
use chrono::{DateTime, Utc};
use clinic_core::domain::{Bill, PaymentStatus};
use clinic_core::{AuthContext, BillId, ClinicError, Result, Role, UserId};
use clinic_policy::engine::bill as policy;
use clinic_store::{BillFilter, BillPatch, BillStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Bill creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBillRequest {
    /// The billed patient
    pub patient_id: UserId,
    /// Total amount
    pub total_amount: f64,
    /// Itemized services, at least one
    pub services: Vec<String>,
}

/// Payment input
#[derive(Debug, Clone, Deserialize)]
pub struct PayBillRequest {
    /// The bill to settle
    pub billing_id: BillId,
    /// How it is being paid
    pub payment_method: String,
}

/// Who issued a bill, shown to the billed patient
#[derive(Debug, Clone, Serialize)]
pub struct BilledBy {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone numbers
    pub phone: Vec<String>,
}

/// One row of a bill listing
#[derive(Debug, Clone, Serialize)]
pub struct BillView {
    /// Bill id
    pub bill_id: BillId,
    /// Total amount
    pub total_amount: f64,
    /// Payment status
    pub payment_status: PaymentStatus,
    /// Itemized services
    pub services: Vec<String>,
    /// When it was issued
    pub created_at: DateTime<Utc>,
    /// Issuer details, present when the patient is listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billed_by: Option<BilledBy>,
    /// "First Last" of the billed patient, present when the issuer is listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billed_for: Option<String>,
}

/// Billing operations
pub struct BillingHandler {
    bills: Arc<dyn BillStore>,
    users: Arc<dyn UserStore>,
}

impl BillingHandler {
    /// Create a handler over the injected collaborators
    pub fn new(bills: Arc<dyn BillStore>, users: Arc<dyn UserStore>) -> Self {
        Self { bills, users }
    }

    /// Issue a bill to a patient
    pub async fn create(&self, ctx: &AuthContext, request: CreateBillRequest) -> Result<BillId> {
        policy::may_create(ctx).require()?;
        if request.services.is_empty() {
            return Err(ClinicError::invalid_input(
                "services must contain at least one entry",
            ));
        }
        if request.total_amount <= 0.0 {
            return Err(ClinicError::invalid_input("total_amount must be positive"));
        }
        if self.users.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicError::not_found("patient not found"));
        }

        let created_by = (ctx.role == Role::Receptionist).then_some(ctx.user_id);
        let bill = Bill::issue(
            request.patient_id,
            created_by,
            request.total_amount,
            request.services,
        );
        let id = self.bills.insert(bill).await?;
        info!(bill_id = %id, actor = %ctx.user_id, "bill issued");
        Ok(id)
    }

    /// List bills visible to the acting user
    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<BillView>> {
        let filter = match ctx.role {
            Role::Admin => BillFilter::default(),
            Role::Receptionist => BillFilter {
                created_by: Some(ctx.user_id),
                ..BillFilter::default()
            },
            Role::Patient => BillFilter {
                patient_id: Some(ctx.user_id),
                ..BillFilter::default()
            },
            _ => {
                return clinic_policy::role_gate(
                    clinic_policy::ResourceKind::Bill,
                    clinic_policy::AccessKind::Read,
                    ctx.role,
                )
                .require()
                .map(|_| Vec::new())
            }
        };
        let bills = self.bills.find_many(&filter).await?;

        let related_ids = bills
            .iter()
            .flat_map(|b| b.created_by.into_iter().chain(Some(b.patient_id)));
        let related = user_map(self.users.as_ref(), related_ids).await?;

        Ok(bills
            .into_iter()
            .map(|b| {
                let billed_by = match ctx.role {
                    Role::Patient => b.created_by.and_then(|id| related.get(&id)).map(|u| {
                        BilledBy {
                            first_name: u.personal_details.first_name.clone(),
                            last_name: u.personal_details.last_name.clone(),
                            email: u.contact.email.clone(),
                            phone: u.contact.phone.clone(),
                        }
                    }),
                    _ => None,
                };
                let billed_for = match ctx.role {
                    Role::Receptionist | Role::Admin => related
                        .get(&b.patient_id)
                        .map(|u| u.personal_details.full_name()),
                    _ => None,
                };
                BillView {
                    bill_id: b.id,
                    total_amount: b.total_amount,
                    payment_status: b.payment_status,
                    services: b.services,
                    created_at: b.created_at,
                    billed_by,
                    billed_for,
                }
            })
            .collect())
    }

    /// Settle the acting patient's own bill
    ///
    /// The transition is one conditional update matching id, owner, and
    /// `Unpaid`. On a zero match the handler re-reads with the ownership
    /// filter only to choose the error: an owned, already-paid bill is a
    /// `Conflict` (deterministic replay answer), anything else is masked as
    /// `Forbidden`.
    pub async fn pay(&self, ctx: &AuthContext, request: PayBillRequest) -> Result<()> {
        clinic_policy::role_gate(
            clinic_policy::ResourceKind::Bill,
            clinic_policy::AccessKind::Update,
            ctx.role,
        )
        .require()?;
        if request.payment_method.is_empty() {
            return Err(ClinicError::invalid_input("payment_method is required"));
        }

        let filter = BillFilter {
            id: Some(request.billing_id),
            patient_id: Some(ctx.user_id),
            payment_status: Some(PaymentStatus::Unpaid),
            created_by: None,
        };
        let patch = BillPatch {
            payment_status: Some(PaymentStatus::Paid),
            payment_method: Some(request.payment_method),
            paid_at: Some(Utc::now()),
        };
        let matched = self.bills.update_one(&filter, patch).await?;
        if matched == 1 {
            info!(bill_id = %request.billing_id, patient = %ctx.user_id, "bill paid");
            return Ok(());
        }

        let owned = BillFilter {
            id: Some(request.billing_id),
            patient_id: Some(ctx.user_id),
            ..BillFilter::default()
        };
        match self.bills.find_one(&owned).await? {
            Some(bill) if policy::is_replayed_payment(&bill) => {
                Err(ClinicError::conflict("bill is already paid"))
            }
            _ => Err(ClinicError::forbidden(
                "bill is not owned by the acting user",
            )),
        }
    }
}

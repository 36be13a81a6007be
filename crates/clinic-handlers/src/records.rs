//! Medical record and history handling
//!
//! Doctors author both kinds; the author lists what they wrote, the patient
//! lists what is about them. Ownership is folded into the storage filter
//! derived from the acting role.

use chrono::{DateTime, Utc};
use clinic_core::domain::{MedicalHistory, MedicalRecord};
use clinic_core::{
    AuthContext, ClinicError, MedicalHistoryId, MedicalRecordId, Result, Role, UserId,
};
use clinic_policy::engine::records as policy;
use clinic_policy::ResourceKind;
use clinic_store::{
    MedicalHistoryFilter, MedicalHistoryStore, MedicalRecordFilter, MedicalRecordStore, UserStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Medical record creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    /// The patient the record is about
    pub patient_id: UserId,
    /// Kind of record, e.g. "X-Ray"
    pub record_type: String,
    /// Clinical description
    pub description: String,
    /// Location of the attached document
    pub file_url: String,
}

/// Medical history creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHistoryRequest {
    /// The patient the history is about
    pub patient_id: UserId,
    /// Diagnosed conditions, at least one
    pub conditions: Vec<String>,
    /// Supporting document locations
    pub documents: Vec<String>,
}

/// One row of a record listing
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    /// Record id
    pub record_id: MedicalRecordId,
    /// Kind of record
    pub record_type: String,
    /// Clinical description
    pub description: String,
    /// Attached document location
    pub file_url: String,
    /// Upload time
    pub uploaded_at: DateTime<Utc>,
}

/// One row of a history listing
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    /// History entry id
    pub history_id: MedicalHistoryId,
    /// Diagnosed conditions
    pub conditions: Vec<String>,
    /// Supporting document locations
    pub documents: Vec<String>,
    /// Registration time
    pub registered_at: DateTime<Utc>,
}

/// Medical record and history operations
pub struct RecordsHandler {
    records: Arc<dyn MedicalRecordStore>,
    histories: Arc<dyn MedicalHistoryStore>,
    users: Arc<dyn UserStore>,
}

impl RecordsHandler {
    /// Create a handler over the injected collaborators
    pub fn new(
        records: Arc<dyn MedicalRecordStore>,
        histories: Arc<dyn MedicalHistoryStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            records,
            histories,
            users,
        }
    }

    /// Upload a medical record authored by the acting doctor
    pub async fn create_record(
        &self,
        ctx: &AuthContext,
        request: CreateRecordRequest,
    ) -> Result<MedicalRecordId> {
        policy::may_create(ctx, ResourceKind::MedicalRecord).require()?;
        if request.record_type.is_empty() || request.description.is_empty() {
            return Err(ClinicError::invalid_input(
                "record_type and description are required",
            ));
        }
        if self.users.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicError::not_found("patient not found"));
        }

        let record = MedicalRecord::create(
            request.patient_id,
            ctx.user_id,
            request.record_type,
            request.description,
            request.file_url,
        );
        let id = self.records.insert(record).await?;
        info!(record_id = %id, doctor = %ctx.user_id, "medical record created");
        Ok(id)
    }

    /// Register a medical history entry diagnosed by the acting doctor
    pub async fn create_history(
        &self,
        ctx: &AuthContext,
        request: CreateHistoryRequest,
    ) -> Result<MedicalHistoryId> {
        policy::may_create(ctx, ResourceKind::MedicalHistory).require()?;
        if request.conditions.is_empty() {
            return Err(ClinicError::invalid_input(
                "conditions must contain at least one entry",
            ));
        }
        if self.users.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicError::not_found("patient not found"));
        }

        let history = MedicalHistory::register(
            request.patient_id,
            ctx.user_id,
            request.conditions,
            request.documents,
        );
        let id = self.histories.insert(history).await?;
        info!(history_id = %id, doctor = %ctx.user_id, "medical history registered");
        Ok(id)
    }

    /// List records on the acting user's own side
    pub async fn list_records(&self, ctx: &AuthContext) -> Result<Vec<RecordView>> {
        policy::may_list(ctx, ResourceKind::MedicalRecord).require()?;

        let filter = match ctx.role {
            Role::Doctor => MedicalRecordFilter {
                doctor_id: Some(ctx.user_id),
                ..MedicalRecordFilter::default()
            },
            _ => MedicalRecordFilter {
                patient_id: Some(ctx.user_id),
                ..MedicalRecordFilter::default()
            },
        };
        let records = self.records.find_many(&filter).await?;
        Ok(records
            .into_iter()
            .map(|r| RecordView {
                record_id: r.id,
                record_type: r.record_type,
                description: r.description,
                file_url: r.file_url,
                uploaded_at: r.uploaded_at,
            })
            .collect())
    }

    /// List history entries on the acting user's own side
    pub async fn list_histories(&self, ctx: &AuthContext) -> Result<Vec<HistoryView>> {
        policy::may_list(ctx, ResourceKind::MedicalHistory).require()?;

        let filter = match ctx.role {
            Role::Doctor => MedicalHistoryFilter {
                diagnosed_by: Some(ctx.user_id),
                ..MedicalHistoryFilter::default()
            },
            _ => MedicalHistoryFilter {
                patient_id: Some(ctx.user_id),
                ..MedicalHistoryFilter::default()
            },
        };
        let histories = self.histories.find_many(&filter).await?;
        Ok(histories
            .into_iter()
            .map(|h| HistoryView {
                history_id: h.id,
                conditions: h.conditions,
                documents: h.documents,
                registered_at: h.registered_at,
            })
            .collect())
    }
}

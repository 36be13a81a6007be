//! Collaborator traits for the document store
//!
//! Filters are conjunctions: every populated field must match. Mutation call
//! sites populate the ownership field(s) so that the check-then-write race
//! cannot occur; the count returned by `update_one`/`delete_one` is the only
//! signal a handler gets about whether the conditional matched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clinic_core::domain::{
    Appointment, AppointmentStatus, Bill, Consultation, MedicalHistory, MedicalRecord, Message,
    PaymentStatus, Prescription, TestResult, User,
};
use clinic_core::{
    AppointmentId, BillId, ConsultationId, MessageId, Result, Role, UserId,
};

/// User identity store
///
/// Read projections returned from here still carry the credential hash; it is
/// the auth and handler layers' responsibility to project through
/// `User::profile` before anything leaves the backend. `find_by_ids` exists
/// so listing handlers can batch related-entity lookups instead of issuing
/// one query per row.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, failing `Conflict` on a duplicate username
    async fn insert(&self, user: User) -> Result<UserId>;
    /// Look up a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
    /// Look up a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Batched lookup for projection building; missing ids are skipped
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>>;
    /// List users, optionally restricted to one role
    async fn find_by_role(&self, role: Option<Role>) -> Result<Vec<User>>;
}

/// Conjunctive appointment filter
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    /// Match the primary key
    pub id: Option<AppointmentId>,
    /// Match the owning patient
    pub patient_id: Option<UserId>,
    /// Match the assigned doctor
    pub doctor_id: Option<UserId>,
}

impl AppointmentFilter {
    /// Filter by primary key only
    pub fn by_id(id: AppointmentId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// All appointments owned by a patient
    pub fn for_patient(patient_id: UserId) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Self::default()
        }
    }

    /// All appointments assigned to a doctor
    pub fn for_doctor(doctor_id: UserId) -> Self {
        Self {
            doctor_id: Some(doctor_id),
            ..Self::default()
        }
    }
}

/// Field-wise appointment patch; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    /// Reassign the doctor
    pub doctor_id: Option<UserId>,
    /// Move the scheduled time
    pub appointment_date: Option<DateTime<Utc>>,
    /// Replace the notes
    pub notes: Option<String>,
    /// Change the lifecycle status
    pub status: Option<AppointmentStatus>,
}

/// Appointment collection
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a new appointment
    async fn insert(&self, appointment: Appointment) -> Result<AppointmentId>;
    /// Find one appointment matching the filter
    async fn find_one(&self, filter: &AppointmentFilter) -> Result<Option<Appointment>>;
    /// Find all appointments matching the filter
    async fn find_many(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>>;
    /// Atomically patch the single document matching the filter
    async fn update_one(&self, filter: &AppointmentFilter, patch: AppointmentPatch) -> Result<u64>;
    /// Atomically delete the single document matching the filter
    async fn delete_one(&self, filter: &AppointmentFilter) -> Result<u64>;
}

/// Prescription collection
#[async_trait]
pub trait PrescriptionStore: Send + Sync {
    /// Insert a new prescription
    async fn insert(&self, prescription: Prescription) -> Result<clinic_core::PrescriptionId>;
    /// All prescriptions owned by a patient
    async fn find_for_patient(&self, patient_id: UserId) -> Result<Vec<Prescription>>;
}

/// Conjunctive medical record filter
#[derive(Debug, Clone, Default)]
pub struct MedicalRecordFilter {
    /// Match the owning patient
    pub patient_id: Option<UserId>,
    /// Match the authoring doctor
    pub doctor_id: Option<UserId>,
}

/// Medical record collection
#[async_trait]
pub trait MedicalRecordStore: Send + Sync {
    /// Insert a new record
    async fn insert(&self, record: MedicalRecord) -> Result<clinic_core::MedicalRecordId>;
    /// Find all records matching the filter
    async fn find_many(&self, filter: &MedicalRecordFilter) -> Result<Vec<MedicalRecord>>;
}

/// Conjunctive medical history filter
#[derive(Debug, Clone, Default)]
pub struct MedicalHistoryFilter {
    /// Match the owning patient
    pub patient_id: Option<UserId>,
    /// Match the diagnosing doctor
    pub diagnosed_by: Option<UserId>,
}

/// Medical history collection
#[async_trait]
pub trait MedicalHistoryStore: Send + Sync {
    /// Insert a new history entry
    async fn insert(&self, history: MedicalHistory) -> Result<clinic_core::MedicalHistoryId>;
    /// Find all history entries matching the filter
    async fn find_many(&self, filter: &MedicalHistoryFilter) -> Result<Vec<MedicalHistory>>;
}

/// Conjunctive test result filter
#[derive(Debug, Clone, Default)]
pub struct TestResultFilter {
    /// Match the owning patient
    pub patient_id: Option<UserId>,
    /// Match the authoring doctor
    pub doctor_id: Option<UserId>,
}

/// Test result collection
#[async_trait]
pub trait TestResultStore: Send + Sync {
    /// Insert a new test result
    async fn insert(&self, result: TestResult) -> Result<clinic_core::TestResultId>;
    /// Find all test results matching the filter
    async fn find_many(&self, filter: &TestResultFilter) -> Result<Vec<TestResult>>;
}

/// Conjunctive bill filter
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    /// Match the primary key
    pub id: Option<BillId>,
    /// Match the billed patient
    pub patient_id: Option<UserId>,
    /// Match the issuing receptionist
    pub created_by: Option<UserId>,
    /// Match the payment status
    pub payment_status: Option<PaymentStatus>,
}

/// Field-wise bill patch; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct BillPatch {
    /// Change the payment status
    pub payment_status: Option<PaymentStatus>,
    /// Record the payment method
    pub payment_method: Option<String>,
    /// Record the payment time
    pub paid_at: Option<DateTime<Utc>>,
}

/// Billing collection
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Insert a new bill
    async fn insert(&self, bill: Bill) -> Result<BillId>;
    /// Find one bill matching the filter
    async fn find_one(&self, filter: &BillFilter) -> Result<Option<Bill>>;
    /// Find all bills matching the filter
    async fn find_many(&self, filter: &BillFilter) -> Result<Vec<Bill>>;
    /// Atomically patch the single document matching the filter
    async fn update_one(&self, filter: &BillFilter, patch: BillPatch) -> Result<u64>;
}

/// Message collection
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert a new message
    async fn insert(&self, message: Message) -> Result<MessageId>;
    /// Inbox for a receiver, newest first
    async fn find_inbox(&self, receiver_id: UserId) -> Result<Vec<Message>>;
}

/// Consultation collection
#[async_trait]
pub trait ConsultationStore: Send + Sync {
    /// Insert a new consultation
    async fn insert(&self, consultation: Consultation) -> Result<ConsultationId>;
    /// Look up a consultation by id
    async fn find_by_id(&self, id: ConsultationId) -> Result<Option<Consultation>>;
}

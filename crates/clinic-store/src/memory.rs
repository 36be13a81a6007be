//! In-memory document store
//!
//! Each collection is a `HashMap` behind its own `parking_lot::RwLock`, so
//! `update_one` and `delete_one` hold one write lock for the whole
//! match-and-apply step and behave like the conditional single-document
//! updates of a real document store. A single `Arc<MemoryStores>` satisfies
//! every collaborator trait.

use crate::traits::*;
use async_trait::async_trait;
use clinic_core::domain::{
    Appointment, Bill, Consultation, MedicalHistory, MedicalRecord, Message, Prescription,
    TestResult, User,
};
use clinic_core::{
    AppointmentId, BillId, ClinicError, ConsultationId, MedicalHistoryId, MedicalRecordId,
    MessageId, PrescriptionId, Result, Role, TestResultId, UserId,
};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory backend implementing every storage collaborator trait
#[derive(Default)]
pub struct MemoryStores {
    users: RwLock<HashMap<UserId, User>>,
    appointments: RwLock<HashMap<AppointmentId, Appointment>>,
    prescriptions: RwLock<HashMap<PrescriptionId, Prescription>>,
    medical_records: RwLock<HashMap<MedicalRecordId, MedicalRecord>>,
    medical_histories: RwLock<HashMap<MedicalHistoryId, MedicalHistory>>,
    test_results: RwLock<HashMap<TestResultId, TestResult>>,
    bills: RwLock<HashMap<BillId, Bill>>,
    messages: RwLock<HashMap<MessageId, Message>>,
    consultations: RwLock<HashMap<ConsultationId, Consultation>>,
}

impl MemoryStores {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }
}

fn appointment_matches(filter: &AppointmentFilter, appointment: &Appointment) -> bool {
    filter.id.map_or(true, |id| appointment.id == id)
        && filter.patient_id.map_or(true, |p| appointment.patient_id == p)
        && filter.doctor_id.map_or(true, |d| appointment.doctor_id == d)
}

fn bill_matches(filter: &BillFilter, bill: &Bill) -> bool {
    filter.id.map_or(true, |id| bill.id == id)
        && filter.patient_id.map_or(true, |p| bill.patient_id == p)
        && filter.created_by.map_or(true, |c| bill.created_by == Some(c))
        && filter
            .payment_status
            .map_or(true, |s| bill.payment_status == s)
}

#[async_trait]
impl UserStore for MemoryStores {
    async fn insert(&self, user: User) -> Result<UserId> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == user.username) {
            return Err(ClinicError::conflict("username already exists"));
        }
        let id = user.id;
        users.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        let users = self.users.read();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_role(&self, role: Option<Role>) -> Result<Vec<User>> {
        Ok(self
            .users
            .read()
            .values()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStores {
    async fn insert(&self, appointment: Appointment) -> Result<AppointmentId> {
        let id = appointment.id;
        self.appointments.write().insert(id, appointment);
        Ok(id)
    }

    async fn find_one(&self, filter: &AppointmentFilter) -> Result<Option<Appointment>> {
        Ok(self
            .appointments
            .read()
            .values()
            .find(|a| appointment_matches(filter, a))
            .cloned())
    }

    async fn find_many(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let mut matched: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| appointment_matches(filter, a))
            .cloned()
            .collect();
        matched.sort_by_key(|a| a.appointment_date);
        Ok(matched)
    }

    async fn update_one(&self, filter: &AppointmentFilter, patch: AppointmentPatch) -> Result<u64> {
        let mut appointments = self.appointments.write();
        let Some(appointment) = appointments
            .values_mut()
            .find(|a| appointment_matches(filter, a))
        else {
            return Ok(0);
        };
        if let Some(doctor_id) = patch.doctor_id {
            appointment.doctor_id = doctor_id;
        }
        if let Some(date) = patch.appointment_date {
            appointment.appointment_date = date;
        }
        if let Some(notes) = patch.notes {
            appointment.notes = notes;
        }
        if let Some(status) = patch.status {
            appointment.status = status;
        }
        Ok(1)
    }

    async fn delete_one(&self, filter: &AppointmentFilter) -> Result<u64> {
        let mut appointments = self.appointments.write();
        let id = appointments
            .values()
            .find(|a| appointment_matches(filter, a))
            .map(|a| a.id);
        match id {
            Some(id) => {
                appointments.remove(&id);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl PrescriptionStore for MemoryStores {
    async fn insert(&self, prescription: Prescription) -> Result<PrescriptionId> {
        let id = prescription.id;
        self.prescriptions.write().insert(id, prescription);
        Ok(id)
    }

    async fn find_for_patient(&self, patient_id: UserId) -> Result<Vec<Prescription>> {
        let mut matched: Vec<Prescription> = self
            .prescriptions
            .read()
            .values()
            .filter(|p| p.patient_id == patient_id)
            .cloned()
            .collect();
        matched.sort_by_key(|p| std::cmp::Reverse(p.prescribed_date));
        Ok(matched)
    }
}

#[async_trait]
impl MedicalRecordStore for MemoryStores {
    async fn insert(&self, record: MedicalRecord) -> Result<MedicalRecordId> {
        let id = record.id;
        self.medical_records.write().insert(id, record);
        Ok(id)
    }

    async fn find_many(&self, filter: &MedicalRecordFilter) -> Result<Vec<MedicalRecord>> {
        let mut matched: Vec<MedicalRecord> = self
            .medical_records
            .read()
            .values()
            .filter(|r| {
                filter.patient_id.map_or(true, |p| r.patient_id == p)
                    && filter.doctor_id.map_or(true, |d| r.doctor_id == d)
            })
            .cloned()
            .collect();
        matched.sort_by_key(|r| std::cmp::Reverse(r.uploaded_at));
        Ok(matched)
    }
}

#[async_trait]
impl MedicalHistoryStore for MemoryStores {
    async fn insert(&self, history: MedicalHistory) -> Result<MedicalHistoryId> {
        let id = history.id;
        self.medical_histories.write().insert(id, history);
        Ok(id)
    }

    async fn find_many(&self, filter: &MedicalHistoryFilter) -> Result<Vec<MedicalHistory>> {
        let mut matched: Vec<MedicalHistory> = self
            .medical_histories
            .read()
            .values()
            .filter(|h| {
                filter.patient_id.map_or(true, |p| h.patient_id == p)
                    && filter.diagnosed_by.map_or(true, |d| h.diagnosed_by == d)
            })
            .cloned()
            .collect();
        matched.sort_by_key(|h| std::cmp::Reverse(h.registered_at));
        Ok(matched)
    }
}

#[async_trait]
impl TestResultStore for MemoryStores {
    async fn insert(&self, result: TestResult) -> Result<TestResultId> {
        let id = result.id;
        self.test_results.write().insert(id, result);
        Ok(id)
    }

    async fn find_many(&self, filter: &TestResultFilter) -> Result<Vec<TestResult>> {
        let mut matched: Vec<TestResult> = self
            .test_results
            .read()
            .values()
            .filter(|t| {
                filter.patient_id.map_or(true, |p| t.patient_id == p)
                    && filter.doctor_id.map_or(true, |d| t.doctor_id == d)
            })
            .cloned()
            .collect();
        matched.sort_by_key(|t| std::cmp::Reverse(t.test_date));
        Ok(matched)
    }
}

#[async_trait]
impl BillStore for MemoryStores {
    async fn insert(&self, bill: Bill) -> Result<BillId> {
        let id = bill.id;
        self.bills.write().insert(id, bill);
        Ok(id)
    }

    async fn find_one(&self, filter: &BillFilter) -> Result<Option<Bill>> {
        Ok(self
            .bills
            .read()
            .values()
            .find(|b| bill_matches(filter, b))
            .cloned())
    }

    async fn find_many(&self, filter: &BillFilter) -> Result<Vec<Bill>> {
        let mut matched: Vec<Bill> = self
            .bills
            .read()
            .values()
            .filter(|b| bill_matches(filter, b))
            .cloned()
            .collect();
        matched.sort_by_key(|b| std::cmp::Reverse(b.created_at));
        Ok(matched)
    }

    async fn update_one(&self, filter: &BillFilter, patch: BillPatch) -> Result<u64> {
        let mut bills = self.bills.write();
        let Some(bill) = bills.values_mut().find(|b| bill_matches(filter, b)) else {
            return Ok(0);
        };
        if let Some(status) = patch.payment_status {
            bill.payment_status = status;
        }
        if let Some(method) = patch.payment_method {
            bill.payment_method = Some(method);
        }
        if let Some(paid_at) = patch.paid_at {
            bill.paid_at = Some(paid_at);
        }
        Ok(1)
    }
}

#[async_trait]
impl MessageStore for MemoryStores {
    async fn insert(&self, message: Message) -> Result<MessageId> {
        let id = message.id;
        self.messages.write().insert(id, message);
        Ok(id)
    }

    async fn find_inbox(&self, receiver_id: UserId) -> Result<Vec<Message>> {
        let mut inbox: Vec<Message> = self
            .messages
            .read()
            .values()
            .filter(|m| m.receiver_id == receiver_id)
            .cloned()
            .collect();
        inbox.sort_by_key(|m| std::cmp::Reverse(m.sent_at));
        Ok(inbox)
    }
}

#[async_trait]
impl ConsultationStore for MemoryStores {
    async fn insert(&self, consultation: Consultation) -> Result<ConsultationId> {
        let id = consultation.id;
        self.consultations.write().insert(id, consultation);
        Ok(id)
    }

    async fn find_by_id(&self, id: ConsultationId) -> Result<Option<Consultation>> {
        Ok(self.consultations.read().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clinic_core::domain::{Contact, Gender, PaymentStatus, PersonalDetails};

    fn user(username: &str, role: Role) -> User {
        User {
            id: UserId::new(),
            username: username.into(),
            role,
            personal_details: PersonalDetails {
                first_name: "Test".into(),
                last_name: "User".into(),
                age: 40,
                gender: Gender::Other,
            },
            contact: Contact {
                email: format!("{username}@example.com"),
                phone: vec![],
            },
            password_hash: "hash".into(),
            specialization: None,
            license_number: None,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let stores = MemoryStores::new();
        UserStore::insert(&stores, user("alice", Role::Patient))
            .await
            .unwrap();
        let err = UserStore::insert(&stores, user("alice", Role::Doctor))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn find_by_ids_skips_missing() {
        let stores = MemoryStores::new();
        let alice = user("alice", Role::Patient);
        let alice_id = alice.id;
        UserStore::insert(&stores, alice).await.unwrap();

        let found = stores.find_by_ids(&[alice_id, UserId::new()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, alice_id);
    }

    #[tokio::test]
    async fn conditional_update_respects_the_ownership_filter() {
        let stores = MemoryStores::new();
        let patient = UserId::new();
        let other = UserId::new();
        let bill = Bill::issue(patient, None, 50.0, vec!["consult".into()]);
        let bill_id = BillStore::insert(&stores, bill).await.unwrap();

        let wrong_owner = BillFilter {
            id: Some(bill_id),
            patient_id: Some(other),
            payment_status: Some(PaymentStatus::Unpaid),
            ..BillFilter::default()
        };
        let patch = BillPatch {
            payment_status: Some(PaymentStatus::Paid),
            ..BillPatch::default()
        };
        assert_eq!(BillStore::update_one(&stores, &wrong_owner, patch.clone()).await.unwrap(), 0);

        let right_owner = BillFilter {
            id: Some(bill_id),
            patient_id: Some(patient),
            payment_status: Some(PaymentStatus::Unpaid),
            ..BillFilter::default()
        };
        assert_eq!(BillStore::update_one(&stores, &right_owner, patch.clone()).await.unwrap(), 1);
        // The status condition no longer matches once paid.
        assert_eq!(BillStore::update_one(&stores, &right_owner, patch).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_one_is_scoped_by_ownership() {
        let stores = MemoryStores::new();
        let patient = UserId::new();
        let appt = Appointment::book(patient, UserId::new(), Utc::now(), None);
        let appt_id = AppointmentStore::insert(&stores, appt).await.unwrap();

        let foreign = AppointmentFilter {
            id: Some(appt_id),
            patient_id: Some(UserId::new()),
            ..AppointmentFilter::default()
        };
        assert_eq!(stores.delete_one(&foreign).await.unwrap(), 0);

        let owned = AppointmentFilter {
            id: Some(appt_id),
            patient_id: Some(patient),
            ..AppointmentFilter::default()
        };
        assert_eq!(stores.delete_one(&owned).await.unwrap(), 1);
        assert!(AppointmentStore::find_one(&stores, &AppointmentFilter::by_id(appt_id)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inbox_is_newest_first() {
        let stores = MemoryStores::new();
        let receiver = UserId::new();
        let mut first = Message::send(UserId::new(), receiver, "first".into());
        first.sent_at = Utc::now() - chrono::Duration::minutes(5);
        let second = Message::send(UserId::new(), receiver, "second".into());
        MessageStore::insert(&stores, first).await.unwrap();
        MessageStore::insert(&stores, second).await.unwrap();

        let inbox = stores.find_inbox(receiver).await.unwrap();
        assert_eq!(inbox[0].body, "second");
        assert_eq!(inbox[1].body, "first");
    }
}

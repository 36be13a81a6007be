//! Per-resource ownership and participant predicates
//!
//! Each function evaluates the role gate first, then refines against the
//! resource snapshot. All inputs are plain values; callers fetch snapshots
//! through the storage layer and pass them in.

use crate::decision::{Decision, DenyReason};
use crate::rules::{role_gate, AccessKind, ResourceKind};
use clinic_core::domain::{Appointment, Bill, Consultation, PaymentStatus};
use clinic_core::{AuthContext, Role};

/// Appointment policy
pub mod appointment {
    use super::*;

    /// Which fields an update wants to touch
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ChangeSet {
        /// Reassign the doctor
        pub doctor: bool,
        /// Move the scheduled time
        pub date: bool,
        /// Edit the notes
        pub notes: bool,
    }

    /// May the actor book an appointment for `patient_id`?
    ///
    /// Patients book for themselves only.
    pub fn may_book(ctx: &AuthContext, patient_id: clinic_core::UserId) -> Decision {
        match role_gate(ResourceKind::Appointment, AccessKind::Create, ctx.role) {
            Decision::Allow => Decision::allow_if(ctx.user_id == patient_id, DenyReason::NotOwner),
            deny => deny,
        }
    }

    /// May the actor read this appointment?
    pub fn may_read(ctx: &AuthContext, appointment: &Appointment) -> Decision {
        match role_gate(ResourceKind::Appointment, AccessKind::Read, ctx.role) {
            Decision::Allow => {
                let referenced = match ctx.role {
                    Role::Patient => appointment.patient_id == ctx.user_id,
                    Role::Doctor => appointment.doctor_id == ctx.user_id,
                    _ => false,
                };
                Decision::allow_if(referenced, DenyReason::NotParticipant)
            }
            deny => deny,
        }
    }

    /// May a holder of `role` touch exactly these fields?
    ///
    /// The patient may move the date and reassign the doctor; the doctor may
    /// move the date and edit the notes. Pure in the role so update handlers
    /// can check it before issuing the ownership-scoped conditional write.
    pub fn fields_permitted(role: Role, changes: ChangeSet) -> Decision {
        match role_gate(ResourceKind::Appointment, AccessKind::Update, role) {
            Decision::Allow => {}
            deny => return deny,
        }
        let permitted = match role {
            Role::Patient => !changes.notes,
            Role::Doctor => !changes.doctor,
            _ => false,
        };
        Decision::allow_if(permitted, DenyReason::WrongRole)
    }

    /// May the actor apply these changes to this appointment?
    ///
    /// Field rights per [`fields_permitted`], and the actor must be the
    /// referenced participant.
    pub fn may_update(ctx: &AuthContext, appointment: &Appointment, changes: ChangeSet) -> Decision {
        let is_participant = match ctx.role {
            Role::Patient => appointment.patient_id == ctx.user_id,
            Role::Doctor => appointment.doctor_id == ctx.user_id,
            _ => false,
        };
        match fields_permitted(ctx.role, changes) {
            Decision::Allow => {}
            deny => return deny,
        }
        Decision::allow_if(is_participant, DenyReason::NotParticipant)
    }

    /// May the actor cancel (delete) the appointment owned by `patient_id`?
    pub fn may_cancel(ctx: &AuthContext, patient_id: clinic_core::UserId) -> Decision {
        match role_gate(ResourceKind::Appointment, AccessKind::Delete, ctx.role) {
            Decision::Allow => Decision::allow_if(ctx.user_id == patient_id, DenyReason::NotOwner),
            deny => deny,
        }
    }
}

/// Prescription policy
pub mod prescription {
    use super::*;

    /// May the actor write prescriptions?
    pub fn may_create(ctx: &AuthContext) -> Decision {
        role_gate(ResourceKind::Prescription, AccessKind::Create, ctx.role)
    }

    /// May the actor list the prescriptions owned by `patient_id`?
    pub fn may_list(ctx: &AuthContext, patient_id: clinic_core::UserId) -> Decision {
        match role_gate(ResourceKind::Prescription, AccessKind::Read, ctx.role) {
            Decision::Allow => Decision::allow_if(ctx.user_id == patient_id, DenyReason::NotOwner),
            deny => deny,
        }
    }
}

/// Medical record and history policy
pub mod records {
    use super::*;

    /// May the actor author records or histories?
    pub fn may_create(ctx: &AuthContext, kind: ResourceKind) -> Decision {
        role_gate(kind, AccessKind::Create, ctx.role)
    }

    /// May the actor list documents of this kind?
    ///
    /// Both roles see their own side: doctors list what they authored,
    /// patients list what is about them. The ownership predicate is folded
    /// into the storage filter; the gate here is role-only.
    pub fn may_list(ctx: &AuthContext, kind: ResourceKind) -> Decision {
        role_gate(kind, AccessKind::Read, ctx.role)
    }
}

/// Test result policy
pub mod test_result {
    use super::*;

    /// May the actor post test results?
    pub fn may_create(ctx: &AuthContext) -> Decision {
        role_gate(ResourceKind::TestResult, AccessKind::Create, ctx.role)
    }

    /// May the actor list test results?
    ///
    /// Ownership is folded into the storage filter (doctor: authored,
    /// patient: own).
    pub fn may_list(ctx: &AuthContext) -> Decision {
        role_gate(ResourceKind::TestResult, AccessKind::Read, ctx.role)
    }
}

/// Billing policy
pub mod bill {
    use super::*;

    /// May the actor issue bills?
    pub fn may_create(ctx: &AuthContext) -> Decision {
        role_gate(ResourceKind::Bill, AccessKind::Create, ctx.role)
    }

    /// May the actor see this bill?
    pub fn may_view(ctx: &AuthContext, bill: &Bill) -> Decision {
        match role_gate(ResourceKind::Bill, AccessKind::Read, ctx.role) {
            Decision::Allow => {}
            deny => return deny,
        }
        let visible = match ctx.role {
            Role::Admin => true,
            Role::Receptionist => bill.created_by == Some(ctx.user_id),
            Role::Patient => bill.patient_id == ctx.user_id,
            _ => false,
        };
        Decision::allow_if(visible, DenyReason::NotOwner)
    }

    /// May the actor transition this bill to `Paid`?
    ///
    /// Patients only, on their own bill. The replay case (already paid) is
    /// the handler's `Conflict`, not a policy denial.
    pub fn may_pay(ctx: &AuthContext, bill: &Bill) -> Decision {
        match role_gate(ResourceKind::Bill, AccessKind::Update, ctx.role) {
            Decision::Allow => {
                Decision::allow_if(bill.patient_id == ctx.user_id, DenyReason::NotOwner)
            }
            deny => deny,
        }
    }

    /// True if a pay attempt on this bill is a replay
    pub fn is_replayed_payment(bill: &Bill) -> bool {
        bill.payment_status == PaymentStatus::Paid
    }
}

/// Messaging policy
pub mod message {
    use super::*;

    /// The fixed role-pair allow-list for sending messages
    pub fn pair_allowed(sender: Role, receiver: Role) -> bool {
        matches!(
            (sender, receiver),
            (Role::Patient, Role::Doctor)
                | (Role::Doctor, Role::Patient)
                | (Role::Doctor, Role::Admin)
                | (Role::Doctor, Role::Receptionist)
                | (Role::Admin, Role::Doctor)
                | (Role::Admin, Role::Receptionist)
                | (Role::Receptionist, Role::Admin)
                | (Role::Receptionist, Role::Doctor)
        )
    }

    /// May the actor send a message to a user holding `receiver_role`?
    pub fn may_send(ctx: &AuthContext, receiver_role: Role) -> Decision {
        match role_gate(ResourceKind::Message, AccessKind::Create, ctx.role) {
            Decision::Allow => {
                Decision::allow_if(pair_allowed(ctx.role, receiver_role), DenyReason::WrongRole)
            }
            deny => deny,
        }
    }

    /// May the actor read the inbox addressed to `receiver_id`?
    pub fn may_read_inbox(ctx: &AuthContext, receiver_id: clinic_core::UserId) -> Decision {
        match role_gate(ResourceKind::Message, AccessKind::Read, ctx.role) {
            Decision::Allow => Decision::allow_if(ctx.user_id == receiver_id, DenyReason::NotOwner),
            deny => deny,
        }
    }
}

/// Consultation policy
pub mod consultation {
    use super::*;

    /// May the actor upload meeting links?
    pub fn may_create(ctx: &AuthContext) -> Decision {
        role_gate(ResourceKind::Consultation, AccessKind::Create, ctx.role)
    }

    /// May the actor view this consultation?
    pub fn may_view(ctx: &AuthContext, consultation: &Consultation) -> Decision {
        match role_gate(ResourceKind::Consultation, AccessKind::Read, ctx.role) {
            Decision::Allow => {
                let participant = consultation.doctor_id == ctx.user_id
                    || consultation.patient_id == ctx.user_id;
                Decision::allow_if(participant, DenyReason::NotParticipant)
            }
            deny => deny,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clinic_core::domain::AppointmentStatus;
    use clinic_core::UserId;

    fn ctx(role: Role) -> AuthContext {
        AuthContext::new(UserId::new(), role)
    }

    fn appointment_of(patient_id: UserId, doctor_id: UserId) -> Appointment {
        Appointment {
            id: clinic_core::AppointmentId::new(),
            patient_id,
            doctor_id,
            appointment_date: Utc::now(),
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    #[test]
    fn patient_books_only_for_self() {
        let patient = ctx(Role::Patient);
        assert!(appointment::may_book(&patient, patient.user_id).is_allowed());
        assert_eq!(
            appointment::may_book(&patient, UserId::new()),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert_eq!(
            appointment::may_book(&ctx(Role::Doctor), UserId::new()),
            Decision::Deny(DenyReason::WrongRole)
        );
    }

    #[test]
    fn appointment_update_rights_are_asymmetric() {
        let patient = ctx(Role::Patient);
        let doctor = ctx(Role::Doctor);
        let appt = appointment_of(patient.user_id, doctor.user_id);

        let reassign = appointment::ChangeSet {
            doctor: true,
            date: true,
            notes: false,
        };
        let annotate = appointment::ChangeSet {
            doctor: false,
            date: true,
            notes: true,
        };

        assert!(appointment::may_update(&patient, &appt, reassign).is_allowed());
        assert_eq!(
            appointment::may_update(&patient, &appt, annotate),
            Decision::Deny(DenyReason::WrongRole)
        );
        assert!(appointment::may_update(&doctor, &appt, annotate).is_allowed());
        assert_eq!(
            appointment::may_update(&doctor, &appt, reassign),
            Decision::Deny(DenyReason::WrongRole)
        );
    }

    #[test]
    fn unrelated_participants_cannot_touch_an_appointment() {
        let patient = ctx(Role::Patient);
        let appt = appointment_of(UserId::new(), UserId::new());
        assert_eq!(
            appointment::may_read(&patient, &appt),
            Decision::Deny(DenyReason::NotParticipant)
        );
        assert_eq!(
            appointment::may_update(&patient, &appt, appointment::ChangeSet::default()),
            Decision::Deny(DenyReason::NotParticipant)
        );
    }

    #[test]
    fn only_the_owning_patient_cancels() {
        let patient = ctx(Role::Patient);
        assert!(appointment::may_cancel(&patient, patient.user_id).is_allowed());
        assert_eq!(
            appointment::may_cancel(&patient, UserId::new()),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert_eq!(
            appointment::may_cancel(&ctx(Role::Doctor), UserId::new()),
            Decision::Deny(DenyReason::WrongRole)
        );
    }

    #[test]
    fn bill_visibility_by_role() {
        let patient = ctx(Role::Patient);
        let receptionist = ctx(Role::Receptionist);
        let bill = Bill::issue(patient.user_id, Some(receptionist.user_id), 120.0, vec![]);

        assert!(bill::may_view(&ctx(Role::Admin), &bill).is_allowed());
        assert!(bill::may_view(&receptionist, &bill).is_allowed());
        assert!(bill::may_view(&patient, &bill).is_allowed());
        assert_eq!(
            bill::may_view(&ctx(Role::Receptionist), &bill),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert_eq!(
            bill::may_view(&ctx(Role::Nurse), &bill),
            Decision::Deny(DenyReason::WrongRole)
        );
    }

    #[test]
    fn only_the_billed_patient_pays() {
        let patient = ctx(Role::Patient);
        let bill = Bill::issue(patient.user_id, None, 80.0, vec![]);
        assert!(bill::may_pay(&patient, &bill).is_allowed());
        assert_eq!(
            bill::may_pay(&ctx(Role::Patient), &bill),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert_eq!(
            bill::may_pay(&ctx(Role::Admin), &bill),
            Decision::Deny(DenyReason::WrongRole)
        );
    }

    #[test]
    fn message_allow_list_matches_the_table() {
        let allowed = [
            (Role::Patient, Role::Doctor),
            (Role::Doctor, Role::Patient),
            (Role::Doctor, Role::Admin),
            (Role::Doctor, Role::Receptionist),
            (Role::Admin, Role::Doctor),
            (Role::Admin, Role::Receptionist),
            (Role::Receptionist, Role::Admin),
            (Role::Receptionist, Role::Doctor),
        ];
        for sender in Role::ALL {
            for receiver in Role::ALL {
                assert_eq!(
                    message::pair_allowed(sender, receiver),
                    allowed.contains(&(sender, receiver)),
                    "{sender} -> {receiver}"
                );
            }
        }
    }

    #[test]
    fn receptionist_cannot_message_patient() {
        assert_eq!(
            message::may_send(&ctx(Role::Receptionist), Role::Patient),
            Decision::Deny(DenyReason::WrongRole)
        );
        assert!(message::may_send(&ctx(Role::Receptionist), Role::Admin).is_allowed());
    }

    #[test]
    fn consultation_is_participant_only() {
        let doctor = ctx(Role::Doctor);
        let patient = ctx(Role::Patient);
        let consultation = Consultation::schedule(
            doctor.user_id,
            patient.user_id,
            "https://meet.example/room".into(),
            Utc::now(),
        );
        assert!(consultation::may_view(&doctor, &consultation).is_allowed());
        assert!(consultation::may_view(&patient, &consultation).is_allowed());
        assert_eq!(
            consultation::may_view(&ctx(Role::Patient), &consultation),
            Decision::Deny(DenyReason::NotParticipant)
        );
        assert_eq!(
            consultation::may_view(&ctx(Role::Nurse), &consultation),
            Decision::Deny(DenyReason::WrongRole)
        );
    }
}

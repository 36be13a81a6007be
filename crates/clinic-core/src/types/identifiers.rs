//! Core identifier types used across the clinic backend
//!
//! Each entity kind gets its own uuid newtype so that a doctor id can never
//! be passed where a bill id is expected. Identifiers are opaque to callers;
//! the document store treats them as primary keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from a UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID
            pub fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

entity_id!(
    /// User identifier, the subject of every credential token
    UserId,
    "user"
);

entity_id!(
    /// Appointment identifier
    AppointmentId,
    "appointment"
);

entity_id!(
    /// Prescription identifier
    PrescriptionId,
    "prescription"
);

entity_id!(
    /// Medical record identifier
    MedicalRecordId,
    "record"
);

entity_id!(
    /// Medical history identifier
    MedicalHistoryId,
    "history"
);

entity_id!(
    /// Test result identifier
    TestResultId,
    "test-result"
);

entity_id!(
    /// Bill identifier
    BillId,
    "bill"
);

entity_id!(
    /// Message identifier
    MessageId,
    "message"
);

entity_id!(
    /// Consultation identifier
    ConsultationId,
    "consultation"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn id_display_and_parse_round_trip() {
        let id = AppointmentId::new();
        assert!(id.to_string().starts_with("appointment-"));

        let parsed: UserId = id.uuid().to_string().parse().unwrap();
        assert_eq!(parsed.uuid(), id.uuid());
    }
}

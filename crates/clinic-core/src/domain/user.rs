//! User documents and their public projection

use crate::types::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Gender as recorded in personal details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
}

/// Name, age, and gender block embedded in every user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Age in years
    pub age: u32,
    /// Recorded gender
    pub gender: Gender,
}

impl PersonalDetails {
    /// "First Last" display form used in projections
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Contact block embedded in every user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address, unique per user
    pub email: String,
    /// One or more phone numbers
    pub phone: Vec<String>,
}

/// A registered user
///
/// `password_hash` is the stored credential hash. It stays inside the auth
/// layer: every projection leaving the backend goes through [`UserProfile`],
/// which does not have the field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// Authorization role, immutable for the lifetime of a request
    pub role: Role,
    /// Name, age, gender
    pub personal_details: PersonalDetails,
    /// Email and phone numbers
    pub contact: Contact,
    /// Credential hash produced by the password-hasher collaborator
    pub password_hash: String,
    /// Medical specialization (doctors)
    pub specialization: Option<String>,
    /// License number (doctors)
    pub license_number: Option<String>,
}

impl User {
    /// Public projection, with the credential hash structurally absent
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id,
            username: self.username.clone(),
            role: self.role,
            personal_details: self.personal_details.clone(),
            contact: self.contact.clone(),
            specialization: self.specialization.clone(),
        }
    }
}

/// What the outside world sees of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Primary key
    pub user_id: UserId,
    /// Unique login name
    pub username: String,
    /// Authorization role
    pub role: Role,
    /// Name, age, gender
    pub personal_details: PersonalDetails,
    /// Email and phone numbers
    pub contact: Contact,
    /// Medical specialization (doctors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(),
            username: "jdoe".into(),
            role: Role::Patient,
            personal_details: PersonalDetails {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                age: 34,
                gender: Gender::Female,
            },
            contact: Contact {
                email: "jane@example.com".into(),
                phone: vec!["+100000000".into()],
            },
            password_hash: "hashed$secret".into(),
            specialization: None,
            license_number: None,
        }
    }

    #[test]
    fn profile_never_contains_the_credential_hash() {
        let json = serde_json::to_value(sample_user().profile()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "jdoe");
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(sample_user().personal_details.full_name(), "Jane Doe");
    }
}

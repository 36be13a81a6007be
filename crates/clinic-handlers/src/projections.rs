//! Related-entity projection helpers
//!
//! Listing responses attach small slices of related users (names,
//! specialization, demographics). The lookups are batched: collect every
//! referenced id, fetch once, index by id.

use clinic_core::domain::User;
use clinic_core::{Result, UserId};
use clinic_store::UserStore;
use serde::Serialize;
use std::collections::HashMap;

/// Fetch a deduplicated set of users and index them by id
pub async fn user_map(
    users: &dyn UserStore,
    ids: impl IntoIterator<Item = UserId>,
) -> Result<HashMap<UserId, User>> {
    let mut unique: Vec<UserId> = ids.into_iter().collect();
    unique.sort();
    unique.dedup();
    let fetched = users.find_by_ids(&unique).await?;
    Ok(fetched.into_iter().map(|u| (u.id, u)).collect())
}

/// Name and specialization slice of a doctor
#[derive(Debug, Clone, Serialize)]
pub struct DoctorDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Specialization, empty when not recorded
    pub specialization: String,
}

impl DoctorDetails {
    /// Project from a user document
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.personal_details.first_name.clone(),
            last_name: user.personal_details.last_name.clone(),
            specialization: user.specialization.clone().unwrap_or_default(),
        }
    }
}

/// Demographic slice of a patient
#[derive(Debug, Clone, Serialize)]
pub struct PatientDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Age in years
    pub age: u32,
    /// Recorded gender
    pub gender: clinic_core::domain::Gender,
}

impl PatientDetails {
    /// Project from a user document
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.personal_details.first_name.clone(),
            last_name: user.personal_details.last_name.clone(),
            age: user.personal_details.age,
            gender: user.personal_details.gender,
        }
    }
}

/// "Dr. First Last" attribution line
pub fn doctor_attribution(user: &User) -> String {
    format!(
        "Dr. {} {}",
        user.personal_details.first_name, user.personal_details.last_name
    )
}

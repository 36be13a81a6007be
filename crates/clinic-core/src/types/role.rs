//! User roles
//!
//! The role assigned at registration is the authorization role for every
//! request the user makes; it is never re-derived mid-request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five clinic roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Receives care; owns appointments, prescriptions, records, bills
    Patient,
    /// Provides care; authors prescriptions, records, results, consultations
    Doctor,
    /// Full billing visibility
    Admin,
    /// Clinical support staff
    Nurse,
    /// Front desk; creates bills
    Receptionist,
}

impl Role {
    /// All roles, in a fixed order (used by exhaustive policy tests)
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::Doctor,
        Role::Admin,
        Role::Nurse,
        Role::Receptionist,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
            Role::Nurse => "nurse",
            Role::Receptionist => "receptionist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            "nurse" => Ok(Role::Nurse),
            "receptionist" => Ok(Role::Receptionist),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

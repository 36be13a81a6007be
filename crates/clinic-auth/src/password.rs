//! Password-hashing collaborator seam
//!
//! The actual hash primitive (bcrypt-equivalent) lives outside this backend;
//! registration and login only ever see it through this trait. `verify` gets
//! the candidate password and the stored hash and must not leak timing or
//! detail about why a mismatch occurred.

use clinic_core::Result;

/// External password-hash primitive
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, password: &str) -> Result<String>;
    /// Check a candidate password against a stored hash
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool>;
}

/// Reversible stand-in hasher for tests
///
/// Prefixes instead of hashing. Never wire this into a deployment.
#[derive(Debug, Clone, Default)]
pub struct StubHasher;

impl PasswordHasher for StubHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("stub${password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        Ok(stored_hash == format!("stub${password}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_hasher_round_trips() {
        let hasher = StubHasher;
        let hash = hasher.hash("hunter2").unwrap();
        assert!(hasher.verify("hunter2", &hash).unwrap());
        assert!(!hasher.verify("hunter3", &hash).unwrap());
    }
}

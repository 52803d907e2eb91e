//! One-way password hashing.
//!
//! # Design Decisions
//! - bcrypt with a configurable cost factor (default 10)
//! - A fresh salt per call: hashing the same secret twice yields
//!   different digests
//! - CPU-bound; callers run it on the blocking pool and hold no lock
//!   across it

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task aborted")]
    TaskAborted,
}

/// Stateless bcrypt wrapper carrying the configured cost.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a secret with a freshly generated salt.
    pub fn hash(&self, secret: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(secret, self.cost)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test fast; output shape is cost-independent.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_same_secret_different_digests() {
        let hasher = CredentialHasher::new(TEST_COST);
        let a = hasher.hash("hunter2").unwrap();
        let b = hasher.hash("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_shape() {
        let hasher = CredentialHasher::new(TEST_COST);
        let digest = hasher.hash("hunter2").unwrap();
        assert_eq!(digest.len(), 60);
        assert!(digest.starts_with("$2"));
        // The digest still verifies against the plaintext.
        assert!(bcrypt::verify("hunter2", &digest).unwrap());
        assert!(!bcrypt::verify("hunter3", &digest).unwrap());
    }
}

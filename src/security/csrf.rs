//! Anti-forgery token issuance and verification.
//!
//! # Responsibilities
//! - Mint an unguessable token bound to a client session
//! - Verify a presented token against the session's current binding
//! - Expire bindings after a configurable TTL
//!
//! # Design Decisions
//! - Re-issuing supersedes the previous binding; only the latest
//!   token for a session verifies
//! - Comparison uses `subtle::ConstantTimeEq`, never `==`
//! - Bindings live in memory only; a restart invalidates all tokens

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::distributions::Alphanumeric;
use rand::Rng;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Length of the minted token in alphanumeric characters.
/// 48 chars ≈ 285 bits of randomness.
const TOKEN_LEN: usize = 48;

struct IssuedToken {
    value: String,
    issued_at: Instant,
}

/// Process-wide owner of session-to-token bindings.
pub struct TokenIssuer {
    bindings: Mutex<HashMap<Uuid, IssuedToken>>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Mint a fresh token for the session, superseding any prior one.
    ///
    /// Expired bindings for other sessions are pruned on the way so the
    /// table stays bounded by the live session count.
    pub fn issue(&self, session: Uuid) -> String {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let mut bindings = self.bindings.lock().expect("token binding mutex poisoned");
        bindings.retain(|_, t| t.issued_at.elapsed() <= self.ttl);
        bindings.insert(
            session,
            IssuedToken {
                value: value.clone(),
                issued_at: Instant::now(),
            },
        );
        value
    }

    /// Check a presented token against the session's current binding.
    ///
    /// Unknown session, expired binding and mismatched value are the
    /// same outcome: invalid. Read-only; never mutates the binding.
    pub fn verify(&self, session: Uuid, presented: &str) -> bool {
        let bindings = self.bindings.lock().expect("token binding mutex poisoned");
        let Some(bound) = bindings.get(&session) else {
            return false;
        };
        if bound.issued_at.elapsed() > self.ttl {
            return false;
        }
        bound.value.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

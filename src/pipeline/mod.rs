//! Submission handling pipeline.
//!
//! # Data Flow
//! ```text
//! POST /submit
//!     → rate limit (per origin ip)
//!     → token verify (session + X-CSRF-Token)
//!     → validation.rs (presence / type / length)
//!     → bcrypt hash (blocking pool, no lock held)
//!     → storage append (serialized critical section)
//! ```
//!
//! # Design Decisions
//! - Fail-fast: the first failing stage fixes the rejection reason and
//!   no later stage runs — no partial persistence
//! - The plaintext secret never reaches a log or a response

pub mod validation;

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::config::IntakeConfig;
use crate::security::hashing::HashError;
use crate::security::{CredentialHasher, RateLimiter, TokenIssuer};
use crate::storage::{RecordStore, StoreError, SubmissionRecord};
use validation::{validate, ValidationError};

pub use validation::MAX_FIELD_LEN;

/// Why a submission was rejected; fixes both status code and message.
#[derive(Debug, Error)]
pub enum RejectReason {
    #[error("Too many requests, please try again later.")]
    RateLimited,

    #[error("Invalid CSRF token")]
    InvalidToken,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("password hashing failed")]
    Hashing(#[from] HashError),

    #[error("record append failed")]
    Store(#[from] StoreError),
}

impl RejectReason {
    /// Metric label for this rejection.
    pub fn outcome(&self) -> &'static str {
        match self {
            RejectReason::RateLimited => "rate_limited",
            RejectReason::InvalidToken => "invalid_token",
            RejectReason::Validation(_) => "validation",
            RejectReason::Hashing(_) => "hashing",
            RejectReason::Store(_) => "store",
        }
    }
}

/// Composes the per-request stages around the process-wide state.
pub struct SubmissionPipeline {
    rate_limiter: RateLimiter,
    tokens: TokenIssuer,
    hasher: CredentialHasher,
    store: RecordStore,
}

impl SubmissionPipeline {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            rate_limiter: RateLimiter::new(
                Duration::from_secs(config.rate_limit.window_secs),
                config.rate_limit.max_requests,
            ),
            tokens: TokenIssuer::new(Duration::from_secs(config.security.token_ttl_secs)),
            hasher: CredentialHasher::new(config.hashing.cost),
            store: RecordStore::new(&config.storage.data_file),
        }
    }

    /// The token issuer, for the issuance endpoint.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// The record store, for reads.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run one submission through every stage.
    ///
    /// `session` and `presented_token` are None when the client sent no
    /// session cookie or no X-CSRF-Token header; both are invalid-token
    /// failures once the rate limit stage has passed.
    pub async fn process(
        &self,
        session: Option<Uuid>,
        presented_token: Option<&str>,
        body: &serde_json::Value,
        origin: IpAddr,
    ) -> Result<(), RejectReason> {
        // Stage 1: rate limit
        if !self.rate_limiter.allow(&origin.to_string()) {
            return Err(RejectReason::RateLimited);
        }

        // Stage 2: token verification
        let verified = match (session, presented_token) {
            (Some(session), Some(token)) => self.tokens.verify(session, token),
            _ => false,
        };
        if !verified {
            return Err(RejectReason::InvalidToken);
        }

        // Stage 3: validation
        let fields = validate(body)?;

        // Stage 4: hashing, on the blocking pool. No shared lock is
        // held across this await.
        let hasher = self.hasher;
        let secret = fields.secret;
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|_| RejectReason::Hashing(HashError::TaskAborted))??;

        // Stage 5: durable append
        self.store
            .append(SubmissionRecord {
                email_or_phone: fields.identifier,
                password: digest,
                timestamp: fields.timestamp,
                ip: origin.to_string(),
            })
            .await?;

        Ok(())
    }
}

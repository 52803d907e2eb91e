//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → rate_limit.rs (check per-IP window)
//!     → csrf.rs (verify session-bound token)
//!     → hashing.rs (bcrypt the secret before storage)
//!
//! Every response:
//!     → headers.rs (security response headers)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input
//! - Token compare is constant-time

pub mod csrf;
pub mod hashing;
pub mod headers;
pub mod rate_limit;

pub use csrf::TokenIssuer;
pub use hashing::CredentialHasher;
pub use rate_limit::RateLimiter;

//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline append
//!     → store.rs (serialize writers, read-modify-write snapshot)
//!     → temp file + fsync + rename (atomic visibility)
//! ```
//!
//! # Design Decisions
//! - The snapshot file is always fully rewritten; a reader between
//!   operations always sees valid JSON
//! - Records are append-only and immutable once written

pub mod store;

pub use store::{RecordStore, StoreError, SubmissionRecord};

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, app state)
//!     → handlers.rs (csrf-token / submit / health)
//!     → error.rs (rejection → status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};

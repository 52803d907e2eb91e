//! Credential Intake Service Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod security;
pub mod storage;

pub use config::schema::IntakeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

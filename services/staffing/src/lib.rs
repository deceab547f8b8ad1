//! Staffing service.
//!
//! Users, projects, employees and assignments behind signed bearer tokens.
//! Tokens are issued by `POST /api/login` and verified on every other
//! `/api` route with the platform token codec.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod estimate;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::ApiError;
pub use routes::create_app;
pub use state::{AppState, TokenSettings};

/// Service name used in logs.
pub const SERVICE_NAME: &str = "staffing-service";

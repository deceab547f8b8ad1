//! Shared library for cross-cutting concerns in staffing platform Rust services.
//!
//! This crate provides centralized implementations for:
//! - Tracing subscriber setup (plain or JSON, `RUST_LOG` aware)
//! - Graceful shutdown on SIGINT/SIGTERM with a drain timeout

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod shutdown;
pub mod tracing_config;

pub use shutdown::{run_with_graceful_shutdown, wait_for_signal, ShutdownController, ShutdownSignal};
pub use tracing_config::{init_tracing, TracingConfig};

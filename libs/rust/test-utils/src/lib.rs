//! Shared test utilities for the staffing platform crates.
//!
//! This crate provides:
//! - RSA and EC key fixtures in PEM form
//! - Reference tokens produced by an independent RS256 signer
//! - Proptest generators for headers, payloads and token mutations

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use generators::*;

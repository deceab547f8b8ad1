//! Error types for token encoding and verification.
//!
//! A signature that merely fails to verify is not an error: `verify`
//! reports it as `Ok(false)`. The variants here cover input the codec
//! cannot work with at all.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Key material is unreadable or does not fit the signing algorithm.
    #[error("Invalid key material: {reason}")]
    InvalidKey {
        /// Description of the key problem
        reason: String,
    },

    /// Token does not have the three-segment structure.
    #[error("Malformed token: {reason}")]
    MalformedToken {
        /// Description of the structural problem
        reason: String,
    },

    /// Header or payload could not be serialized or parsed as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The signing primitive rejected the operation.
    #[error("Signing failed: {reason}")]
    Signing {
        /// Description of the failure
        reason: String,
    },

    /// Key file could not be read.
    #[error("Failed to read key file {}: {source}", path.display())]
    KeyIo {
        /// Path that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// A configuration string names no known algorithm or encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported {kind}: {value}")]
pub struct UnsupportedOption {
    /// What was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl CodecError {
    /// Create an invalid key error.
    #[must_use]
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }

    /// Create a malformed token error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }

    /// Create a signing error.
    #[must_use]
    pub fn signing(reason: impl Into<String>) -> Self {
        Self::Signing {
            reason: reason.into(),
        }
    }

    /// Whether the error originates from key material rather than the token.
    ///
    /// Key errors are fatal for the call and retrying with the same key
    /// cannot succeed.
    #[must_use]
    pub const fn is_key_error(&self) -> bool {
        matches!(self, Self::InvalidKey { .. } | Self::KeyIo { .. })
    }

    /// Whether the error is caused by the token string itself.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedToken { .. })
    }
}

//! Token header model.

use crate::algorithm::SigningAlgorithm;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default `typ` header value.
pub const DEFAULT_TOKEN_TYPE: &str = "JWT";

/// Token header.
///
/// The codec does not interpret any member: `alg` and `typ` are carried as
/// opaque strings. Extra members follow them, ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Header {
    /// Signature algorithm identifier
    pub alg: String,
    /// Token type tag
    pub typ: String,
    /// Additional header members
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// Header for `algorithm` with the default token type.
    #[must_use]
    pub fn new(algorithm: SigningAlgorithm) -> Self {
        Self {
            alg: algorithm.as_str().to_string(),
            typ: DEFAULT_TOKEN_TYPE.to_string(),
            extra: Map::new(),
        }
    }

    /// Set the token type tag.
    #[must_use]
    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        self.typ = typ.into();
        self
    }

    /// Add an extra header member.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

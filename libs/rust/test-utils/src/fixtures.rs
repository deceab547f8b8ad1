//! Test fixtures with key material and known-good tokens.
//!
//! The key pairs are throwaway test keys and must never be used outside
//! tests.

use serde::{Deserialize, Serialize};

/// A PEM private/public key pair.
#[derive(Debug, Clone, Copy)]
pub struct KeyPair {
    private_pem: &'static str,
    public_pem: &'static str,
}

impl KeyPair {
    /// PEM private key bytes.
    #[must_use]
    pub const fn private_pem(&self) -> &'static [u8] {
        self.private_pem.as_bytes()
    }

    /// PEM public key bytes.
    #[must_use]
    pub const fn public_pem(&self) -> &'static [u8] {
        self.public_pem.as_bytes()
    }

    /// PEM private key text.
    #[must_use]
    pub const fn private_pem_str(&self) -> &'static str {
        self.private_pem
    }

    /// PEM public key text.
    #[must_use]
    pub const fn public_pem_str(&self) -> &'static str {
        self.public_pem
    }
}

/// RSA-2048 key pair; private key in PKCS#1 (`RSA PRIVATE KEY`) form.
#[must_use]
pub const fn primary_key_pair() -> KeyPair {
    KeyPair {
        private_pem: include_str!("../fixtures/keys/primary_private.pem"),
        public_pem: include_str!("../fixtures/keys/primary_public.pem"),
    }
}

/// A second, unrelated RSA-2048 key pair; private key in PKCS#8 form.
#[must_use]
pub const fn secondary_key_pair() -> KeyPair {
    KeyPair {
        private_pem: include_str!("../fixtures/keys/secondary_private.pem"),
        public_pem: include_str!("../fixtures/keys/secondary_public.pem"),
    }
}

/// P-256 key pair, for exercising algorithm/key mismatches.
#[must_use]
pub const fn ec_key_pair() -> KeyPair {
    KeyPair {
        private_pem: include_str!("../fixtures/keys/ec_private.pem"),
        public_pem: include_str!("../fixtures/keys/ec_public.pem"),
    }
}

/// Header used for the reference tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleHeader {
    /// Algorithm identifier
    pub alg: String,
    /// Token type
    pub typ: String,
}

impl SampleHeader {
    /// `{"alg":"RS256","typ":"jwt"}`.
    #[must_use]
    pub fn rs256() -> Self {
        Self {
            alg: "RS256".to_string(),
            typ: "jwt".to_string(),
        }
    }
}

/// Payload used for the reference tokens, in serialization order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleClaims {
    /// Subject
    pub sub: String,
    /// Display name
    pub name: String,
    /// Admin flag
    pub admin: bool,
}

impl SampleClaims {
    /// `{"sub":"1234567890","name":"John Doe","admin":false}`.
    #[must_use]
    pub fn john_doe() -> Self {
        Self {
            sub: "1234567890".to_string(),
            name: "John Doe".to_string(),
            admin: false,
        }
    }
}

/// [`SampleHeader::rs256`] and [`SampleClaims::john_doe`] signed with
/// [`primary_key_pair`], signature segment `base64url(signature)`.
#[must_use]
pub fn reference_token_raw() -> &'static str {
    include_str!("../fixtures/tokens/reference_rs256_raw.txt").trim()
}

/// The same token with the signature segment `base64url(base64(signature))`.
#[must_use]
pub fn reference_token_legacy() -> &'static str {
    include_str!("../fixtures/tokens/reference_rs256_legacy.txt").trim()
}

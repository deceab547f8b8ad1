//! Compact signed tokens.
//!
//! Encodes a header and payload into `header.payload.signature`, signed
//! with an RSA private key (RS256 or PS256), and verifies such tokens
//! against the matching public key. Claims are not validated: expiry,
//! issuer and audience are the caller's concern.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algorithm;
pub mod base64url;
pub mod codec;
pub mod error;
pub mod header;
pub mod keys;
pub mod token;

pub use algorithm::{SignatureEncoding, SigningAlgorithm};
pub use codec::{encode, verify, TokenCodec};
pub use error::{CodecError, UnsupportedOption};
pub use header::Header;
pub use keys::{FileKeyProvider, KeyProvider, StaticKeyProvider};
pub use token::Token;

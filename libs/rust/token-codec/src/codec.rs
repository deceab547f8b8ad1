//! Token encoding and verification.
//!
//! A token is `base64url(header).base64url(payload).signature`, where the
//! signature covers the first two segments exactly as they appear in the
//! token. Keys are passed in on every call; the codec keeps no key or token
//! state, so one value can be shared freely across tasks.

use crate::algorithm::{SignatureEncoding, SigningAlgorithm};
use crate::base64url;
use crate::error::CodecError;
use crate::token::{Token, SEPARATOR};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Signs and verifies tokens with a fixed algorithm and signature encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenCodec {
    algorithm: SigningAlgorithm,
    signature_encoding: SignatureEncoding,
}

impl TokenCodec {
    /// Create a codec for `algorithm` with the raw signature encoding.
    #[must_use]
    pub const fn new(algorithm: SigningAlgorithm) -> Self {
        Self {
            algorithm,
            signature_encoding: SignatureEncoding::Raw,
        }
    }

    /// Set the signature segment encoding.
    #[must_use]
    pub const fn with_signature_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.signature_encoding = encoding;
        self
    }

    /// Signature algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Signature segment encoding.
    #[must_use]
    pub const fn signature_encoding(&self) -> SignatureEncoding {
        self.signature_encoding
    }

    /// Encode and sign `header` and `payload` with a PEM private key.
    ///
    /// Both values are serialized as compact JSON. The header is not
    /// inspected; callers are expected to put the matching `alg` in it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] if the key is not an RSA private
    /// key in PKCS#1 or PKCS#8 PEM, and [`CodecError::Serialization`] if
    /// either value cannot be serialized.
    pub fn encode<H, P>(
        &self,
        header: &H,
        payload: &P,
        private_key_pem: &[u8],
    ) -> Result<String, CodecError>
    where
        H: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let key = EncodingKey::from_rsa_pem(private_key_pem).map_err(key_error)?;

        let mut token = encode_json(header)?;
        token.push(SEPARATOR);
        token.push_str(&encode_json(payload)?);

        let signature = self.sign(token.as_bytes(), &key)?;
        token.push(SEPARATOR);
        token.push_str(&self.signature_encoding.encode(&signature));

        debug!(algorithm = %self.algorithm, length = token.len(), "Token encoded");
        Ok(token)
    }

    /// Verify a token's signature with a PEM public key.
    ///
    /// An invalid signature, tampered segment, or non-matching key yields
    /// `Ok(false)`. Errors are reserved for input that cannot be checked.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedToken`] if the token does not have
    /// three non-empty segments, and [`CodecError::InvalidKey`] if the key
    /// is not an RSA public key in PEM.
    pub fn verify(&self, token: &str, public_key_pem: &[u8]) -> Result<bool, CodecError> {
        let token = Token::parse(token)?;
        let key = DecodingKey::from_rsa_pem(public_key_pem).map_err(key_error)?;

        let valid = self.verify_parsed(&token, &key)?;
        debug!(algorithm = %self.algorithm, valid, "Token verified");
        Ok(valid)
    }

    /// Verify a token and decode its payload.
    ///
    /// Returns `Ok(None)` when the signature does not verify; claims of an
    /// unverified token are never returned.
    ///
    /// # Errors
    ///
    /// As [`TokenCodec::verify`], plus [`CodecError::Serialization`] or
    /// [`CodecError::MalformedToken`] when a verified payload is not JSON of
    /// type `T`.
    pub fn verify_and_decode<T: DeserializeOwned>(
        &self,
        token: &str,
        public_key_pem: &[u8],
    ) -> Result<Option<T>, CodecError> {
        let token = Token::parse(token)?;
        let key = DecodingKey::from_rsa_pem(public_key_pem).map_err(key_error)?;

        if !self.verify_parsed(&token, &key)? {
            debug!(algorithm = %self.algorithm, "Token rejected");
            return Ok(None);
        }
        token.claims().map(Some)
    }

    fn sign(&self, message: &[u8], key: &EncodingKey) -> Result<Vec<u8>, CodecError> {
        let encoded = jsonwebtoken::crypto::sign(message, key, self.algorithm.to_jsonwebtoken())
            .map_err(key_error)?;
        base64url::decode(encoded).map_err(|e| CodecError::signing(e.to_string()))
    }

    fn verify_parsed(&self, token: &Token<'_>, key: &DecodingKey) -> Result<bool, CodecError> {
        let Some(signature) = self.signature_encoding.decode(token.signature_segment()) else {
            return Ok(false);
        };

        // ring performs the comparison; it takes the signature as canonical
        // base64url text
        jsonwebtoken::crypto::verify(
            &base64url::encode(signature),
            token.signing_input().as_bytes(),
            key,
            self.algorithm.to_jsonwebtoken(),
        )
        .map_err(|e| CodecError::signing(e.to_string()))
    }
}

/// Encode and sign with the default codec (RS256, raw signature encoding).
///
/// # Errors
///
/// See [`TokenCodec::encode`].
pub fn encode<H, P>(header: &H, payload: &P, private_key_pem: &[u8]) -> Result<String, CodecError>
where
    H: Serialize + ?Sized,
    P: Serialize + ?Sized,
{
    TokenCodec::default().encode(header, payload, private_key_pem)
}

/// Verify with the default codec (RS256, raw signature encoding).
///
/// # Errors
///
/// See [`TokenCodec::verify`].
pub fn verify(token: &str, public_key_pem: &[u8]) -> Result<bool, CodecError> {
    TokenCodec::default().verify(token, public_key_pem)
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(base64url::encode(serde_json::to_vec(value)?))
}

fn key_error(err: jsonwebtoken::errors::Error) -> CodecError {
    match err.kind() {
        ErrorKind::InvalidKeyFormat
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::InvalidEcdsaKey
        | ErrorKind::InvalidAlgorithm => CodecError::invalid_key(err.to_string()),
        _ => CodecError::signing(err.to_string()),
    }
}

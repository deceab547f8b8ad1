//! Structural view of a token string.

use crate::base64url;
use crate::error::CodecError;
use serde::de::DeserializeOwned;

/// Segment separator.
pub const SEPARATOR: char = '.';

const SEGMENT_COUNT: usize = 3;

/// A token split into its three segments.
///
/// Construction only checks structure: three non-empty, dot-separated
/// segments. Nothing about the signature is known at this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    signing_input: &'a str,
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> Token<'a> {
    /// Split a raw token into segments.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedToken`] unless the token has exactly
    /// three segments and none of them is empty.
    pub fn parse(raw: &'a str) -> Result<Self, CodecError> {
        let segments: Vec<&str> = raw.split(SEPARATOR).collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(CodecError::malformed(format!(
                "expected {SEGMENT_COUNT} segments, found {}",
                segments.len()
            )));
        }
        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(CodecError::malformed(format!("segment {} is empty", position + 1)));
        }

        let (header, payload, signature) = (segments[0], segments[1], segments[2]);
        // header and payload are contiguous in `raw`, so the signing input
        // is a borrowed slice rather than a fresh concatenation
        let signing_input = &raw[..header.len() + 1 + payload.len()];

        Ok(Self {
            signing_input,
            header,
            payload,
            signature,
        })
    }

    /// The exact bytes the signature covers: `header.payload` as transmitted.
    #[must_use]
    pub const fn signing_input(&self) -> &'a str {
        self.signing_input
    }

    /// Encoded header segment.
    #[must_use]
    pub const fn header_segment(&self) -> &'a str {
        self.header
    }

    /// Encoded payload segment.
    #[must_use]
    pub const fn payload_segment(&self) -> &'a str {
        self.payload
    }

    /// Encoded signature segment.
    #[must_use]
    pub const fn signature_segment(&self) -> &'a str {
        self.signature
    }

    /// Decode the header segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not base64url JSON of type `T`.
    pub fn header<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        decode_segment(self.header, "header")
    }

    /// Decode the payload segment without verifying the signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not base64url JSON of type `T`.
    pub fn claims<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        decode_segment(self.payload, "payload")
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, name: &str) -> Result<T, CodecError> {
    let bytes = base64url::decode(segment)
        .map_err(|e| CodecError::malformed(format!("{name} is not base64url: {e}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

//! URL-safe, padding-free base64.
//!
//! `+` becomes `-`, `/` becomes `_`, and `=` padding is stripped. Decoding
//! is strict: padding and non-canonical trailing bits are rejected, so each
//! byte string has exactly one textual form.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

pub use base64::DecodeError;

/// Encode bytes as URL-safe base64 without padding.
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode URL-safe base64 without padding.
///
/// # Errors
///
/// Returns an error for characters outside the URL-safe alphabet, for
/// padding, and for non-canonical trailing bits.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Whether `c` belongs to the URL-safe base64 alphabet.
#[must_use]
pub const fn is_alphabet_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

//! Signature algorithm and signature segment encoding.

use crate::base64url;
use crate::error::UnsupportedOption;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;

/// Asymmetric signature algorithm used by a codec.
///
/// Both variants hash with SHA-256 and sign with an RSA key. The algorithm
/// is fixed by configuration; it is never taken from a token header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256. Deterministic.
    #[default]
    RS256,
    /// RSASSA-PSS with SHA-256. Randomized salt per signature.
    PS256,
}

impl SigningAlgorithm {
    /// JOSE name for the `alg` header member.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RS256 => "RS256",
            Self::PS256 => "PS256",
        }
    }

    /// Whether signing the same input twice yields identical bytes.
    #[must_use]
    pub const fn is_deterministic(&self) -> bool {
        matches!(self, Self::RS256)
    }

    pub(crate) const fn to_jsonwebtoken(self) -> jsonwebtoken::Algorithm {
        match self {
            Self::RS256 => jsonwebtoken::Algorithm::RS256,
            Self::PS256 => jsonwebtoken::Algorithm::PS256,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RS256" => Ok(Self::RS256),
            "PS256" => Ok(Self::PS256),
            _ => Err(UnsupportedOption {
                kind: "signing algorithm",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How raw signature bytes are turned into the third token segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureEncoding {
    /// `base64url(signature)`.
    #[default]
    Raw,
    /// `base64url(base64(signature))`: the standard-alphabet text of the
    /// signature is itself encoded. Matches tokens issued by older
    /// deployments of the service.
    Legacy,
}

impl SignatureEncoding {
    /// Configuration name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Legacy => "legacy",
        }
    }

    /// Encode raw signature bytes into a segment.
    #[must_use]
    pub fn encode(&self, signature: &[u8]) -> String {
        match self {
            Self::Raw => base64url::encode(signature),
            Self::Legacy => base64url::encode(STANDARD.encode(signature)),
        }
    }

    /// Recover raw signature bytes from a segment.
    ///
    /// Returns `None` when the segment is not a valid encoding, which a
    /// verifier treats as a signature mismatch.
    #[must_use]
    pub fn decode(&self, segment: &str) -> Option<Vec<u8>> {
        match self {
            Self::Raw => base64url::decode(segment).ok(),
            Self::Legacy => {
                let text = base64url::decode(segment).ok()?;
                STANDARD.decode(text).ok()
            }
        }
    }
}

impl FromStr for SignatureEncoding {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "legacy" => Ok(Self::Legacy),
            _ => Err(UnsupportedOption {
                kind: "signature encoding",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SignatureEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("RS256".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::RS256);
        assert_eq!("rs256".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::RS256);
        assert_eq!("PS256".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::PS256);

        let err = "HS256".parse::<SigningAlgorithm>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported signing algorithm: HS256");
        assert!("none".parse::<SigningAlgorithm>().is_err());
    }

    #[test]
    fn test_algorithm_as_str() {
        assert_eq!(SigningAlgorithm::RS256.as_str(), "RS256");
        assert_eq!(SigningAlgorithm::PS256.to_string(), "PS256");
        assert!(SigningAlgorithm::RS256.is_deterministic());
        assert!(!SigningAlgorithm::PS256.is_deterministic());
    }

    #[test]
    fn test_encoding_parsing() {
        assert_eq!("raw".parse::<SignatureEncoding>().unwrap(), SignatureEncoding::Raw);
        assert_eq!("LEGACY".parse::<SignatureEncoding>().unwrap(), SignatureEncoding::Legacy);
        assert!("double".parse::<SignatureEncoding>().is_err());
        assert_eq!(SignatureEncoding::default(), SignatureEncoding::Raw);
    }

    #[test]
    fn test_raw_encoding() {
        let sig = [0xfb, 0xff, 0x00, 0x10];
        let segment = SignatureEncoding::Raw.encode(&sig);
        assert_eq!(segment, "-_8AEA");
        assert_eq!(SignatureEncoding::Raw.decode(&segment).unwrap(), sig);
    }

    #[test]
    fn test_legacy_encoding_wraps_standard_text() {
        let sig = [0xfb, 0xff];
        let segment = SignatureEncoding::Legacy.encode(&sig);
        // standard text is "+/8=", whose url-safe encoding is "Ky84PQ"
        assert_eq!(segment, "Ky84PQ");
        assert_eq!(SignatureEncoding::Legacy.decode(&segment).unwrap(), sig);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(SignatureEncoding::Raw.decode("not base64!").is_none());
        // valid url-safe text, but the inner text is not standard base64
        let segment = base64url::encode("***");
        assert!(SignatureEncoding::Legacy.decode(&segment).is_none());
    }
}

//! Key material supplied to the codec.
//!
//! Providers hold PEM text only. Whether the PEM is usable for the
//! configured algorithm is decided by the codec on each call.

use crate::error::CodecError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Source of the signing and verification keys.
pub trait KeyProvider: Send + Sync {
    /// PEM-encoded private key used for signing.
    fn private_key_pem(&self) -> &SecretString;

    /// PEM-encoded public key used for verification.
    fn public_key_pem(&self) -> &str;
}

/// Keys held in memory.
pub struct StaticKeyProvider {
    private_key: SecretString,
    public_key: String,
}

impl StaticKeyProvider {
    /// Create a provider from PEM strings.
    #[must_use]
    pub fn new(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: SecretString::from(private_key.into()),
            public_key: public_key.into(),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn private_key_pem(&self) -> &SecretString {
        &self.private_key
    }

    fn public_key_pem(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeyProvider")
            .field("private_key", &"[REDACTED]")
            .field("public_key_len", &self.public_key.len())
            .finish()
    }
}

/// Keys read from PEM files once, at construction.
#[derive(Debug)]
pub struct FileKeyProvider {
    inner: StaticKeyProvider,
}

impl FileKeyProvider {
    /// Read the private and public key files.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::KeyIo`] if either file cannot be read.
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, CodecError> {
        let private_key = read_pem(private_key_path.as_ref())?;
        let public_key = read_pem(public_key_path.as_ref())?;

        info!(
            private_key = %private_key_path.as_ref().display(),
            public_key = %public_key_path.as_ref().display(),
            "Loaded signing keys"
        );

        Ok(Self {
            inner: StaticKeyProvider::new(private_key, public_key),
        })
    }
}

impl KeyProvider for FileKeyProvider {
    fn private_key_pem(&self) -> &SecretString {
        self.inner.private_key_pem()
    }

    fn public_key_pem(&self) -> &str {
        self.inner.public_key_pem()
    }
}

fn read_pem(path: &Path) -> Result<String, CodecError> {
    std::fs::read_to_string(path).map_err(|source| CodecError::KeyIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Private key bytes for passing to [`crate::TokenCodec::encode`].
#[must_use]
pub fn expose_private_pem(provider: &dyn KeyProvider) -> &[u8] {
    provider.private_key_pem().expose_secret().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::primary_key_pair;

    #[test]
    fn test_static_provider() {
        let provider = StaticKeyProvider::new("private", "public");
        assert_eq!(provider.private_key_pem().expose_secret(), "private");
        assert_eq!(provider.public_key_pem(), "public");
        assert_eq!(expose_private_pem(&provider), b"private");
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let provider = StaticKeyProvider::new("super-secret-pem", "public");
        let debug = format!("{provider:?}");
        assert!(!debug.contains("super-secret-pem"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_file_provider_reads_keys() {
        let dir = std::env::temp_dir().join(format!("token-codec-keys-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let keys = primary_key_pair();
        std::fs::write(dir.join("private.pem"), keys.private_pem()).unwrap();
        std::fs::write(dir.join("public.pem"), keys.public_pem()).unwrap();

        let provider = FileKeyProvider::load(dir.join("private.pem"), dir.join("public.pem")).unwrap();
        assert_eq!(provider.public_key_pem().as_bytes(), keys.public_pem());
        assert_eq!(expose_private_pem(&provider), keys.private_pem());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_provider_missing_file() {
        let err = FileKeyProvider::load("/nonexistent/private.pem", "/nonexistent/public.pem")
            .unwrap_err();
        assert!(err.is_key_error());
        assert!(matches!(err, CodecError::KeyIo { .. }));
    }
}

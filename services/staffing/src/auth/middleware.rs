use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::{Map, Value};
use token_codec::CodecError;
use tracing::{debug, error};

use super::{bearer_token, AuthenticatedUser};
use crate::error::ApiError;
use crate::metrics;
use crate::state::{AppState, TokenSettings};

/// Rejects requests without a valid bearer token.
///
/// A missing token is 401, a token that fails verification or is not a
/// well-formed token is 403, and an unusable verification key is 500. On
/// success the caller's [`AuthenticatedUser`] is added to the request
/// extensions.
///
/// # Errors
///
/// Returns the rejection as an [`ApiError`].
pub async fn authenticate_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()) else {
        metrics::record_token_verification("missing");
        return Err(ApiError::TokenMissing);
    };

    let user = verify_bearer(&state.tokens, token)?;
    debug!(user = ?user.name, path = %request.uri().path(), "Request authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Verify a bearer token and extract its claims.
///
/// # Errors
///
/// [`ApiError::TokenRejected`] for a bad signature, a malformed token or a
/// payload that is not a JSON object; [`ApiError::Codec`] when the
/// configured public key is unusable.
pub fn verify_bearer(settings: &TokenSettings, token: &str) -> Result<AuthenticatedUser, ApiError> {
    let public_key = settings.keys.public_key_pem().as_bytes();

    match settings
        .codec
        .verify_and_decode::<Map<String, Value>>(token, public_key)
    {
        Ok(Some(claims)) => {
            metrics::record_token_verification("valid");
            Ok(AuthenticatedUser::from_claims(claims))
        }
        Ok(None) => {
            metrics::record_token_verification("invalid");
            Err(ApiError::TokenRejected)
        }
        Err(e) if e.is_malformed() || matches!(e, CodecError::Serialization(_)) => {
            metrics::record_token_verification("malformed");
            debug!(error = %e, "Malformed bearer token");
            Err(ApiError::TokenRejected)
        }
        Err(e) => {
            metrics::record_token_verification("error");
            error!(error = %e, "Token verification failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use test_utils::fixtures::{ec_key_pair, primary_key_pair, secondary_key_pair};
    use token_codec::{Header, StaticKeyProvider, TokenCodec};

    fn settings(private: &str, public: &str) -> TokenSettings {
        TokenSettings {
            codec: TokenCodec::default(),
            token_type: "JWT".to_string(),
            keys: Arc::new(StaticKeyProvider::new(private, public)),
        }
    }

    fn primary() -> TokenSettings {
        let keys = primary_key_pair();
        settings(keys.private_pem_str(), keys.public_pem_str())
    }

    fn sign(settings: &TokenSettings, payload: &Value) -> String {
        let private = token_codec::keys::expose_private_pem(settings.keys.as_ref());
        settings
            .codec
            .encode(&Header::new(settings.codec.algorithm()), payload, private)
            .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let settings = primary();
        let token = sign(&settings, &serde_json::json!({"name": "alice", "iat": 1}));

        let user = verify_bearer(&settings, &token).unwrap();
        assert_eq!(user.name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let other = secondary_key_pair();
        let token = sign(
            &settings(other.private_pem_str(), other.public_pem_str()),
            &serde_json::json!({"name": "mallory"}),
        );

        assert!(matches!(verify_bearer(&primary(), &token), Err(ApiError::TokenRejected)));
    }

    #[test]
    fn test_malformed_and_non_object_tokens_are_rejected() {
        let settings = primary();
        assert!(matches!(verify_bearer(&settings, "a.b"), Err(ApiError::TokenRejected)));
        assert!(matches!(verify_bearer(&settings, "garbage"), Err(ApiError::TokenRejected)));

        let array_payload = sign(&settings, &serde_json::json!([1, 2, 3]));
        assert!(matches!(
            verify_bearer(&settings, &array_payload),
            Err(ApiError::TokenRejected)
        ));
    }

    #[test]
    fn test_unusable_public_key_is_server_error() {
        let signer = primary();
        let token = sign(&signer, &serde_json::json!({"name": "alice"}));

        let ec = ec_key_pair();
        let broken = settings(primary_key_pair().private_pem_str(), ec.public_pem_str());
        assert!(matches!(verify_bearer(&broken, &token), Err(ApiError::Codec(_))));
    }
}

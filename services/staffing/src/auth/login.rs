use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use token_codec::keys::expose_private_pem;
use token_codec::Header;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::metrics;
use crate::state::{AppState, TokenSettings};

/// `POST /api/login` body.
#[derive(Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Login name
    #[serde(default)]
    pub username: Option<String>,
    /// Login password
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// `POST /api/login` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,
}

/// Payload of issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginClaims {
    /// Username
    pub name: String,
    /// Issued at, unix seconds
    pub iat: i64,
}

/// Exchange a username and password for a signed token.
///
/// # Errors
///
/// 400 when either field is missing, 404 for an unknown user, 401 for a
/// wrong password, 500 when the store or signing fails.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        metrics::record_login_attempt("bad_request");
        ApiError::bad_request(rejection.body_text())
    })?;

    let (username, password) = match (request.username, request.password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            (username, password)
        }
        _ => {
            metrics::record_login_attempt("bad_request");
            return Err(ApiError::bad_request("Username and password are required"));
        }
    };

    let user = match state.credentials.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            metrics::record_login_attempt("unknown_user");
            warn!(%username, "Login for unknown user");
            return Err(ApiError::UserNotFound);
        }
        Err(e) => {
            metrics::record_login_attempt("error");
            return Err(e.into());
        }
    };

    if !bool::from(user.password.as_bytes().ct_eq(password.as_bytes())) {
        metrics::record_login_attempt("invalid_password");
        warn!(%username, "Login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(&state.tokens, &user.username).inspect_err(|_| {
        metrics::record_login_attempt("error");
    })?;

    metrics::record_login_attempt("success");
    info!(user_id = user.user_id, %username, "User logged in");
    Ok(Json(LoginResponse { token }))
}

/// Sign a token for `username` with the configured algorithm and type.
///
/// # Errors
///
/// Returns [`ApiError::Codec`] when the private key is unusable.
pub fn issue_token(settings: &TokenSettings, username: &str) -> Result<String, ApiError> {
    let algorithm = settings.codec.algorithm();
    let header = Header::new(algorithm).with_type(settings.token_type.as_str());
    let claims = LoginClaims {
        name: username.to_string(),
        iat: Utc::now().timestamp(),
    };

    let token = settings
        .codec
        .encode(&header, &claims, expose_private_pem(settings.keys.as_ref()))?;
    metrics::record_token_issued(algorithm.as_str());
    Ok(token)
}

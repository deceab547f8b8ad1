//! Bearer-token authentication and login.

mod login;
mod middleware;

pub use login::{issue_token, login, LoginClaims, LoginRequest, LoginResponse};
pub use middleware::{authenticate_token, verify_bearer};

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use serde_json::{Map, Value};

/// Identity taken from a verified token, attached to the request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// `name` claim, if the token carries one
    pub name: Option<String>,
    /// All verified claims
    pub claims: Map<String, Value>,
}

impl AuthenticatedUser {
    /// Identity from verified claims.
    #[must_use]
    pub fn from_claims(claims: Map<String, Value>) -> Self {
        let name = claims
            .get("name")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        Self { name, claims }
    }
}

/// Token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Any other scheme or an empty
/// token counts as no token.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

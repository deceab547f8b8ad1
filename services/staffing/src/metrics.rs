//! Prometheus metrics.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

/// Tokens issued counter.
pub static TOKENS_ISSUED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "staffing_tokens_issued_total",
        "Total number of tokens issued",
        &["algorithm"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Token verifications counter.
pub static TOKEN_VERIFICATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "staffing_token_verifications_total",
        "Total number of bearer token verifications",
        &["outcome"]
    )
    .expect("Failed to register token_verifications metric")
});

/// Login attempts counter.
pub static LOGIN_ATTEMPTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "staffing_login_attempts_total",
        "Total number of login attempts",
        &["outcome"]
    )
    .expect("Failed to register login_attempts metric")
});

/// Record a token issuance.
pub fn record_token_issued(algorithm: &str) {
    TOKENS_ISSUED.with_label_values(&[algorithm]).inc();
}

/// Record a bearer token verification.
///
/// Outcomes: `valid`, `invalid`, `missing`, `malformed`, `error`.
pub fn record_token_verification(outcome: &str) {
    TOKEN_VERIFICATIONS.with_label_values(&[outcome]).inc();
}

/// Record a login attempt.
///
/// Outcomes: `success`, `bad_request`, `unknown_user`, `invalid_password`,
/// `error`.
pub fn record_login_attempt(outcome: &str) {
    LOGIN_ATTEMPTS.with_label_values(&[outcome]).inc();
}

/// Render the default registry in the text exposition format.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn render() -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

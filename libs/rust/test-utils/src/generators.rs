//! Shared proptest generators.

use proptest::prelude::*;
use proptest::sample::Index;
use serde_json::{Map, Value};

/// The URL-safe base64 alphabet.
pub const URL_SAFE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate claim values: strings, integers and booleans.
pub fn claim_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[ -~]{0,32}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

/// Generate headers with `alg`, `typ` and up to three extra members.
pub fn header_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("RS256"), Just("PS256")],
        prop_oneof![Just("JWT"), Just("jwt"), Just("at+jwt")],
        prop::collection::btree_map("[a-z]{1,8}", claim_value_strategy(), 0..3),
    )
        .prop_map(|(alg, typ, extra)| {
            let mut header: Map<String, Value> = extra.into_iter().collect();
            header.insert("alg".to_string(), Value::from(alg));
            header.insert("typ".to_string(), Value::from(typ));
            Value::Object(header)
        })
}

/// Generate payloads: maps of claim names to scalar values.
pub fn payload_strategy() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,15}", claim_value_strategy(), 0..8)
        .prop_map(|claims| Value::Object(claims.into_iter().collect()))
}

/// Generate usernames.
pub fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{2,20}"
}

/// Generate a single-character mutation: segment (0..3), position within
/// the segment, and an alphabet rotation in `1..64`.
pub fn mutation_strategy() -> impl Strategy<Value = (usize, Index, usize)> {
    (0usize..3, any::<Index>(), 1usize..64)
}

/// Replace one character of one segment with a different URL-safe
/// alphabet character.
///
/// The replacement is `rotation` places further along the alphabet, so it
/// always differs from the original. Dots are never touched.
///
/// # Panics
///
/// Panics if `token` does not have three non-empty segments or contains
/// characters outside the URL-safe alphabet.
#[must_use]
pub fn mutate_token(token: &str, segment: usize, position: &Index, rotation: usize) -> String {
    let mut segments: Vec<Vec<u8>> = token.split('.').map(|s| s.as_bytes().to_vec()).collect();
    assert_eq!(segments.len(), 3, "token must have three segments");

    let target = &mut segments[segment];
    let at = position.index(target.len());
    let current = URL_SAFE_ALPHABET
        .iter()
        .position(|&c| c == target[at])
        .unwrap_or_else(|| panic!("character {:?} outside alphabet", target[at] as char));
    target[at] = URL_SAFE_ALPHABET[(current + rotation) % URL_SAFE_ALPHABET.len()];

    segments
        .into_iter()
        .map(|s| String::from_utf8(s).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(".")
}

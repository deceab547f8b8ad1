//! Property-based tests for the token codec.
//!
//! Property 1: Round-trip validity
//! Property 2: Tamper detection
//! Property 3: Wrong-key rejection
//! Property 4: Structural validity
//! Property 5: Determinism follows the signature scheme

use proptest::prelude::*;
use test_utils::fixtures::{primary_key_pair, secondary_key_pair};
use test_utils::{header_strategy, mutate_token, mutation_strategy, payload_strategy};
use token_codec::{base64url, SignatureEncoding, SigningAlgorithm, Token, TokenCodec};

fn codec_strategy() -> impl Strategy<Value = TokenCodec> {
    (
        prop_oneof![Just(SigningAlgorithm::RS256), Just(SigningAlgorithm::PS256)],
        prop_oneof![Just(SignatureEncoding::Raw), Just(SignatureEncoding::Legacy)],
    )
        .prop_map(|(algorithm, encoding)| {
            TokenCodec::new(algorithm).with_signature_encoding(encoding)
        })
}

proptest! {
    // RSA signing dominates the run time
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property 1: Round-trip validity
    ///
    /// Any header and payload signed with a private key verifies against
    /// the matching public key.
    #[test]
    fn prop_round_trip_validity(
        codec in codec_strategy(),
        header in header_strategy(),
        payload in payload_strategy(),
    ) {
        let keys = primary_key_pair();
        let token = codec.encode(&header, &payload, keys.private_pem()).unwrap();

        prop_assert!(codec.verify(&token, keys.public_pem()).unwrap());

        // the transmitted segments decode back to the inputs
        let parsed = Token::parse(&token).unwrap();
        prop_assert_eq!(parsed.header::<serde_json::Value>().unwrap(), header);
        prop_assert_eq!(parsed.claims::<serde_json::Value>().unwrap(), payload);
    }

    /// Property 2: Tamper detection
    ///
    /// Changing any single character of any segment makes verification
    /// return false rather than an error.
    #[test]
    fn prop_tamper_detection(
        codec in codec_strategy(),
        payload in payload_strategy(),
        (segment, position, rotation) in mutation_strategy(),
    ) {
        let keys = primary_key_pair();
        let header = serde_json::json!({"alg": codec.algorithm().as_str(), "typ": "JWT"});
        let token = codec.encode(&header, &payload, keys.private_pem()).unwrap();

        let tampered = mutate_token(&token, segment, &position, rotation);
        prop_assert_ne!(&tampered, &token);

        let result = codec.verify(&tampered, keys.public_pem());
        prop_assert!(matches!(result, Ok(false)), "tampered token verified: {:?}", result);
    }

    /// Property 3: Wrong-key rejection
    #[test]
    fn prop_wrong_key_rejection(
        codec in codec_strategy(),
        header in header_strategy(),
        payload in payload_strategy(),
    ) {
        let token = codec
            .encode(&header, &payload, primary_key_pair().private_pem())
            .unwrap();

        prop_assert!(!codec.verify(&token, secondary_key_pair().public_pem()).unwrap());
    }

    /// Property 4: Structural validity
    ///
    /// Exactly two dots, no padding, nothing outside the URL-safe alphabet.
    #[test]
    fn prop_structural_validity(
        codec in codec_strategy(),
        header in header_strategy(),
        payload in payload_strategy(),
    ) {
        let token = codec
            .encode(&header, &payload, secondary_key_pair().private_pem())
            .unwrap();

        prop_assert_eq!(token.matches('.').count(), 2);
        prop_assert!(!token.contains('='));
        prop_assert!(token.chars().all(|c| c == '.' || base64url::is_alphabet_char(c)));
        prop_assert!(token.split('.').all(|s| !s.is_empty()));
    }

    /// Property 5: Determinism follows the signature scheme
    ///
    /// Header and payload segments are always stable; the signature is
    /// byte-identical across calls only for RS256.
    #[test]
    fn prop_determinism_follows_scheme(
        codec in codec_strategy(),
        header in header_strategy(),
        payload in payload_strategy(),
    ) {
        let keys = primary_key_pair();
        let first = codec.encode(&header, &payload, keys.private_pem()).unwrap();
        let second = codec.encode(&header, &payload, keys.private_pem()).unwrap();

        let first_parsed = Token::parse(&first).unwrap();
        let second_parsed = Token::parse(&second).unwrap();
        prop_assert_eq!(first_parsed.signing_input(), second_parsed.signing_input());

        if codec.algorithm().is_deterministic() {
            prop_assert_eq!(&first, &second);
        } else {
            prop_assert_ne!(first_parsed.signature_segment(), second_parsed.signature_segment());
        }

        prop_assert!(codec.verify(&first, keys.public_pem()).unwrap());
        prop_assert!(codec.verify(&second, keys.public_pem()).unwrap());
    }

    /// Tokens without exactly three non-empty segments are malformed.
    #[test]
    fn prop_malformed_structure_is_an_error(
        segments in prop::collection::vec("[A-Za-z0-9_-]{0,12}", 1..6),
    ) {
        let raw = segments.join(".");
        let well_formed = segments.len() == 3 && segments.iter().all(|s| !s.is_empty());
        prop_assume!(!well_formed);

        let err = TokenCodec::default()
            .verify(&raw, primary_key_pair().public_pem())
            .unwrap_err();
        prop_assert!(err.is_malformed());
    }
}

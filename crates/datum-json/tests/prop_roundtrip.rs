/// Property-based roundtrip tests.
///
/// Uses the `proptest` crate to generate random Datum trees and verify that
/// `decode(encode(d)) == d` holds exactly. Tree equality is structural, so
/// this also pins down integer/float preservation, insertion order, and the
/// minimal escaping policy in one property.
///
/// Strategies generate:
/// - Random strings (empty, unicode, quotes/backslashes, raw controls)
/// - Random numbers (full-range integers, finite floats — shortest
///   round-trip float formatting makes arbitrary finite floats safe)
/// - Random booleans and null
/// - Random arrays and objects up to 4 levels deep
use proptest::prelude::*;

use datum_json::{decode, encode, AssocPair, Datum, Number};

// ============================================================================
// Strategies for generating Datum trees
// ============================================================================

/// Generate an object key (short, may be empty or non-ASCII).
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap(),
        Just(String::new()),
        Just("ключ".to_string()),
    ]
}

/// Generate a string payload with the edge cases that exercise the escaper.
fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,24}",
        Just(String::new()),
        Just("with \"quotes\" and \\backslashes\\".to_string()),
        Just("line1\nline2\tcol \r end".to_string()),
        Just("\u{8}\u{c} backspace and formfeed".to_string()),
        Just("caf\u{e9} \u{4f60}\u{597d} \u{1f600}".to_string()),
        Just("\u{1}\u{2}\u{1f} raw controls".to_string()),
        Just("true".to_string()),
        Just("42".to_string()),
        Just("null".to_string()),
    ]
}

/// Generate a number payload: any integer, or any finite float.
fn arb_number() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::Int),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Number::Float),
    ]
}

/// Generate a primitive datum (null, bool, number, string).
fn arb_primitive() -> impl Strategy<Value = Datum> {
    prop_oneof![
        Just(Datum::Null),
        any::<bool>().prop_map(Datum::Bool),
        arb_number().prop_map(Datum::Number),
        arb_string().prop_map(Datum::String),
    ]
}

/// Generate a datum with bounded nesting (recursive).
fn arb_datum_inner(depth: u32) -> BoxedStrategy<Datum> {
    if depth == 0 {
        arb_primitive().boxed()
    } else {
        prop_oneof![
            3 => arb_primitive(),
            1 => prop::collection::vec(arb_datum_inner(depth - 1), 0..4)
                .prop_map(Datum::Array),
            1 => prop::collection::vec((arb_key(), arb_datum_inner(depth - 1)), 0..4)
                .prop_map(|pairs| Datum::Object(
                    pairs
                        .into_iter()
                        .map(|(key, val)| AssocPair { key, val })
                        .collect()
                )),
        ]
        .boxed()
    }
}

/// Top-level strategy: trees up to 4 levels deep.
fn arb_datum() -> impl Strategy<Value = Datum> {
    arb_datum_inner(3)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Core roundtrip property: decode(encode(d)) == d for any tree.
    #[test]
    fn roundtrip_preserves_datum(datum in arb_datum()) {
        let json = encode(&datum).unwrap();
        let decoded = decode(&json).unwrap();
        prop_assert_eq!(
            &datum,
            &decoded,
            "Roundtrip failed!\n  encoded JSON: {}",
            json
        );
    }

    /// Integers stay integers and floats stay floats across the text form.
    #[test]
    fn number_kind_is_preserved(n in arb_number()) {
        let json = encode(&Datum::Number(n)).unwrap();
        let decoded = decode(&json).unwrap();
        match (n, decoded) {
            (Number::Int(a), Datum::Number(Number::Int(b))) => prop_assert_eq!(a, b),
            (Number::Float(a), Datum::Number(Number::Float(b))) => prop_assert_eq!(a, b),
            (n, decoded) => prop_assert!(false, "kind changed: {:?} -> {:?}", n, decoded),
        }
    }

    /// Any string payload survives the escaper both ways.
    #[test]
    fn string_roundtrip(s in arb_string()) {
        let datum = Datum::String(s);
        let json = encode(&datum).unwrap();
        prop_assert_eq!(decode(&json).unwrap(), datum);
    }

    /// Encoded output is canonical: re-decoding and re-encoding is a fixed
    /// point.
    #[test]
    fn encoding_is_a_fixed_point(datum in arb_datum()) {
        let json = encode(&datum).unwrap();
        let again = encode(&decode(&json).unwrap()).unwrap();
        prop_assert_eq!(json, again);
    }

    /// The permissive number tokenizer never panics: junk built from number
    /// characters either parses as a number or fails cleanly.
    #[test]
    fn number_like_junk_never_panics(junk in "[0-9eE.+-]{1,12}") {
        match decode(&junk) {
            Ok(Datum::Number(_)) => {}
            Ok(other) => prop_assert!(false, "non-number result {:?} for {:?}", other, junk),
            Err(_) => {}
        }
    }

    /// Arbitrary input never panics the parser.
    #[test]
    fn arbitrary_input_never_panics(input in ".{0,64}") {
        let _ = decode(&input);
    }
}

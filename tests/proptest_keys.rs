//! Property-based tests of the key escaping and value conversions

use aiven_userconfig::{decode_key, encode_key, from_api, to_api};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Keys made of identifiers separated by dots
///
/// Identifiers never contain `__`: a key ending with `__dot` right before a dot
/// would not survive the round trip.
fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}(_[a-z0-9]{1,4})?(\\.[a-z][a-z0-9]{0,7}(_[a-z0-9]{1,4})?){0,3}"
}

/// Null-free JSON values with dotted keys
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 .]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn key_escaping_round_trips(key in arb_key()) {
        prop_assert_eq!(decode_key(&encode_key(&key)), key);
    }

    #[test]
    fn escaped_keys_have_no_dots(key in arb_key()) {
        prop_assert!(!encode_key(&key).contains('.'));
    }

    #[test]
    fn conversion_round_trips(value in arb_value()) {
        prop_assert_eq!(to_api(&from_api(&value)), value);
    }
}

//! Property tests for payload round-tripping and address derivation.
//! Run: `cargo test --test prop_roundtrip -- --nocapture`

use proptest::prelude::*;

use simple_ledger::address::{make_address, namespace_prefix};
use simple_ledger::codec::{decode_payload, encode_payload};
use simple_ledger::types::{Transaction, Verb, MAX_VALUE};

/// Strategy over the closed verb set.
fn arb_verb() -> impl Strategy<Value = Verb> {
    prop_oneof![
        Just(Verb::Open),
        Just(Verb::Delete),
        Just(Verb::Query),
        Just(Verb::Transfer),
    ]
}

/// Strategy over valid account names (1..=20 chars).
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

proptest! {
    #[test]
    fn payload_roundtrip(verb in arb_verb(), name in arb_name(), amount in 0u64..=MAX_VALUE) {
        let tx = Transaction::new(verb, name, amount);
        let raw = encode_payload(&tx).expect("encode");
        let back = decode_payload(&raw).expect("decode");
        prop_assert_eq!(tx, back);
    }

    #[test]
    fn address_shape_and_determinism(name in arb_name()) {
        let addr = make_address(&name);
        prop_assert_eq!(addr.len(), 70);
        prop_assert!(addr.starts_with(namespace_prefix()));
        prop_assert_eq!(addr, make_address(&name));
    }

    #[test]
    fn distinct_names_get_distinct_addresses(a in arb_name(), b in arb_name()) {
        prop_assume!(a != b);
        prop_assert_ne!(make_address(&a), make_address(&b));
    }
}

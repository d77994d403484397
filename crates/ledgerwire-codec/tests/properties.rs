//! Property-based tests over generated documents.

use ledgerwire_codec::{decode, encode, AccountId, IssuedValue};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn account() -> impl Strategy<Value = String> {
    any::<[u8; 20]>().prop_map(|bytes| AccountId::new(bytes).to_address())
}

fn issued_value() -> impl Strategy<Value = String> {
    (
        1_000_000_000_000_000u64..=9_999_999_999_999_999,
        -96i32..=80,
        any::<bool>(),
    )
        .prop_map(|(m, e, negative)| {
            let sign = if negative { "-" } else { "" };
            format!("{sign}{m}e{e}")
        })
}

prop_compose! {
    fn document()(
        flags in any::<u32>(),
        sequence in any::<u32>(),
        fee in 0u64..=(1u64 << 62) - 1,
        domain in prop::collection::vec(any::<u8>(), 0..300),
        account in account(),
        value in issued_value(),
        memo in prop::collection::vec(any::<u8>(), 1..50),
    ) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("TransactionType".into(), json!("Payment"));
        map.insert("Flags".into(), json!(flags));
        map.insert("Sequence".into(), json!(sequence));
        map.insert("Fee".into(), json!(fee.to_string()));
        map.insert("Domain".into(), json!(hex::encode_upper(&domain)));
        map.insert("Account".into(), json!(account));
        map.insert("Amount".into(), json!({"currency": "EUR", "issuer": account, "value": value}));
        map.insert("Memos".into(), json!([{"Memo": {"MemoData": hex::encode_upper(&memo)}}]));
        map
    }
}

// Property: decoding an encoding gives back the document
proptest! {
    #[test]
    fn prop_round_trip(doc in document()) {
        let hex = encode(&Value::Object(doc.clone())).unwrap();
        let decoded = decode(&hex).unwrap();

        // issued values come back normalized, so compare them as decimals
        let original = IssuedValue::parse(doc["Amount"]["value"].as_str().unwrap()).unwrap();
        let returned = IssuedValue::parse(decoded["Amount"]["value"].as_str().unwrap()).unwrap();
        prop_assert_eq!(original, returned);

        let mut expected = doc.clone();
        expected.remove("Amount");
        let mut actual = decoded.as_object().unwrap().clone();
        actual.remove("Amount");
        prop_assert_eq!(actual, expected);
    }
}

// Property: insertion order of keys never changes the bytes
proptest! {
    #[test]
    fn prop_order_independent(doc in document()) {
        let reversed: Map<String, Value> = doc.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
        prop_assert_eq!(
            encode(&Value::Object(doc)).unwrap(),
            encode(&Value::Object(reversed)).unwrap()
        );
    }
}

// Property: decode then encode is the identity on canonical bytes
proptest! {
    #[test]
    fn prop_decode_encode_idempotent(doc in document()) {
        let hex = encode(&Value::Object(doc)).unwrap();
        let once = decode(&hex).unwrap();
        prop_assert_eq!(encode(&once).unwrap(), hex.clone());
        prop_assert_eq!(decode(&encode(&once).unwrap()).unwrap(), once);
    }
}

// Property: decoding arbitrary bytes never panics
proptest! {
    #[test]
    fn prop_decode_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&hex::encode(bytes));
    }
}

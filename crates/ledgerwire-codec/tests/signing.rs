use ledgerwire_codec::{
    encode, encode_for_batch_inner_multi_signing, encode_for_batch_inner_signing,
    encode_for_multi_signing, encode_for_signing, encode_for_signing_claim, sha512_half,
    transaction_hash, AccountId, BinaryCodec, CodecError,
};
use serde_json::{json, Value};

const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const OTHER: &str = "rrrrrrrrrrrrrrrrrrrrBZbvji";

fn payment() -> Value {
    json!({
        "TransactionType": "Payment",
        "Account": GENESIS,
        "Destination": OTHER,
        "Amount": "1000",
        "Fee": "10",
        "Sequence": 1,
        "SigningPubKey": "03AB40A0490F9B7ED8DF29D246BF2D6269820A0EE7742ACDD457BEA7C7D0931EDB",
        "TxnSignature": "DEADBEEF",
        "Signers": [
            {"Signer": {"Account": OTHER, "SigningPubKey": "02", "TxnSignature": "01"}}
        ]
    })
}

fn without(mut doc: Value, keys: &[&str]) -> Value {
    let map = doc.as_object_mut().unwrap();
    for key in keys {
        map.remove(*key);
    }
    doc
}

#[test]
fn single_signing_covers_only_signing_fields() {
    let hex = encode_for_signing(&payment()).unwrap();
    let body = encode(&without(payment(), &["TxnSignature", "Signers"])).unwrap();
    assert_eq!(hex, format!("53545800{body}"));
}

#[test]
fn signing_requires_an_object() {
    for input in [json!("1200"), json!([]), json!(null)] {
        let err = encode_for_signing(&input).unwrap_err();
        assert_eq!(err.to_string(), "JSON object required for signing");
    }
}

#[test]
fn multi_signing_appends_the_signer() {
    let a = encode_for_multi_signing(&payment(), GENESIS).unwrap();
    let b = encode_for_multi_signing(&payment(), OTHER).unwrap();

    assert!(a.starts_with("534D5400"));
    assert_eq!(a.len(), b.len());
    let split = a.len() - 40;
    assert_eq!(a[..split], b[..split]);
    assert_ne!(a[split..], b[split..]);
    assert_eq!(
        &a[split..],
        AccountId::from_address(GENESIS).unwrap().to_hex()
    );
}

#[test]
fn multi_signing_blanks_the_signing_key() {
    let hex = encode_for_multi_signing(&payment(), GENESIS).unwrap();
    let mut expected_doc = without(payment(), &["TxnSignature", "Signers"]);
    expected_doc["SigningPubKey"] = json!("");
    let body = encode(&expected_doc).unwrap();
    assert_eq!(hex[8..hex.len() - 40], body);
}

#[test]
fn multi_signing_rejects_bad_signer() {
    assert!(matches!(
        encode_for_multi_signing(&payment(), "not an address"),
        Err(CodecError::Address(_))
    ));
}

#[test]
fn prefixes_keep_contexts_apart() {
    let single = encode_for_signing(&payment()).unwrap();
    let multi = encode_for_multi_signing(&payment(), GENESIS).unwrap();
    let plain = encode(&payment()).unwrap();
    assert_ne!(single[..8], multi[..8]);
    assert!(!plain.starts_with(&single[..8]));
    assert!(!plain.starts_with(&multi[..8]));
}

#[test]
fn claim_is_positional() {
    let channel = "5DB01B7FFED6B67E6B0414DED11E051D2EE2B7619CE0EAA6286D67A3A4D5BDB3";
    let hex = encode_for_signing_claim(&json!({"Channel": channel, "Amount": "1000"})).unwrap();
    assert_eq!(hex, format!("434C4D00{channel}00000000000003E8"));
}

#[test]
fn claim_requires_channel_and_amount() {
    for claim in [json!({"Amount": "1"}), json!({"Channel": "00".repeat(32)}), json!({})] {
        assert!(matches!(
            encode_for_signing_claim(&claim),
            Err(CodecError::IncompleteClaim)
        ));
    }
}

fn batch() -> Value {
    json!({
        "TransactionType": "Batch",
        "Account": GENESIS,
        "Flags": 65536,
        "RawTransactions": [
            {"RawTransaction": {"TransactionType": "Payment", "Account": GENESIS, "Destination": OTHER, "Amount": "1", "Fee": "0", "Sequence": 2}},
            {"RawTransaction": {"TransactionType": "Payment", "Account": GENESIS, "Destination": OTHER, "Amount": "2", "Fee": "0", "Sequence": 3}}
        ]
    })
}

#[test]
fn batch_framing() {
    let out = encode_for_batch_inner_signing(&batch()).unwrap();
    assert_eq!(&out[..4], b"BCH\0");
    assert_eq!(&out[4..8], &65536u32.to_be_bytes());
    assert_eq!(&out[8..12], &2u32.to_be_bytes());
    assert_eq!(out.len(), 12 + 2 * 32);

    let inner = &batch()["RawTransactions"];
    let first = transaction_hash(&inner[0]["RawTransaction"]).unwrap();
    let second = transaction_hash(&inner[1]["RawTransaction"]).unwrap();
    assert_eq!(&out[12..44], &first);
    assert_eq!(&out[44..76], &second);
}

#[test]
fn batch_preserves_inner_order() {
    let mut reversed = batch();
    reversed["RawTransactions"]
        .as_array_mut()
        .unwrap()
        .reverse();
    let a = encode_for_batch_inner_signing(&batch()).unwrap();
    let b = encode_for_batch_inner_signing(&reversed).unwrap();
    assert_eq!(a[..12], b[..12]);
    assert_eq!(a[12..44], b[44..76]);
    assert_eq!(a[44..76], b[12..44]);
}

#[test]
fn batch_multi_signing_appends_signer() {
    let single = encode_for_batch_inner_signing(&batch()).unwrap();
    let multi = encode_for_batch_inner_multi_signing(&batch(), OTHER).unwrap();
    assert_eq!(multi[..single.len()], single[..]);
    assert_eq!(
        &multi[single.len()..],
        AccountId::from_address(OTHER).unwrap().as_bytes()
    );
}

#[test]
fn transaction_hash_is_prefixed_sha512_half() {
    let codec = BinaryCodec::new();
    let encoded = codec.encode_to_bytes(&payment()).unwrap();
    assert_eq!(
        codec.transaction_hash(&payment()).unwrap(),
        sha512_half(&[&b"TXN\0"[..], &encoded[..]])
    );
}

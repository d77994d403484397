use ledgerwire_codec::{decode, encode, CodecError, DecodeError, IssuedValue};
use serde_json::{json, Value};

const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const GENESIS_ID: &str = "B5F762798A53D543A014CAF8B297CFF8F2F937E8";

fn issued(value: &str) -> Value {
    json!({"Amount": {"currency": "USD", "issuer": GENESIS, "value": value}})
}

#[test]
fn flags_golden() {
    assert_eq!(encode(&json!({"Flags": 1})).unwrap(), "2200000001");
    assert_eq!(decode("2200000001").unwrap(), json!({"Flags": 1}));
}

#[test]
fn fee_golden() {
    assert_eq!(encode(&json!({"Fee": "100"})).unwrap(), "684000000000000064");
}

#[test]
fn payment_golden() {
    let tx = json!({
        "TransactionType": "Payment",
        "Account": GENESIS,
        "Destination": GENESIS,
        "Amount": "1000",
        "Fee": "10",
        "Flags": 2147483648u32,
        "Sequence": 1
    });
    let expected = [
        "120000",
        "2280000000",
        "2400000001",
        "6140000000000003E8",
        "68400000000000000A",
        "8114",
        GENESIS_ID,
        "8314",
        GENESIS_ID,
    ]
    .concat();

    assert_eq!(encode(&tx).unwrap(), expected);

    // canonical key order on the way out
    let decoded = decode(&expected).unwrap();
    let keys: Vec<_> = decoded.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        ["TransactionType", "Flags", "Sequence", "Amount", "Fee", "Account", "Destination"]
    );
    assert_eq!(decoded, tx);
}

#[test]
fn rich_transaction_round_trips() {
    let tx = json!({
        "TransactionType": "Payment",
        "Account": GENESIS,
        "Destination": "rrrrrrrrrrrrrrrrrrrrBZbvji",
        "Amount": {"currency": "USD", "issuer": GENESIS, "value": "12.5"},
        "SendMax": "1500000",
        "Fee": "12",
        "Sequence": 42,
        "LastLedgerSequence": 7000000,
        "DestinationTag": 7,
        "SigningPubKey": "03AB40A0490F9B7ED8DF29D246BF2D6269820A0EE7742ACDD457BEA7C7D0931EDB",
        "TxnSignature": "3045022100D184EB4AE5956FF600E7536EE459345C7BBCF097A84CC61A93B9AF7197EDB98702201CEA8009B7BEEBAA2AACC0359B41C427C1C5B550A4CA4B80CF2174AF2D6D5DCE",
        "Memos": [
            {"Memo": {"MemoType": "687474703A2F2F6578616D706C652E636F6D", "MemoData": "72656E74"}},
            {"Memo": {"MemoData": "00"}}
        ],
        "Paths": [[{"currency": "XRP"}], [{"account": GENESIS}]]
    });

    let hex = encode(&tx).unwrap();
    assert_eq!(decode(&hex).unwrap(), tx);
    assert_eq!(encode(&decode(&hex).unwrap()).unwrap(), hex);
}

#[test]
fn decode_accepts_lowercase_hex() {
    let upper = encode(&json!({"Domain": "ABCDEF"})).unwrap();
    assert_eq!(decode(&upper.to_lowercase()).unwrap(), decode(&upper).unwrap());
}

#[test]
fn ledger_entry_round_trips() {
    let entry = json!({
        "LedgerEntryType": "AccountRoot",
        "Flags": 0,
        "Sequence": 1,
        "OwnerCount": 0,
        "PreviousTxnLgrSeq": 3,
        "OwnerNode": "0000000000000000",
        "Balance": "99999999999999990",
        "Account": GENESIS,
        "index": "ignored because it is never serialized"
    });
    let hex = encode(&entry).unwrap();
    let decoded = decode(&hex).unwrap();
    assert_eq!(decoded["LedgerEntryType"], json!("AccountRoot"));
    assert_eq!(decoded["Balance"], json!("99999999999999990"));
    assert!(decoded.get("index").is_none());
}

#[test]
fn amount_upper_boundary() {
    assert!(encode(&issued("9999999999999999e80")).is_ok());
    assert!(matches!(
        encode(&issued("99999999999999990e80")),
        Err(CodecError::ExponentOutOfRange)
    ));

    let err = encode(&issued("1e3000000000")).unwrap_err();
    assert_eq!(err.to_string(), "exponent out of range");
}

#[test]
fn amount_lower_boundary() {
    let hex = encode(&issued("1000000000000000e-96")).unwrap();
    let decoded = decode(&hex).unwrap();
    let text = decoded["Amount"]["value"].as_str().unwrap();
    assert_eq!(
        IssuedValue::parse(text).unwrap(),
        IssuedValue::parse("1000000000000000e-96").unwrap()
    );

    let err = encode(&issued("100000000000000e-96")).unwrap_err();
    assert_eq!(err.to_string(), "exponent out of range");
}

#[test]
fn amount_precision_limit() {
    let err = encode(&issued("1234567890123456.7")).unwrap_err();
    assert!(err.to_string().ends_with("has more than 16 digits"), "{err}");
}

#[test]
fn native_amount_limits() {
    assert!(encode(&json!({"Fee": "4611686018427387903"})).is_ok());
    assert!(matches!(
        encode(&json!({"Fee": "4611686018427387904"})),
        Err(CodecError::NativeAmountOutOfRange(_))
    ));
    assert!(encode(&json!({"Fee": "-1"})).is_err());
}

fn domain_of_len(len: usize) -> String {
    encode(&json!({"Domain": "AB".repeat(len)})).unwrap()
}

#[test]
fn length_prefix_tiers() {
    // Domain header is 0x77
    assert!(domain_of_len(192).starts_with("77C0"));
    assert!(domain_of_len(193).starts_with("77C100"));
    assert!(domain_of_len(12480).starts_with("77F0FF"));
    assert!(domain_of_len(12481).starts_with("77F10000"));

    for len in [0, 192, 193, 12480, 12481] {
        let hex = domain_of_len(len);
        assert_eq!(decode(&hex).unwrap(), json!({"Domain": "AB".repeat(len)}));
    }
}

#[test]
fn oversized_blob_is_rejected() {
    let err = encode(&json!({"Domain": "00".repeat(918745)})).unwrap_err();
    assert!(matches!(err, CodecError::LengthOutOfRange(918745)));
}

fn decode_err(hex: &str) -> DecodeError {
    match decode(hex) {
        Err(CodecError::Decode(err)) => err,
        other => panic!("expected a decode failure for {hex}, got {other:?}"),
    }
}

#[test]
fn decode_failures() {
    assert!(matches!(decode_err("2"), DecodeError::Hex(_)));
    assert!(matches!(decode_err("220000"), DecodeError::Truncated { .. }));
    assert!(matches!(
        decode_err("20C800000000"),
        DecodeError::UnknownField { type_code: 2, field_code: 200 }
    ));
    // type 2 written in the long form
    assert!(matches!(decode_err("02020000000000"), DecodeError::InvalidFieldId { .. }));
    assert!(matches!(decode_err("77C1"), DecodeError::Truncated { .. }));
    assert!(matches!(decode_err("77FF"), DecodeError::InvalidLengthPrefix { .. }));
    assert!(matches!(decode_err("E1"), DecodeError::UnexpectedMarker { .. }));
    assert!(matches!(decode_err("F9EA"), DecodeError::UnterminatedContainer { .. }));
}

#[test]
fn deeply_nested_input_is_a_decode_failure() {
    for depth in [5_000, 20_000, 200_000] {
        assert!(matches!(
            decode_err(&"EA".repeat(depth)),
            DecodeError::NestingTooDeep { .. }
        ));
    }
    assert!(matches!(
        decode_err(&"F9EA".repeat(50_000)),
        DecodeError::NestingTooDeep { .. }
    ));
}

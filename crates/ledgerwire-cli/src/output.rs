//! Output formatting utilities.

use ledgerwire_codec::FieldDefinition;
use serde_json::{json, Value};

/// Formats a document as JSON.
pub fn format_json(document: &Value, compact: bool) -> String {
    let formatted = if compact {
        serde_json::to_string(document)
    } else {
        serde_json::to_string_pretty(document)
    };
    formatted.unwrap_or_else(|_| "{}".to_string())
}

/// Field definition as a JSON object.
pub fn field_json(def: &FieldDefinition) -> Value {
    json!({
        "name": def.name,
        "type": def.type_name,
        "type_code": def.type_code,
        "field_code": def.field_code,
        "header": def.id().map(|id| hex::encode_upper(id.to_bytes())),
        "is_vl_encoded": def.is_vl_encoded,
        "is_serialized": def.is_serialized,
        "is_signing_field": def.is_signing_field,
    })
}

/// Field definition as aligned `key: value` lines.
pub fn field_table(def: &FieldDefinition) -> String {
    let header = def
        .id()
        .map(|id| hex::encode_upper(id.to_bytes()))
        .unwrap_or_else(|| "-".to_string());
    [
        ("name", def.name.clone()),
        ("type", format!("{} ({})", def.type_name, def.type_code)),
        ("field code", def.field_code.to_string()),
        ("header", header),
        ("length prefixed", def.is_vl_encoded.to_string()),
        ("serialized", def.is_serialized.to_string()),
        ("signed", def.is_signing_field.to_string()),
    ]
    .iter()
    .map(|(key, value)| format!("{:<16} {}", format!("{key}:"), value))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerwire_codec::definitions;

    #[test]
    fn field_output_includes_header() {
        let fee = definitions().field_by_name("Fee").unwrap();
        assert_eq!(field_json(fee)["header"], json!("68"));
        assert!(field_table(fee).contains("header:          68"));
    }

    #[test]
    fn compact_json_is_one_line() {
        let doc = json!({"Flags": 1, "Fee": "10"});
        assert_eq!(format_json(&doc, true), r#"{"Flags":1,"Fee":"10"}"#);
        assert!(format_json(&doc, false).contains('\n'));
    }
}

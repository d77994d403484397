//! Field definition registry.
//!
//! The registry is built once from a JSON schema with the shape the network
//! publishes (`TYPES`, `FIELDS`, `TRANSACTION_TYPES`, `LEDGER_ENTRY_TYPES`,
//! `TRANSACTION_RESULTS`) and is immutable afterwards. Encoding resolves fields
//! by name, decoding by their `(type code, field code)` wire identity.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::DefinitionsError;
use crate::field_id::FieldId;

const EMBEDDED_DEFINITIONS: &str = include_str!("../definitions.json");

static DEFINITIONS: OnceLock<Definitions> = OnceLock::new();

/// Returns the process-wide registry parsed from the embedded schema.
///
/// # Panics
///
/// Panics on first use if the embedded schema is corrupt. The schema is
/// compiled into the binary, so this cannot be triggered by caller input.
pub fn definitions() -> &'static Definitions {
    DEFINITIONS.get_or_init(|| {
        Definitions::from_json(EMBEDDED_DEFINITIONS).expect("embedded definitions are valid")
    })
}

/// Serializer family of a field, keyed by its schema type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// 128-bit hash.
    Hash128,
    /// 160-bit hash.
    Hash160,
    /// 256-bit hash.
    Hash256,
    /// Variable-length binary.
    Blob,
    /// 20-byte account identifier.
    AccountId,
    /// Native or issued-currency amount.
    Amount,
    /// Currency with optional issuer.
    Issue,
    /// Set of payment paths.
    PathSet,
    /// List of 256-bit hashes.
    Vector256,
    /// Nested object.
    Object,
    /// Array of wrapped objects.
    Array,
}

impl FieldType {
    /// Maps a schema type name to its serializer family.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let ty = match name {
            "UInt8" => FieldType::UInt8,
            "UInt16" => FieldType::UInt16,
            "UInt32" => FieldType::UInt32,
            "UInt64" => FieldType::UInt64,
            "Hash128" => FieldType::Hash128,
            "Hash160" => FieldType::Hash160,
            "Hash256" => FieldType::Hash256,
            "Blob" => FieldType::Blob,
            "AccountID" => FieldType::AccountId,
            "Amount" => FieldType::Amount,
            "Issue" => FieldType::Issue,
            "PathSet" => FieldType::PathSet,
            "Vector256" => FieldType::Vector256,
            "STObject" => FieldType::Object,
            "STArray" => FieldType::Array,
            _ => return None,
        };
        Some(ty)
    }
}

/// A single entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name as it appears in documents.
    pub name: String,
    /// Schema type name (`"UInt32"`, `"STObject"`, ...).
    pub type_name: String,
    /// Numeric type code from the schema's `TYPES` table.
    pub type_code: i32,
    /// Field code (`nth`) within its type.
    pub field_code: i32,
    /// Serializer family.
    pub field_type: FieldType,
    /// Whether the value is preceded by a length prefix.
    pub is_vl_encoded: bool,
    /// Whether the field ever appears on the wire.
    pub is_serialized: bool,
    /// Whether the field is covered by signatures.
    pub is_signing_field: bool,
    id: Option<FieldId>,
}

impl FieldDefinition {
    /// Wire identity; `None` for fields that are never serialized.
    pub fn id(&self) -> Option<FieldId> {
        self.id
    }
}

/// Bidirectional name/code table for enumerated integer fields.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    by_name: HashMap<String, i32>,
    by_code: HashMap<i32, String>,
}

impl NameTable {
    fn new(entries: BTreeMap<String, i32>) -> Self {
        let mut table = NameTable::default();
        for (name, code) in entries {
            table.by_code.entry(code).or_insert_with(|| name.clone());
            table.by_name.insert(name, code);
        }
        table
    }

    /// Code registered for `name`.
    pub fn code(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    /// Name registered for `code`.
    pub fn name(&self, code: i32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawDefinitions {
    types: BTreeMap<String, i32>,
    fields: Vec<(String, RawFieldInfo)>,
    #[serde(default)]
    transaction_types: BTreeMap<String, i32>,
    #[serde(default)]
    ledger_entry_types: BTreeMap<String, i32>,
    #[serde(default)]
    transaction_results: BTreeMap<String, i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldInfo {
    nth: i32,
    #[serde(rename = "isVLEncoded")]
    is_vl_encoded: bool,
    is_serialized: bool,
    is_signing_field: bool,
    #[serde(rename = "type")]
    type_name: String,
}

/// Immutable field registry with lookups by name and by wire identity.
#[derive(Debug, Clone)]
pub struct Definitions {
    fields: Vec<FieldDefinition>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<FieldId, usize>,
    transaction_types: NameTable,
    ledger_entry_types: NameTable,
    transaction_results: NameTable,
}

impl Definitions {
    /// Parses and validates a schema.
    ///
    /// Fields whose type has no serializer are kept out of the registry when
    /// they are never serialized (`Generic`, `Transaction`, ...) and rejected
    /// otherwise.
    pub fn from_json(json: &str) -> Result<Self, DefinitionsError> {
        let raw: RawDefinitions = serde_json::from_str(json)?;

        let mut fields = Vec::with_capacity(raw.fields.len());
        let mut by_name = HashMap::new();
        let mut by_id: HashMap<FieldId, usize> = HashMap::new();

        for (name, info) in raw.fields {
            let Some(field_type) = FieldType::from_type_name(&info.type_name) else {
                if info.is_serialized {
                    return Err(DefinitionsError::UnknownType {
                        field: name,
                        type_name: info.type_name,
                    });
                }
                continue;
            };
            let Some(&type_code) = raw.types.get(&info.type_name) else {
                return Err(DefinitionsError::UnknownType {
                    field: name,
                    type_name: info.type_name,
                });
            };

            if info.is_serialized
                && matches!(field_type, FieldType::Blob | FieldType::Vector256)
                && !info.is_vl_encoded
            {
                return Err(DefinitionsError::MissingLengthPrefix(name));
            }

            let id = if info.is_serialized {
                let id = wire_id(type_code, info.nth).ok_or_else(|| {
                    DefinitionsError::CodeOutOfRange {
                        field: name.clone(),
                        type_code,
                        field_code: info.nth,
                    }
                })?;
                if let Some(&existing) = by_id.get(&id) {
                    let first: &FieldDefinition = &fields[existing];
                    return Err(DefinitionsError::DuplicateCode {
                        first: first.name.clone(),
                        second: name,
                        type_code,
                        field_code: info.nth,
                    });
                }
                by_id.insert(id, fields.len());
                Some(id)
            } else {
                None
            };

            if by_name.insert(name.clone(), fields.len()).is_some() {
                return Err(DefinitionsError::DuplicateName(name));
            }
            fields.push(FieldDefinition {
                name,
                type_name: info.type_name,
                type_code,
                field_code: info.nth,
                field_type,
                is_vl_encoded: info.is_vl_encoded,
                is_serialized: info.is_serialized,
                is_signing_field: info.is_signing_field,
                id,
            });
        }

        for (marker, expected) in [
            ("ObjectEndMarker", FieldId::OBJECT_END),
            ("ArrayEndMarker", FieldId::ARRAY_END),
        ] {
            if by_id.get(&expected).map(|&i| fields[i].name.as_str()) != Some(marker) {
                return Err(DefinitionsError::MissingField(marker));
            }
        }

        tracing::debug!(fields = fields.len(), "loaded field definitions");

        Ok(Self {
            fields,
            by_name,
            by_id,
            transaction_types: NameTable::new(raw.transaction_types),
            ledger_entry_types: NameTable::new(raw.ledger_entry_types),
            transaction_results: NameTable::new(raw.transaction_results),
        })
    }

    /// Looks a field up by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Looks a serialized field up by its wire identity.
    pub fn field_by_id(&self, id: FieldId) -> Option<&FieldDefinition> {
        self.by_id.get(&id).map(|&i| &self.fields[i])
    }

    /// Iterates every registered field in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    /// `TransactionType` names.
    pub fn transaction_types(&self) -> &NameTable {
        &self.transaction_types
    }

    /// `LedgerEntryType` names.
    pub fn ledger_entry_types(&self) -> &NameTable {
        &self.ledger_entry_types
    }

    /// `TransactionResult` names.
    pub fn transaction_results(&self) -> &NameTable {
        &self.transaction_results
    }

    /// Name table used for an enumerated integer field, if any.
    pub fn name_table_for(&self, field: &str) -> Option<&NameTable> {
        match field {
            "TransactionType" => Some(&self.transaction_types),
            "LedgerEntryType" => Some(&self.ledger_entry_types),
            "TransactionResult" => Some(&self.transaction_results),
            _ => None,
        }
    }
}

fn wire_id(type_code: i32, field_code: i32) -> Option<FieldId> {
    let type_code = u8::try_from(type_code).ok().filter(|&c| c > 0)?;
    let field_code = u8::try_from(field_code).ok().filter(|&c| c > 0)?;
    Some(FieldId::new(type_code, field_code))
}

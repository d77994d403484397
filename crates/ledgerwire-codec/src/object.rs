//! Object and array serializers.
//!
//! Objects hold their fields keyed by [`FieldId`], so iteration is always
//! canonical order regardless of how the document was written. A nested
//! object is closed by the object-end marker; the top-level document is not.
//! Arrays are a sequence of single-field wrapper objects closed by the
//! array-end marker.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::definitions::{Definitions, FieldDefinition, FieldType};
use crate::error::{CodecError, DecodeError};
use crate::field_id::FieldId;
use crate::parser::BinaryParser;
use crate::types::FieldValue;

/// Deepest container nesting the decoder follows before giving up.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A field together with its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry<'d> {
    /// Registry entry of the field.
    pub definition: &'d FieldDefinition,
    /// Field value.
    pub value: FieldValue<'d>,
}

/// A serialized object: fields in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StObject<'d> {
    fields: BTreeMap<FieldId, FieldEntry<'d>>,
}

impl<'d> StObject<'d> {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an object from a JSON map.
    ///
    /// Keys the registry does not know, and fields that are never serialized,
    /// are skipped. Structural markers cannot be written as keys.
    pub fn from_json(map: &Map<String, Value>, defs: &'d Definitions) -> Result<Self, CodecError> {
        let mut object = StObject::new();
        for (key, json) in map {
            let Some(definition) = defs.field_by_name(key) else {
                tracing::trace!(field = %key, "skipping unknown field");
                continue;
            };
            let Some(id) = definition.id() else {
                tracing::trace!(field = %key, "skipping non-serialized field");
                continue;
            };
            if id == FieldId::OBJECT_END || id == FieldId::ARRAY_END {
                return Err(CodecError::invalid_field(key, "structural markers cannot be set"));
            }
            let value = FieldValue::from_json(definition, json, defs)?;
            object.fields.insert(id, FieldEntry { definition, value });
        }
        Ok(object)
    }

    /// JSON map with keys in canonical order.
    pub fn to_json(&self, defs: &Definitions) -> Value {
        let map = self
            .fields
            .values()
            .map(|entry| {
                (
                    entry.definition.name.clone(),
                    entry.value.to_json(entry.definition, defs),
                )
            })
            .collect::<Map<_, _>>();
        Value::Object(map)
    }

    /// Appends every field (header and value) without a closing marker.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.write_filtered(out, |_| true)
    }

    /// Appends the fields whose definition passes `keep`.
    pub fn write_filtered(
        &self,
        out: &mut Vec<u8>,
        keep: impl Fn(&FieldDefinition) -> bool,
    ) -> Result<(), CodecError> {
        for (id, entry) in &self.fields {
            if !keep(entry.definition) {
                continue;
            }
            id.write_to(out);
            entry.value.write_to(entry.definition, out)?;
        }
        Ok(())
    }

    /// Reads a top-level document, which runs to the end of input.
    pub fn read(parser: &mut BinaryParser<'_>, defs: &'d Definitions) -> Result<Self, DecodeError> {
        Self::read_fields(parser, defs, None, 0)
    }

    /// Reads a nested object up to and including its end marker.
    ///
    /// `depth` counts the containers enclosing this one.
    pub(crate) fn read_nested(
        parser: &mut BinaryParser<'_>,
        defs: &'d Definitions,
        opener: &str,
        depth: usize,
    ) -> Result<Self, DecodeError> {
        check_depth(parser, opener, depth)?;
        Self::read_fields(parser, defs, Some(opener), depth)
    }

    fn read_fields(
        parser: &mut BinaryParser<'_>,
        defs: &'d Definitions,
        opener: Option<&str>,
        depth: usize,
    ) -> Result<Self, DecodeError> {
        let mut object = StObject::new();
        let mut previous: Option<FieldId> = None;
        loop {
            if parser.is_empty() {
                return match opener {
                    None => Ok(object),
                    Some(field) => Err(DecodeError::UnterminatedContainer {
                        field: field.to_string(),
                    }),
                };
            }
            let offset = parser.position();
            let (id, _) = FieldId::read(parser)?;
            match id {
                FieldId::OBJECT_END if opener.is_some() => return Ok(object),
                FieldId::OBJECT_END => {
                    return Err(DecodeError::UnexpectedMarker {
                        offset,
                        marker: "ObjectEndMarker",
                    })
                }
                FieldId::ARRAY_END => {
                    return Err(DecodeError::UnexpectedMarker {
                        offset,
                        marker: "ArrayEndMarker",
                    })
                }
                _ => {}
            }
            let definition = defs.field_by_id(id).ok_or(DecodeError::UnknownField {
                type_code: id.type_code,
                field_code: id.field_code,
            })?;
            if previous.is_some_and(|prev| prev >= id) {
                return Err(DecodeError::NonCanonicalOrder {
                    offset,
                    field: definition.name.clone(),
                });
            }
            previous = Some(id);
            let value = FieldValue::read_at_depth(definition, parser, defs, depth)?;
            object.fields.insert(id, FieldEntry { definition, value });
        }
    }

    /// Value of the named field.
    pub fn get(&self, name: &str) -> Option<&FieldValue<'d>> {
        self.fields
            .values()
            .find(|entry| entry.definition.name == name)
            .map(|entry| &entry.value)
    }

    /// Sets a field, replacing any previous value.
    ///
    /// Fields that are never serialized are ignored.
    pub fn insert(&mut self, definition: &'d FieldDefinition, value: FieldValue<'d>) {
        if let Some(id) = definition.id() {
            self.fields.insert(id, FieldEntry { definition, value });
        }
    }

    /// Keeps only the fields whose definition passes `keep`.
    pub fn retain(&mut self, keep: impl Fn(&FieldDefinition) -> bool) {
        self.fields.retain(|_, entry| keep(entry.definition));
    }

    /// Fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry<'d>> {
        self.fields.values()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One array element: the wrapper field naming the element and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayElement<'d> {
    /// Wrapper field, always an object-typed field (`Memo`, `Signer`, ...).
    pub wrapper: &'d FieldDefinition,
    /// Element contents.
    pub object: StObject<'d>,
}

/// A serialized array. Element order is preserved as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StArray<'d> {
    elements: Vec<ArrayElement<'d>>,
}

impl<'d> StArray<'d> {
    /// Builds an array from `[{"Wrapper": {...}}, ...]`.
    pub fn from_json(
        field: &FieldDefinition,
        json: &Value,
        defs: &'d Definitions,
    ) -> Result<Self, CodecError> {
        let items = json
            .as_array()
            .ok_or_else(|| CodecError::invalid_field(&field.name, "expected an array"))?;
        let elements = items
            .iter()
            .map(|item| {
                let wrapped = item
                    .as_object()
                    .filter(|map| map.len() == 1)
                    .ok_or_else(|| {
                        CodecError::invalid_field(
                            &field.name,
                            "array elements must be single-key wrapper objects",
                        )
                    })?;
                let (key, inner) = wrapped.iter().next().ok_or_else(|| {
                    CodecError::invalid_field(&field.name, "empty wrapper object")
                })?;
                let wrapper = defs
                    .field_by_name(key)
                    .filter(|def| def.field_type == FieldType::Object && def.id().is_some())
                    .ok_or_else(|| {
                        CodecError::invalid_field(
                            &field.name,
                            format!("'{key}' is not an object field"),
                        )
                    })?;
                let map = inner
                    .as_object()
                    .ok_or_else(|| CodecError::ExpectedObject(key.clone()))?;
                Ok(ArrayElement {
                    wrapper,
                    object: StObject::from_json(map, defs)?,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        Ok(Self { elements })
    }

    /// JSON form.
    pub fn to_json(&self, defs: &Definitions) -> Value {
        Value::Array(
            self.elements
                .iter()
                .map(|element| {
                    let mut map = Map::new();
                    map.insert(element.wrapper.name.clone(), element.object.to_json(defs));
                    Value::Object(map)
                })
                .collect(),
        )
    }

    /// Appends every element and the closing array-end marker.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        for element in &self.elements {
            if let Some(id) = element.wrapper.id() {
                id.write_to(out);
            }
            element.object.write_to(out)?;
            FieldId::OBJECT_END.write_to(out);
        }
        FieldId::ARRAY_END.write_to(out);
        Ok(())
    }

    /// Reads elements up to and including the array-end marker.
    pub(crate) fn read(
        field: &FieldDefinition,
        parser: &mut BinaryParser<'_>,
        defs: &'d Definitions,
        depth: usize,
    ) -> Result<Self, DecodeError> {
        check_depth(parser, &field.name, depth)?;
        let mut elements = Vec::new();
        loop {
            if parser.is_empty() {
                return Err(DecodeError::UnterminatedContainer {
                    field: field.name.clone(),
                });
            }
            let offset = parser.position();
            let (id, _) = FieldId::read(parser)?;
            if id == FieldId::ARRAY_END {
                return Ok(Self { elements });
            }
            if id == FieldId::OBJECT_END {
                return Err(DecodeError::UnexpectedMarker {
                    offset,
                    marker: "ObjectEndMarker",
                });
            }
            let wrapper = defs.field_by_id(id).ok_or(DecodeError::UnknownField {
                type_code: id.type_code,
                field_code: id.field_code,
            })?;
            if wrapper.field_type != FieldType::Object {
                return Err(DecodeError::invalid_value(
                    &field.name,
                    format!("element {} is not an object", wrapper.name),
                ));
            }
            let object = StObject::read_nested(parser, defs, &wrapper.name, depth + 1)?;
            elements.push(ArrayElement { wrapper, object });
        }
    }

    /// Elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &ArrayElement<'d>> {
        self.elements.iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn check_depth(parser: &BinaryParser<'_>, field: &str, depth: usize) -> Result<(), DecodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            offset: parser.position(),
            field: field.to_string(),
            limit: MAX_NESTING_DEPTH,
        });
    }
    Ok(())
}

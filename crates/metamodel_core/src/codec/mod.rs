//! Tag-driven mapping between typed records and generic key-value payloads.
//!
//! # Responsibility
//! - Describe each record's wire fields once, as a static descriptor table.
//! - Serialize records into ordered `MapStr` payloads and parse them back.
//!
//! # Invariants
//! - Serialization emits every descriptor, in table order.
//! - Parsing is all-or-nothing: a type mismatch leaves the record untouched.
//! - Unknown payload keys are ignored; `null` resets a field to its default.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordered string-keyed payload exchanged with the metadata service.
///
/// Insertion order is preserved (`serde_json` `preserve_order`), so payloads
/// built from descriptor tables are deterministic.
pub type MapStr = Map<String, Value>;

/// Value shape of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Flag,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Flag => "flag",
        }
    }
}

/// One entry of a record's static field table.
pub struct FieldDescriptor<T: 'static> {
    /// Wire name (tag) of the field.
    pub name: &'static str,
    /// Whether persistence calls require a non-empty value.
    pub required: bool,
    pub kind: FieldKind,
    pub get: fn(&T) -> Value,
    pub set: fn(&mut T, &Value) -> Result<(), CodecError>,
}

/// Records that expose a static field-descriptor table.
pub trait Tagged: Clone + Sized + 'static {
    fn descriptors() -> &'static [FieldDescriptor<Self>];
}

/// Codec failures for payload values that do not fit the declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
    },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { field, expected } => write!(
                f,
                "field `{field}` expects a {} value",
                expected.as_str()
            ),
        }
    }
}

impl Error for CodecError {}

/// Serializes every declared field of `record` in table order.
pub fn to_map_str<T: Tagged>(record: &T) -> MapStr {
    let mut data = MapStr::new();
    for descriptor in T::descriptors() {
        data.insert(descriptor.name.to_string(), (descriptor.get)(record));
    }
    data
}

/// Assigns every payload key that matches a declared field.
pub fn set_from_map_str<T: Tagged>(record: &mut T, data: &MapStr) -> Result<(), CodecError> {
    let mut staged = record.clone();
    for descriptor in T::descriptors() {
        if let Some(value) = data.get(descriptor.name) {
            (descriptor.set)(&mut staged, value)?;
        }
    }
    *record = staged;
    Ok(())
}

/// Returns the first required field (in table order) whose value is empty.
pub fn missing_required<T: Tagged>(record: &T) -> Option<&'static str> {
    T::descriptors()
        .iter()
        .filter(|descriptor| descriptor.required)
        .find(|descriptor| is_empty_value(&(descriptor.get)(record)))
        .map(|descriptor| descriptor.name)
}

/// Looks up one descriptor by wire name.
pub fn descriptor<T: Tagged>(name: &str) -> Option<&'static FieldDescriptor<T>> {
    T::descriptors()
        .iter()
        .find(|descriptor| descriptor.name == name)
}

pub fn decode_text(field: &'static str, value: &Value) -> Result<String, CodecError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text.clone()),
        _ => Err(CodecError::TypeMismatch {
            field,
            expected: FieldKind::Text,
        }),
    }
}

pub fn decode_integer(field: &'static str, value: &Value) -> Result<i64, CodecError> {
    let mismatch = CodecError::TypeMismatch {
        field,
        expected: FieldKind::Integer,
    };
    match value {
        Value::Null => Ok(0),
        Value::Number(number) => number.as_i64().ok_or(mismatch),
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| mismatch),
        _ => Err(mismatch),
    }
}

pub fn decode_flag(field: &'static str, value: &Value) -> Result<bool, CodecError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) if text == "true" => Ok(true),
        Value::String(text) if text == "false" => Ok(false),
        _ => Err(CodecError::TypeMismatch {
            field,
            expected: FieldKind::Flag,
        }),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Builds a text `FieldDescriptor` bound to one `String` struct field.
macro_rules! text_field {
    ($record:ty, $name:expr, $field:ident) => {
        $crate::codec::FieldDescriptor::<$record> {
            name: $name,
            required: false,
            kind: $crate::codec::FieldKind::Text,
            get: |record: &$record| ::serde_json::Value::String(record.$field.clone()),
            set: |record: &mut $record, value: &::serde_json::Value| -> Result<(), $crate::codec::CodecError> {
                record.$field = $crate::codec::decode_text($name, value)?;
                Ok(())
            },
        }
    };
    ($record:ty, $name:expr, $field:ident, required) => {
        $crate::codec::FieldDescriptor::<$record> {
            name: $name,
            required: true,
            kind: $crate::codec::FieldKind::Text,
            get: |record: &$record| ::serde_json::Value::String(record.$field.clone()),
            set: |record: &mut $record, value: &::serde_json::Value| -> Result<(), $crate::codec::CodecError> {
                record.$field = $crate::codec::decode_text($name, value)?;
                Ok(())
            },
        }
    };
}

/// Builds an integer `FieldDescriptor` bound to one `i64` struct field.
macro_rules! integer_field {
    ($record:ty, $name:expr, $field:ident) => {
        $crate::codec::FieldDescriptor::<$record> {
            name: $name,
            required: false,
            kind: $crate::codec::FieldKind::Integer,
            get: |record: &$record| ::serde_json::Value::from(record.$field),
            set: |record: &mut $record, value: &::serde_json::Value| -> Result<(), $crate::codec::CodecError> {
                record.$field = $crate::codec::decode_integer($name, value)?;
                Ok(())
            },
        }
    };
}

/// Builds a flag `FieldDescriptor` bound to one `bool` struct field.
macro_rules! flag_field {
    ($record:ty, $name:expr, $field:ident) => {
        $crate::codec::FieldDescriptor::<$record> {
            name: $name,
            required: false,
            kind: $crate::codec::FieldKind::Flag,
            get: |record: &$record| ::serde_json::Value::Bool(record.$field),
            set: |record: &mut $record, value: &::serde_json::Value| -> Result<(), $crate::codec::CodecError> {
                record.$field = $crate::codec::decode_flag($name, value)?;
                Ok(())
            },
        }
    };
}

pub(crate) use flag_field;
pub(crate) use integer_field;
pub(crate) use text_field;

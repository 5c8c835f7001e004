use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while reading values back out of a [`Record`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The requested key is absent from the record
    #[error("record key `{key}` is missing")]
    MissingKey { key: String },

    /// The key exists but holds a different kind of value
    #[error("record key `{key}` holds a different kind of value than requested")]
    WrongKind { key: String },

    /// A persisted enum ordinal does not fit the enumeration it belongs to
    #[error("record key `{key}` holds ordinal {ordinal}, outside of range 0..{len}")]
    OrdinalOutOfRange { key: String, ordinal: i32, len: u32 },
}

/// A single value stored in a [`Record`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Bool(bool),
    I32(i32),
    U32(u32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Uuid(Uuid),
    Record(Record),
}

/// An opaque keyed map of primitive values, the durable form attribute and
/// skill state persists into. Unknown keys are preserved by readers, so
/// records written by newer revisions stay loadable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: HashMap<String, RecordValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: RecordValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    // Typed accessors

    pub fn get_bool(&self, key: &str) -> Result<bool, RecordError> {
        match self.require(key)? {
            RecordValue::Bool(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_i32(&self, key: &str) -> Result<i32, RecordError> {
        match self.require(key)? {
            RecordValue::I32(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_u32(&self, key: &str) -> Result<u32, RecordError> {
        match self.require(key)? {
            RecordValue::U32(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, RecordError> {
        match self.require(key)? {
            RecordValue::I64(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_f32(&self, key: &str) -> Result<f32, RecordError> {
        match self.require(key)? {
            RecordValue::F32(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, RecordError> {
        match self.require(key)? {
            RecordValue::F64(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str, RecordError> {
        match self.require(key)? {
            RecordValue::Str(value) => Ok(value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_uuid(&self, key: &str) -> Result<Uuid, RecordError> {
        match self.require(key)? {
            RecordValue::Uuid(value) => Ok(*value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    pub fn get_record(&self, key: &str) -> Result<&Record, RecordError> {
        match self.require(key)? {
            RecordValue::Record(value) => Ok(value),
            _ => Err(RecordError::WrongKind { key: key.into() }),
        }
    }

    fn require(&self, key: &str) -> Result<&RecordValue, RecordError> {
        self.entries
            .get(key)
            .ok_or_else(|| RecordError::MissingKey { key: key.into() })
    }
}

/// Value types an attribute can store under its `"value"` key
pub trait RecordPrimitive: Sized {
    fn to_record_value(&self) -> RecordValue;
    fn from_record_value(value: &RecordValue) -> Option<Self>;
}

macro_rules! record_primitive_impl {
    ($type:ty, $variant:ident) => {
        impl RecordPrimitive for $type {
            fn to_record_value(&self) -> RecordValue {
                RecordValue::$variant(self.clone())
            }

            fn from_record_value(value: &RecordValue) -> Option<Self> {
                match value {
                    RecordValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

record_primitive_impl!(bool, Bool);
record_primitive_impl!(i32, I32);
record_primitive_impl!(u32, U32);
record_primitive_impl!(i64, I64);
record_primitive_impl!(f32, F32);
record_primitive_impl!(f64, F64);
record_primitive_impl!(String, Str);
record_primitive_impl!(Uuid, Uuid);

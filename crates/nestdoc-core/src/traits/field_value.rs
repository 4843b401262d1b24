use crate::value::Value;
use chrono::{DateTime, Utc};
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

///
/// FieldValueKind
///
/// Shape classification of a mapped field.
/// Only `Map` fields accept key-addressed attribute values.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldValueKind {
    Scalar,
    List,
    Map,
}

impl FieldValueKind {
    #[must_use]
    pub const fn is_map(self) -> bool {
        matches!(self, Self::Map)
    }
}

///
/// FieldValue
///
/// Conversion boundary between a Rust field type and the store's [`Value`].
///
/// `from_value` returns `None` when the value's shape does not fit; the
/// caller decides how to report it.
///

pub trait FieldValue {
    fn kind() -> FieldValueKind
    where
        Self: Sized;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for Value {
    fn kind() -> FieldValueKind {
        FieldValueKind::Scalar
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FieldValue for String {
    fn kind() -> FieldValueKind {
        FieldValueKind::Scalar
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for bool {
    fn kind() -> FieldValueKind {
        FieldValueKind::Scalar
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn kind() -> FieldValueKind {
        FieldValueKind::Scalar
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as Self),
            Value::Uint(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn kind() -> FieldValueKind {
        FieldValueKind::Scalar
    }

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

// Signed integers are stored as `Int`; unsigned stored values are accepted
// when they fit.
macro_rules! impl_field_value_signed {
    ( $( $type:ty ),* ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldValueKind {
                    FieldValueKind::Scalar
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => Self::try_from(*v).ok(),
                        Value::Uint(v) => Self::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_field_value_unsigned {
    ( $( $type:ty ),* ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldValueKind {
                    FieldValueKind::Scalar
                }

                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Uint(v) => Self::try_from(*v).ok(),
                        Value::Int(v) => Self::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value_signed!(i8, i16, i32, i64);
impl_field_value_unsigned!(u8, u16, u32, u64);

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldValueKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> FieldValueKind {
        FieldValueKind::List
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl<V: FieldValue> FieldValue for BTreeMap<String, V> {
    fn kind() -> FieldValueKind {
        FieldValueKind::Map
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| V::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl<V, S> FieldValue for HashMap<String, V, S>
where
    V: FieldValue,
    S: BuildHasher + Default,
{
    fn kind() -> FieldValueKind {
        FieldValueKind::Map
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| V::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            Value::Null => Some(Self::default()),
            _ => None,
        }
    }
}

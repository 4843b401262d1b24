//! Typed field tokens and the values bound to them.
//!
//! An [`Attribute`] names one field of a declaring entity together with the
//! Rust type the field holds. Binding attributes to values yields a sequence
//! of [`AttributeValue`]s: a partial, type-checked projection of an entity
//! used to address documents and issue partial updates without a live
//! instance.

mod materialize;


pub use materialize::create_entity;

use crate::{
    error::{Error, ErrorOrigin},
    traits::FieldValue,
    value::Value,
};
use std::{collections::HashMap, fmt, marker::PhantomData};

///
/// Attribute
///
/// Field token for field `name` of `E`, holding values of type `V`.
/// Optional fields are tokenized by their inner type.
///

pub struct Attribute<E, V> {
    name: &'static str,
    _marker: PhantomData<fn() -> (E, V)>,
}

impl<E, V> Attribute<E, V> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<E, V> Attribute<E, V> {
    /// Remove the whole field.
    #[must_use]
    pub const fn removal(self) -> AttributeRemoval<E> {
        AttributeRemoval::new(self.name, None)
    }
}

impl<E, V: FieldValue> Attribute<E, V> {
    /// Bind this attribute to a value.
    pub fn bind(self, value: impl Into<V>) -> AttributeValue<E> {
        AttributeValue::from_binding(self.name, AttributeBinding::Value(value.into().to_value()))
    }
}

///
/// MapAttribute
///
/// Key-addressed token into map field `name` of `E`, whose entries hold `V`.
///

pub struct MapAttribute<E, V> {
    name: &'static str,
    _marker: PhantomData<fn() -> (E, V)>,
}

impl<E, V> MapAttribute<E, V> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<E, V> MapAttribute<E, V> {
    /// Remove one entry of the map field.
    #[must_use]
    pub fn removal(self, key: impl Into<String>) -> AttributeRemoval<E> {
        AttributeRemoval::new(self.name, Some(key.into()))
    }
}

impl<E, V: FieldValue> MapAttribute<E, V> {
    /// Bind one entry of the map field.
    pub fn bind(self, key: impl Into<String>, value: impl Into<V>) -> AttributeValue<E> {
        AttributeValue::from_binding(
            self.name,
            AttributeBinding::Entry {
                key: key.into(),
                value: value.into().to_value(),
            },
        )
    }
}

// Tokens are plain names; copy them regardless of `E` and `V`.
macro_rules! impl_token_traits {
    ($token:ident) => {
        impl<E, V> Clone for $token<E, V> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<E, V> Copy for $token<E, V> {}

        impl<E, V> fmt::Debug for $token<E, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($token)).field(&self.name).finish()
            }
        }

        impl<E, V> PartialEq for $token<E, V> {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
            }
        }

        impl<E, V> Eq for $token<E, V> {}
    };
}

impl_token_traits!(Attribute);
impl_token_traits!(MapAttribute);

///
/// AttributeBinding
///

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeBinding {
    /// The whole field.
    Value(Value),
    /// One entry of a map field.
    Entry { key: String, value: Value },
}

///
/// AttributeValue
///
/// An attribute of `E` bound to a value, or to one key of a map field.
///

pub struct AttributeValue<E> {
    name: &'static str,
    binding: AttributeBinding,
    _marker: PhantomData<fn() -> E>,
}

impl<E> AttributeValue<E> {
    const fn from_binding(name: &'static str, binding: AttributeBinding) -> Self {
        Self {
            name,
            binding,
            _marker: PhantomData,
        }
    }

    /// Start a sequence with one attribute value.
    pub fn with<V: FieldValue>(
        attribute: Attribute<E, V>,
        value: impl Into<V>,
    ) -> AttributeValues<E> {
        AttributeValues::new().with(attribute, value)
    }

    /// Start a sequence with one map entry.
    pub fn with_entry<V: FieldValue>(
        attribute: MapAttribute<E, V>,
        key: impl Into<String>,
        value: impl Into<V>,
    ) -> AttributeValues<E> {
        AttributeValues::new().with_entry(attribute, key, value)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn binding(&self) -> &AttributeBinding {
        &self.binding
    }

    /// The bound value; for a map entry, the entry's value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        match &self.binding {
            AttributeBinding::Value(value) | AttributeBinding::Entry { value, .. } => value,
        }
    }

    #[must_use]
    pub fn map_key(&self) -> Option<&str> {
        match &self.binding {
            AttributeBinding::Value(_) => None,
            AttributeBinding::Entry { key, .. } => Some(key),
        }
    }

    #[must_use]
    pub const fn is_map_entry(&self) -> bool {
        matches!(self.binding, AttributeBinding::Entry { .. })
    }
}

impl<E> Clone for AttributeValue<E> {
    fn clone(&self) -> Self {
        Self::from_binding(self.name, self.binding.clone())
    }
}

impl<E> fmt::Debug for AttributeValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeValue")
            .field("name", &self.name)
            .field("binding", &self.binding)
            .finish()
    }
}

impl<E> PartialEq for AttributeValue<E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.binding == other.binding
    }
}

///
/// AttributeValues
///
/// Ordered builder for an attribute-value sequence of one declaring type.
/// Attributes of any other type are rejected at compile time.
///

pub struct AttributeValues<E> {
    values: Vec<AttributeValue<E>>,
}

impl<E> AttributeValues<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    #[must_use]
    pub fn with<V: FieldValue>(mut self, attribute: Attribute<E, V>, value: impl Into<V>) -> Self {
        self.values.push(attribute.bind(value));
        self
    }

    /// Bind an attribute to `Null`, clearing the field on update.
    #[must_use]
    pub fn with_null<V>(mut self, attribute: Attribute<E, V>) -> Self {
        self.values.push(AttributeValue::from_binding(
            attribute.name(),
            AttributeBinding::Value(Value::Null),
        ));
        self
    }

    #[must_use]
    pub fn with_entry<V: FieldValue>(
        mut self,
        attribute: MapAttribute<E, V>,
        key: impl Into<String>,
        value: impl Into<V>,
    ) -> Self {
        self.values.push(attribute.bind(key, value));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Vec<AttributeValue<E>> {
        self.values
    }
}

impl<E> Default for AttributeValues<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<AttributeValues<E>> for Vec<AttributeValue<E>> {
    fn from(values: AttributeValues<E>) -> Self {
        values.build()
    }
}

impl<E> fmt::Debug for AttributeValues<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

///
/// AttributeRemoval
///
/// A field of `E`, or one key of a map field, to delete from a stored
/// document.
///

pub struct AttributeRemoval<E> {
    name: &'static str,
    map_key: Option<String>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> AttributeRemoval<E> {
    const fn new(name: &'static str, map_key: Option<String>) -> Self {
        Self {
            name,
            map_key,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn map_key(&self) -> Option<&str> {
        self.map_key.as_deref()
    }
}

impl<E> Clone for AttributeRemoval<E> {
    fn clone(&self) -> Self {
        Self::new(self.name, self.map_key.clone())
    }
}

impl<E> fmt::Debug for AttributeRemoval<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeRemoval")
            .field("name", &self.name)
            .field("map_key", &self.map_key)
            .finish()
    }
}

impl<E> PartialEq for AttributeRemoval<E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.map_key == other.map_key
    }
}

///
/// ScalarLookup
///
/// Whole-field values of a sequence keyed by attribute name.
/// Map entries are not indexed; a name bound twice is rejected.
///

pub(crate) struct ScalarLookup<'a> {
    values: HashMap<&'static str, &'a Value>,
}

impl<'a> ScalarLookup<'a> {
    pub(crate) fn new<E>(
        origin: ErrorOrigin,
        values: &'a [AttributeValue<E>],
    ) -> Result<Self, Error> {
        let mut lookup = HashMap::with_capacity(values.len());

        for value in values {
            if let AttributeBinding::Value(bound) = &value.binding
                && lookup.insert(value.name, bound).is_some()
            {
                return Err(Error::invalid_argument(
                    origin,
                    format!("attribute bound more than once: {}", value.name),
                ));
            }
        }

        Ok(Self { values: lookup })
    }

    /// The bound value, treating `Null` as unbound.
    pub(crate) fn get(&self, name: &str) -> Option<&'a Value> {
        self.values
            .get(name)
            .copied()
            .filter(|value| !value.is_null())
    }
}

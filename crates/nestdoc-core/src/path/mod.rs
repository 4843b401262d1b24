//! Hierarchical document addressing.
//!
//! Paths have the shape `coll1/id1/coll2/id2/.../collN[/idN]`: one
//! `collection/id` pair per ancestor in declaration order, then the entity's
//! own collection and, when known, its id.


use crate::{
    attribute::{AttributeRemoval, AttributeValue, ScalarLookup},
    error::{Error, ErrorOrigin},
    registry::{MetadataRegistry, TypeMapper},
    traits::EntityKind,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FieldPath
///
/// Segments addressing one stored field: the field name, then a map key
/// for key-addressed values.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Eq, Hash, IntoIterator, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct FieldPath(#[into_iterator(owned, ref)] Vec<String>);

impl FieldPath {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    #[must_use]
    pub fn map_entry(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self(vec![name.into(), key.into()])
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

///
/// collection_path
///
/// Collection path for a live entity. Every parent id must be set.
///

pub fn collection_path<E: EntityKind>(
    registry: &MetadataRegistry,
    entity: &E,
) -> Result<String, Error> {
    let mapper = registry.type_mapper::<E>()?;

    collection_path_of(&mapper, entity)
}

///
/// document_path
///
/// Document path for a live entity; the bare collection path while the id
/// is still unset.
///

pub fn document_path<E: EntityKind>(
    registry: &MetadataRegistry,
    entity: &E,
) -> Result<String, Error> {
    let mapper = registry.type_mapper::<E>()?;

    document_path_of(&mapper, entity)
}

///
/// collection_path_from_values
///
/// Collection path from bound attribute values. Every parent id must be
/// bound to a non-null value.
///

pub fn collection_path_from_values<E: EntityKind>(
    registry: &MetadataRegistry,
    values: &[AttributeValue<E>],
) -> Result<String, Error> {
    ensure_not_empty(values)?;
    let mapper = registry.type_mapper::<E>()?;
    let lookup = ScalarLookup::new(ErrorOrigin::Path, values)?;

    collection_path_from_lookup(&mapper, &lookup)
}

///
/// document_path_from_values
///
/// Document path from bound attribute values. Unlike [`document_path`], the
/// id must be bound.
///

pub fn document_path_from_values<E: EntityKind>(
    registry: &MetadataRegistry,
    values: &[AttributeValue<E>],
) -> Result<String, Error> {
    ensure_not_empty(values)?;
    let mapper = registry.type_mapper::<E>()?;
    let lookup = ScalarLookup::new(ErrorOrigin::Path, values)?;

    let id = lookup
        .get(mapper.id_field())
        .and_then(Value::to_segment)
        .ok_or_else(|| Error::missing_attribute(ErrorOrigin::Path, mapper.id_field()))?;
    let collection = collection_path_from_lookup(&mapper, &lookup)?;

    Ok(format!("{collection}/{id}"))
}

///
/// field_paths
///
/// One field path per attribute value, in input order. Field names are
/// rendered through the registry's naming strategy.
///

pub fn field_paths<E: EntityKind>(
    registry: &MetadataRegistry,
    values: &[AttributeValue<E>],
) -> Result<Vec<FieldPath>, Error> {
    let mapper = registry.type_mapper::<E>()?;

    values
        .iter()
        .map(|value| field_path_of(&mapper, value.name(), value.map_key()))
        .collect()
}

/// One field path per removal, in input order.
pub fn removal_paths<E: EntityKind>(
    registry: &MetadataRegistry,
    removals: &[AttributeRemoval<E>],
) -> Result<Vec<FieldPath>, Error> {
    let mapper = registry.type_mapper::<E>()?;

    removals
        .iter()
        .map(|removal| field_path_of(&mapper, removal.name(), removal.map_key()))
        .collect()
}

// ----------------------------------------------------------------------------
// Mapper-level rendering
// ----------------------------------------------------------------------------

pub(crate) fn collection_path_of<E>(mapper: &TypeMapper<E>, entity: &E) -> Result<String, Error> {
    let mut path = String::new();

    for parent in mapper.parents() {
        let id = mapper
            .get_value(entity, parent.local_field)?
            .to_segment()
            .ok_or_else(|| {
                Error::declaration(
                    ErrorOrigin::Path,
                    format!(
                        "parent id not set: {}.{}",
                        mapper.path(),
                        parent.local_field
                    ),
                )
            })?;
        push_parent(&mut path, parent.collection, &id);
    }
    path.push_str(mapper.collection());

    Ok(path)
}

pub(crate) fn document_path_of<E>(mapper: &TypeMapper<E>, entity: &E) -> Result<String, Error> {
    let mut path = collection_path_of(mapper, entity)?;

    if let Some(id) = mapper.id_value(entity)?.to_segment() {
        path.push('/');
        path.push_str(&id);
    }

    Ok(path)
}

fn field_path_of<E>(
    mapper: &TypeMapper<E>,
    name: &str,
    map_key: Option<&str>,
) -> Result<FieldPath, Error> {
    let stored = mapper.stored_name(name).ok_or_else(|| {
        Error::declaration(
            ErrorOrigin::Path,
            format!("unable to access field '{name}' on {}", mapper.path()),
        )
    })?;

    Ok(match map_key {
        Some(key) => FieldPath::map_entry(stored, key),
        None => FieldPath::field(stored),
    })
}

fn collection_path_from_lookup<E>(
    mapper: &TypeMapper<E>,
    lookup: &ScalarLookup<'_>,
) -> Result<String, Error> {
    let mut path = String::new();

    for parent in mapper.parents() {
        let id = lookup
            .get(parent.local_field)
            .and_then(Value::to_segment)
            .ok_or_else(|| Error::missing_attribute(ErrorOrigin::Path, parent.local_field))?;
        push_parent(&mut path, parent.collection, &id);
    }
    path.push_str(mapper.collection());

    Ok(path)
}

fn push_parent(path: &mut String, collection: &str, id: &str) {
    path.push_str(collection);
    path.push('/');
    path.push_str(id);
    path.push('/');
}

fn ensure_not_empty<E: EntityKind>(values: &[AttributeValue<E>]) -> Result<(), Error> {
    if values.is_empty() {
        return Err(Error::invalid_argument(
            ErrorOrigin::Path,
            format!("no attribute values supplied for {}", E::PATH),
        ));
    }

    Ok(())
}

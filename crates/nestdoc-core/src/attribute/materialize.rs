use crate::{
    attribute::{AttributeBinding, AttributeValue, ScalarLookup},
    error::{Error, ErrorDetail, ErrorOrigin},
    registry::{MetadataRegistry, TypeMapper},
    traits::EntityKind,
    value::Value,
};
use std::collections::BTreeMap;

///
/// create_entity
///
/// Reconstruct an `E` from an attribute-value sequence.
///
/// The id attribute must be bound. Fields without a binding keep their
/// `Default` value; map entries are merged into the map field. Any failure
/// while applying values is reported as a persistence error wrapping the
/// cause.
///

pub fn create_entity<E: EntityKind>(
    registry: &MetadataRegistry,
    values: &[AttributeValue<E>],
) -> Result<E, Error> {
    let mapper = registry.type_mapper::<E>()?;

    apply_values(&mapper, values).map_err(|err| {
        if err.is_persistence() {
            err
        } else {
            Error::persistence_caused_by(
                ErrorOrigin::Materialize,
                format!("unable to create entity: {}", E::PATH),
                err,
            )
        }
    })
}

fn apply_values<E: EntityKind>(
    mapper: &TypeMapper<E>,
    values: &[AttributeValue<E>],
) -> Result<E, Error> {
    let lookup = ScalarLookup::new(ErrorOrigin::Materialize, values)?;

    if lookup.get(mapper.id_field()).is_none() {
        return Err(Error::persistence(
            ErrorOrigin::Materialize,
            format!("id value not set: {}.{}", E::PATH, mapper.id_field()),
        )
        .with_detail(ErrorDetail::MissingAttribute {
            field: mapper.id_field(),
        }));
    }

    let mut entity = E::default();
    let mut entries: Vec<(&'static str, BTreeMap<String, Value>)> = Vec::new();

    for value in values {
        match value.binding() {
            AttributeBinding::Value(bound) => {
                mapper.set_value(&mut entity, value.name(), bound.clone())?;
            }
            AttributeBinding::Entry { key, value: bound } => {
                let index = match entries.iter().position(|(name, _)| *name == value.name()) {
                    Some(index) => index,
                    None => {
                        entries.push((value.name(), BTreeMap::new()));
                        entries.len() - 1
                    }
                };
                entries[index].1.insert(key.clone(), bound.clone());
            }
        }
    }

    for (name, map) in entries {
        let accessor = mapper.require_accessor(ErrorOrigin::Materialize, name)?;
        if !accessor.kind.is_map() {
            return Err(Error::type_mismatch(
                ErrorOrigin::Materialize,
                format!("field {}.{name} is not a map", E::PATH),
            ));
        }

        // Entries land on top of whatever a whole-map binding already set.
        let merged = match (accessor.get)(&entity) {
            Value::Map(mut existing) => {
                existing.extend(map);
                existing
            }
            _ => map,
        };
        mapper.set_value(&mut entity, name, Value::Map(merged))?;
    }

    Ok(entity)
}

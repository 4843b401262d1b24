//! Required-id validation.
//!
//! An entity may only reach the store once its own id and every parent id
//! are set.

use crate::{
    error::{Error, ErrorOrigin},
    obs::MetricsEvent,
    registry::{MetadataRegistry, TypeMapper},
    traits::EntityKind,
};
use std::collections::BTreeSet;

/// The entity's own id field plus every parent id field.
pub fn required_id_fields<E: EntityKind>(
    registry: &MetadataRegistry,
) -> Result<BTreeSet<&'static str>, Error> {
    let mapper = registry.type_mapper::<E>()?;

    Ok(required_fields_of(&mapper).collect())
}

///
/// validate_ids_not_null
///
/// Fail on the first required id field that holds no value. Other fields
/// are not inspected.
///

pub fn validate_ids_not_null<E: EntityKind>(
    registry: &MetadataRegistry,
    entity: &E,
) -> Result<(), Error> {
    let mapper = registry.type_mapper::<E>()?;

    validate_with(registry, &mapper, entity)
}

pub(crate) fn validate_with<E: EntityKind>(
    registry: &MetadataRegistry,
    mapper: &TypeMapper<E>,
    entity: &E,
) -> Result<(), Error> {
    check_not_null(registry, mapper, entity, required_fields_of(mapper))
}

/// Parent ids only; the entity's own id may still be unassigned.
pub(crate) fn validate_parents_with<E: EntityKind>(
    registry: &MetadataRegistry,
    mapper: &TypeMapper<E>,
    entity: &E,
) -> Result<(), Error> {
    let parents = mapper.parents().iter().map(|p| p.local_field);

    check_not_null(registry, mapper, entity, parents)
}

fn check_not_null<E: EntityKind>(
    registry: &MetadataRegistry,
    mapper: &TypeMapper<E>,
    entity: &E,
    fields: impl IntoIterator<Item = &'static str>,
) -> Result<(), Error> {
    for field in fields {
        if mapper.get_value(entity, field)?.is_null() {
            tracing::debug!(entity = E::PATH, field, "required id field is null");
            registry.record(MetricsEvent::ValidationFailed {
                entity_path: E::PATH,
            });

            return Err(Error::persistence_caused_by(
                ErrorOrigin::Validate,
                format!("unable to validate {}", E::PATH),
                Error::null_required_field(E::PATH, field),
            ));
        }
    }

    Ok(())
}

// Own id first, then parents in declaration order.
fn required_fields_of<E>(mapper: &TypeMapper<E>) -> impl Iterator<Item = &'static str> + '_ {
    std::iter::once(mapper.id_field()).chain(mapper.parents().iter().map(|p| p.local_field))
}

use crate::{
    error::{Error, ErrorOrigin},
    registry::TypeMapper,
    traits::EntityKind,
    value::Value,
};
use std::collections::BTreeMap;

/// One stored document: stored field name → value.
pub type Document = BTreeMap<String, Value>;

/// Render every mapped field of `entity` under its stored name.
#[must_use]
pub fn to_document<E>(mapper: &TypeMapper<E>, entity: &E) -> Document {
    mapper
        .stored_fields()
        .map(|(name, accessor)| (name.to_string(), (accessor.get)(entity)))
        .collect()
}

///
/// from_document
///
/// Rebuild an entity from a stored document. Mapped fields missing from the
/// document keep their default; stored fields with no mapping are skipped.
///

pub fn from_document<E: EntityKind>(
    mapper: &TypeMapper<E>,
    document: &Document,
) -> Result<E, Error> {
    let mut entity = E::default();

    for (name, accessor) in mapper.stored_fields() {
        if let Some(value) = document.get(name) {
            (accessor.set)(&mut entity, value.clone()).map_err(|rejected| {
                Error::persistence_caused_by(
                    ErrorOrigin::Materialize,
                    format!("unable to read stored field '{name}' of {}", E::PATH),
                    Error::value_mismatch(E::PATH, accessor.name, &rejected),
                )
            })?;
        }
    }

    if tracing::enabled!(tracing::Level::TRACE) {
        for name in document.keys() {
            if !mapper.stored_fields().any(|(stored, _)| stored == name) {
                tracing::trace!(entity = E::PATH, field = %name, "unmapped stored field skipped");
            }
        }
    }

    Ok(entity)
}

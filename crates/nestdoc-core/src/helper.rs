//! Entity-level façade over one registry.

use crate::{
    attribute::{self, AttributeValue},
    error::Error,
    path::{self, FieldPath},
    registry::{MetadataRegistry, TypeMapper},
    traits::EntityKind,
    validate,
    value::Value,
};
use chrono::{DateTime, Utc};
use std::{collections::BTreeSet, sync::Arc};

///
/// EntityHelper
///
/// Every metadata, path and validation operation for entities mapped by one
/// registry, plus id and timestamp access.
///

#[derive(Clone, Copy, Debug)]
pub struct EntityHelper<'r> {
    registry: &'r MetadataRegistry,
}

impl MetadataRegistry {
    #[must_use]
    pub const fn helper(&self) -> EntityHelper<'_> {
        EntityHelper::new(self)
    }
}

impl<'r> EntityHelper<'r> {
    #[must_use]
    pub const fn new(registry: &'r MetadataRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'r MetadataRegistry {
        self.registry
    }

    pub fn type_mapper<E: EntityKind>(&self) -> Result<Arc<TypeMapper<E>>, Error> {
        self.registry.type_mapper::<E>()
    }

    //
    // Paths
    //

    pub fn collection_path<E: EntityKind>(&self, entity: &E) -> Result<String, Error> {
        path::collection_path(self.registry, entity)
    }

    pub fn document_path<E: EntityKind>(&self, entity: &E) -> Result<String, Error> {
        path::document_path(self.registry, entity)
    }

    pub fn collection_path_from_values<E: EntityKind>(
        &self,
        values: &[AttributeValue<E>],
    ) -> Result<String, Error> {
        path::collection_path_from_values(self.registry, values)
    }

    pub fn document_path_from_values<E: EntityKind>(
        &self,
        values: &[AttributeValue<E>],
    ) -> Result<String, Error> {
        path::document_path_from_values(self.registry, values)
    }

    pub fn field_paths<E: EntityKind>(
        &self,
        values: &[AttributeValue<E>],
    ) -> Result<Vec<FieldPath>, Error> {
        path::field_paths(self.registry, values)
    }

    //
    // Materialization & validation
    //

    pub fn create_entity<E: EntityKind>(&self, values: &[AttributeValue<E>]) -> Result<E, Error> {
        attribute::create_entity(self.registry, values)
    }

    pub fn required_id_fields<E: EntityKind>(&self) -> Result<BTreeSet<&'static str>, Error> {
        validate::required_id_fields::<E>(self.registry)
    }

    pub fn validate_ids_not_null<E: EntityKind>(&self, entity: &E) -> Result<(), Error> {
        validate::validate_ids_not_null(self.registry, entity)
    }

    //
    // Id
    //

    /// The entity's id as a path segment, `None` while unset.
    pub fn id<E: EntityKind>(&self, entity: &E) -> Result<Option<String>, Error> {
        let mapper = self.registry.type_mapper::<E>()?;

        Ok(mapper.id_value(entity)?.to_segment())
    }

    pub fn set_id<E: EntityKind>(&self, entity: &mut E, id: impl Into<Value>) -> Result<(), Error> {
        let mapper = self.registry.type_mapper::<E>()?;

        mapper.set_value(entity, mapper.id_field(), id.into())
    }

    //
    // Timestamps
    //

    /// Stamp the create-time field, if one is declared, with the current time.
    pub fn set_create_time<E: EntityKind>(&self, entity: &mut E) -> Result<bool, Error> {
        self.set_create_time_at(entity, Utc::now())
    }

    pub fn set_create_time_at<E: EntityKind>(
        &self,
        entity: &mut E,
        at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mapper = self.registry.type_mapper::<E>()?;

        stamp(&mapper, entity, mapper.create_time_field(), at)
    }

    /// Stamp the update-time field with the current time. Returns whether
    /// the entity declares one.
    pub fn set_update_time<E: EntityKind>(&self, entity: &mut E) -> Result<bool, Error> {
        self.set_update_time_at(entity, Utc::now())
    }

    pub fn set_update_time_at<E: EntityKind>(
        &self,
        entity: &mut E,
        at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mapper = self.registry.type_mapper::<E>()?;

        stamp(&mapper, entity, mapper.update_time_field(), at)
    }

    pub fn update_time_field<E: EntityKind>(&self) -> Result<Option<&'static str>, Error> {
        Ok(self.registry.type_mapper::<E>()?.update_time_field())
    }
}

fn stamp<E>(
    mapper: &TypeMapper<E>,
    entity: &mut E,
    field: Option<&'static str>,
    at: DateTime<Utc>,
) -> Result<bool, Error> {
    match field {
        Some(field) => {
            mapper.set_value(entity, field, Value::Timestamp(at))?;
            Ok(true)
        }
        None => Ok(false),
    }
}

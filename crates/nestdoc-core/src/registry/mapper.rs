use crate::{
    error::{Error, ErrorOrigin},
    model::field::FieldAccessor,
    registry::{
        MetadataRegistry,
        parent::{self, ParentSegment},
    },
    traits::EntityKind,
    value::Value,
};
use std::{collections::HashMap, fmt};

///
/// TypeMapper
///
/// Resolved, immutable metadata for one entity type: accessors by name,
/// id and timestamp fields, and the ordered parent chain.
///

pub struct TypeMapper<E> {
    path: &'static str,
    collection: &'static str,
    id_field: &'static str,
    create_time_field: Option<&'static str>,
    update_time_field: Option<&'static str>,
    parents: Vec<ParentSegment>,
    fields: Vec<FieldAccessor<E>>,
    stored_names: Vec<String>,
    by_name: HashMap<&'static str, usize>,
}

impl<E: EntityKind> TypeMapper<E> {
    /// Resolve `E`'s declaration into a mapper.
    pub(crate) fn build(registry: &MetadataRegistry) -> Result<Self, Error> {
        let descriptor = E::describe();

        if descriptor.collection.is_empty() {
            return Err(Error::declaration(
                ErrorOrigin::Registry,
                format!("no collection declared for entity: {}", E::PATH),
            ));
        }

        let fields = E::field_accessors();
        let mut by_name = HashMap::with_capacity(fields.len());
        for (index, accessor) in fields.iter().enumerate() {
            if by_name.insert(accessor.name, index).is_some() {
                return Err(Error::declaration(
                    ErrorOrigin::Registry,
                    format!("duplicate field accessor '{}' on {}", accessor.name, E::PATH),
                ));
            }
        }

        let resolve = |role: &str, field: &'static str| -> Result<&'static str, Error> {
            if by_name.contains_key(field) {
                Ok(field)
            } else {
                Err(Error::declaration(
                    ErrorOrigin::Registry,
                    format!("unable to access {role} field '{field}' on {}", E::PATH),
                ))
            }
        };

        let id_field = resolve("id", descriptor.id_field)?;
        let create_time_field = descriptor
            .create_time_field
            .map(|field| resolve("create time", field))
            .transpose()?;
        let update_time_field = descriptor
            .update_time_field
            .map(|field| resolve("update time", field))
            .transpose()?;
        for parent in &descriptor.parents {
            resolve("parent id", parent.local_field)?;
        }

        let parents = parent::resolve_parent_segments(registry, E::PATH, &descriptor.parents)?;

        let naming = registry.config().naming;
        let stored_names: Vec<String> = fields.iter().map(|f| naming.apply(f.name)).collect();
        let mut by_stored = HashMap::with_capacity(stored_names.len());
        for (stored, accessor) in stored_names.iter().zip(&fields) {
            if let Some(previous) = by_stored.insert(stored.as_str(), accessor.name) {
                return Err(Error::declaration(
                    ErrorOrigin::Registry,
                    format!(
                        "fields '{previous}' and '{}' share stored name '{stored}' on {}",
                        accessor.name,
                        E::PATH
                    ),
                ));
            }
        }

        Ok(Self {
            path: E::PATH,
            collection: descriptor.collection,
            id_field,
            create_time_field,
            update_time_field,
            parents,
            fields,
            stored_names,
            by_name,
        })
    }
}

impl<E> TypeMapper<E> {
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub const fn collection(&self) -> &'static str {
        self.collection
    }

    #[must_use]
    pub const fn id_field(&self) -> &'static str {
        self.id_field
    }

    #[must_use]
    pub const fn create_time_field(&self) -> Option<&'static str> {
        self.create_time_field
    }

    #[must_use]
    pub const fn update_time_field(&self) -> Option<&'static str> {
        self.update_time_field
    }

    /// Ancestor segments in nesting order, outermost first.
    #[must_use]
    pub fn parents(&self) -> &[ParentSegment] {
        &self.parents
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldAccessor<E>] {
        &self.fields
    }

    #[must_use]
    pub fn accessor(&self, name: &str) -> Option<&FieldAccessor<E>> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Field name as written to the store under the registry's naming strategy.
    #[must_use]
    pub fn stored_name(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&index| self.stored_names[index].as_str())
    }

    /// Accessors paired with their stored names, in declaration order.
    pub fn stored_fields(&self) -> impl Iterator<Item = (&str, &FieldAccessor<E>)> {
        self.stored_names
            .iter()
            .map(String::as_str)
            .zip(self.fields.iter())
    }

    pub(crate) fn require_accessor(
        &self,
        origin: ErrorOrigin,
        name: &str,
    ) -> Result<&FieldAccessor<E>, Error> {
        self.accessor(name).ok_or_else(|| {
            Error::declaration(
                origin,
                format!("unable to access field '{name}' on {}", self.path),
            )
        })
    }

    /// Read a field by name.
    pub fn get_value(&self, entity: &E, name: &str) -> Result<Value, Error> {
        let accessor = self.require_accessor(ErrorOrigin::Attribute, name)?;

        Ok((accessor.get)(entity))
    }

    /// Write a field by name, rejecting values of the wrong shape.
    pub fn set_value(&self, entity: &mut E, name: &str, value: Value) -> Result<(), Error> {
        let accessor = self.require_accessor(ErrorOrigin::Attribute, name)?;

        (accessor.set)(entity, value)
            .map_err(|rejected| Error::value_mismatch(self.path, accessor.name, &rejected))
    }

    /// The id field's current value; `Null` when unset.
    pub fn id_value(&self, entity: &E) -> Result<Value, Error> {
        self.get_value(entity, self.id_field)
    }
}

impl<E> fmt::Debug for TypeMapper<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMapper")
            .field("path", &self.path)
            .field("collection", &self.collection)
            .field("id_field", &self.id_field)
            .field("create_time_field", &self.create_time_field)
            .field("update_time_field", &self.update_time_field)
            .field("parents", &self.parents)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

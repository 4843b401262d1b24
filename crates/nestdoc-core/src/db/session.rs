use crate::{
    attribute::{Attribute, AttributeRemoval, AttributeValue},
    db::{Document, DocumentStore, from_document, to_document},
    error::{Error, ErrorOrigin},
    obs::MetricsEvent,
    path::{self, FieldPath},
    registry::{MetadataRegistry, TypeMapper},
    traits::EntityKind,
    validate,
    value::Value,
};
use chrono::Utc;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Write {
    Create,
    Merge,
    Overwrite,
}

///
/// EntitySession
///
/// Drives entities into a [`DocumentStore`]: required ids are validated and
/// timestamps stamped before any path is resolved or any write is issued.
///

pub struct EntitySession<'r, S> {
    registry: &'r MetadataRegistry,
    store: S,
}

impl<'r, S: DocumentStore> EntitySession<'r, S> {
    #[must_use]
    pub const fn new(registry: &'r MetadataRegistry, store: S) -> Self {
        Self { registry, store }
    }

    #[must_use]
    pub const fn registry(&self) -> &'r MetadataRegistry {
        self.registry
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    ///
    /// create
    ///
    /// Write a new document, generating the id if none is set.
    /// Returns the document path written.
    ///
    pub fn create<E: EntityKind>(&self, entity: &mut E) -> Result<String, Error> {
        let helper = self.registry.helper();

        if helper.id(entity)?.is_none() {
            let mapper = self.registry.type_mapper::<E>()?;
            validate::validate_parents_with(self.registry, &mapper, entity)?;

            let collection = path::collection_path_of(&mapper, entity)?;
            helper.set_id(entity, self.store.next_id(&collection))?;
        }

        self.write(entity, Write::Create)
    }

    /// Merge-write an existing entity.
    pub fn set<E: EntityKind>(&self, entity: &mut E) -> Result<String, Error> {
        self.write(entity, Write::Merge)
    }

    /// Overwrite an existing entity, dropping stored fields it no longer maps.
    pub fn set_overwrite<E: EntityKind>(&self, entity: &mut E) -> Result<String, Error> {
        self.write(entity, Write::Overwrite)
    }

    // validate → stamp → resolve path → store
    fn write<E: EntityKind>(&self, entity: &mut E, mode: Write) -> Result<String, Error> {
        let mapper = self.registry.type_mapper::<E>()?;
        validate::validate_with(self.registry, &mapper, entity)?;

        let helper = self.registry.helper();
        let now = Utc::now();
        if mode == Write::Create {
            helper.set_create_time_at(entity, now)?;
        }
        helper.set_update_time_at(entity, now)?;

        let path = path::document_path_of(&mapper, entity)?;
        let merge = mode == Write::Merge;
        self.store.set(&path, to_document(&mapper, entity), merge)?;

        tracing::debug!(entity = E::PATH, %path, merge, "document written");
        self.registry.record(MetricsEvent::DocumentWritten {
            entity_path: E::PATH,
        });

        Ok(path)
    }

    ///
    /// set_field
    ///
    /// Merge-write a single field of an existing entity, together with the
    /// update time when the entity declares one.
    ///
    pub fn set_field<E: EntityKind, V>(
        &self,
        entity: &mut E,
        attribute: Attribute<E, V>,
    ) -> Result<String, Error> {
        let mapper = self.registry.type_mapper::<E>()?;
        validate::validate_with(self.registry, &mapper, entity)?;
        self.registry.helper().set_update_time_at(entity, Utc::now())?;

        let mut document = Document::new();
        let fields = std::iter::once(attribute.name()).chain(mapper.update_time_field());
        for name in fields {
            let accessor = mapper.require_accessor(ErrorOrigin::Session, name)?;
            document.insert(stored_name(&mapper, name)?.to_string(), (accessor.get)(entity));
        }

        let path = path::document_path_of(&mapper, entity)?;
        self.store.set(&path, document, true)?;

        tracing::debug!(entity = E::PATH, %path, field = attribute.name(), "field written");
        self.registry.record(MetricsEvent::DocumentWritten {
            entity_path: E::PATH,
        });

        Ok(path)
    }

    ///
    /// update
    ///
    /// Partial update addressed by bound attribute values. Each value is
    /// written at its field path, in input order, followed by the update
    /// time when the entity declares one and the values do not bind it.
    ///
    pub fn update<E: EntityKind>(&self, values: &[AttributeValue<E>]) -> Result<String, Error> {
        let mapper = self.registry.type_mapper::<E>()?;
        let path = path::document_path_from_values(self.registry, values)?;

        let mut fields: Vec<(FieldPath, Value)> = path::field_paths(self.registry, values)?
            .into_iter()
            .zip(values.iter().map(|value| value.value().clone()))
            .collect();

        if let Some(field) = mapper.update_time_field()
            && !values.iter().any(|value| value.name() == field)
        {
            let name = stored_name(&mapper, field)?;
            fields.push((FieldPath::field(name), Value::Timestamp(Utc::now())));
        }

        let count = fields.len();
        self.store.update(&path, fields)?;

        tracing::debug!(entity = E::PATH, %path, fields = count, "document updated");
        self.registry.record(MetricsEvent::DocumentUpdated {
            entity_path: E::PATH,
        });

        Ok(path)
    }

    ///
    /// update_fields
    ///
    /// Partial update of a raw document path. Field names are rendered
    /// through the naming strategy; `name.key` addresses one map entry.
    ///
    pub fn update_fields<K, V>(
        &self,
        path: &str,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        if path.is_empty() {
            return Err(Error::invalid_argument(
                ErrorOrigin::Session,
                "empty document path in update",
            ));
        }

        let naming = self.registry.config().naming;
        let fields: Vec<(FieldPath, Value)> = fields
            .into_iter()
            .map(|(name, value)| {
                let field = match name.as_ref().split_once('.') {
                    Some((name, key)) => FieldPath::map_entry(naming.apply(name), key),
                    None => FieldPath::field(naming.apply(name.as_ref())),
                };

                (field, value.into())
            })
            .collect();

        if fields.is_empty() {
            return Err(Error::invalid_argument(
                ErrorOrigin::Session,
                format!("no fields supplied for update of {path}"),
            ));
        }

        let count = fields.len();
        self.store.update(path, fields)?;
        tracing::debug!(%path, fields = count, "document fields updated");

        Ok(())
    }

    ///
    /// remove
    ///
    /// Delete fields or map entries from the document addressed by bound
    /// id values. The update time is left as stored.
    ///
    pub fn remove<E: EntityKind>(
        &self,
        keys: &[AttributeValue<E>],
        removals: &[AttributeRemoval<E>],
    ) -> Result<String, Error> {
        if removals.is_empty() {
            return Err(Error::invalid_argument(
                ErrorOrigin::Session,
                format!("no fields to remove from {}", E::PATH),
            ));
        }

        let path = path::document_path_from_values(self.registry, keys)?;
        let fields = path::removal_paths(self.registry, removals)?;

        let count = fields.len();
        self.store.remove_fields(&path, fields)?;

        tracing::debug!(entity = E::PATH, %path, fields = count, "document fields removed");
        self.registry.record(MetricsEvent::DocumentUpdated {
            entity_path: E::PATH,
        });

        Ok(path)
    }

    pub fn delete<E: EntityKind>(&self, entity: &E) -> Result<String, Error> {
        let mapper = self.registry.type_mapper::<E>()?;
        validate::validate_with(self.registry, &mapper, entity)?;

        let path = path::document_path_of(&mapper, entity)?;
        self.store.delete(&path)?;

        tracing::debug!(entity = E::PATH, %path, "document deleted");
        self.registry.record(MetricsEvent::DocumentDeleted {
            entity_path: E::PATH,
        });

        Ok(path)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// Load the document addressed by bound id values.
    pub fn find_by_id<E: EntityKind>(
        &self,
        values: &[AttributeValue<E>],
    ) -> Result<Option<E>, Error> {
        let mapper = self.registry.type_mapper::<E>()?;
        let path = path::document_path_from_values(self.registry, values)?;

        let Some(document) = self.store.get(&path)? else {
            tracing::trace!(entity = E::PATH, %path, "document not found");
            return Ok(None);
        };

        from_document(&mapper, &document).map(Some)
    }
}

fn stored_name<'m, E>(mapper: &'m TypeMapper<E>, field: &str) -> Result<&'m str, Error> {
    mapper.stored_name(field).ok_or_else(|| {
        Error::declaration(
            ErrorOrigin::Session,
            format!("unable to access field '{field}' on {}", mapper.path()),
        )
    })
}

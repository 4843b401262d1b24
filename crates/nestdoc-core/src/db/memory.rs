use crate::{
    db::{Document, DocumentStore},
    error::{Error, ErrorOrigin},
    path::FieldPath,
    value::Value,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use ulid::Ulid;

///
/// MemoryStore
///
/// Thread-safe in-memory [`DocumentStore`], keyed by full document path.
/// Generated ids are ULIDs.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Document>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Stored document paths in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.documents.read().keys().cloned().collect()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, path: &str) -> Result<Option<Document>, Error> {
        Ok(self.documents.read().get(path).cloned())
    }

    fn set(&self, path: &str, document: Document, merge: bool) -> Result<(), Error> {
        let mut documents = self.documents.write();

        if merge && let Some(existing) = documents.get_mut(path) {
            existing.extend(document);
        } else {
            documents.insert(path.to_string(), document);
        }

        Ok(())
    }

    fn update(&self, path: &str, fields: Vec<(FieldPath, Value)>) -> Result<(), Error> {
        let mut documents = self.documents.write();
        let document = documents
            .get_mut(path)
            .ok_or_else(|| Error::document_not_found(path))?;

        for (field, value) in fields {
            set_nested(document, field.segments(), value)?;
        }

        Ok(())
    }

    fn remove_fields(&self, path: &str, fields: Vec<FieldPath>) -> Result<(), Error> {
        let mut documents = self.documents.write();
        let document = documents
            .get_mut(path)
            .ok_or_else(|| Error::document_not_found(path))?;

        for field in fields {
            remove_nested(document, field.segments())?;
        }

        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), Error> {
        self.documents.write().remove(path);

        Ok(())
    }

    fn next_id(&self, _collection_path: &str) -> String {
        Ulid::new().to_string()
    }
}

// Write `value` at `segments`, creating intermediate maps and replacing
// non-map values on the way down.
fn set_nested(
    document: &mut BTreeMap<String, Value>,
    segments: &[String],
    value: Value,
) -> Result<(), Error> {
    match segments {
        [] => Err(Error::invalid_argument(
            ErrorOrigin::Store,
            "empty field path in update",
        )),
        [field] => {
            document.insert(field.clone(), value);
            Ok(())
        }
        [field, rest @ ..] => {
            let slot = document.entry(field.clone()).or_insert(Value::Null);
            if let Value::Map(inner) = slot {
                return set_nested(inner, rest, value);
            }

            let mut inner = BTreeMap::new();
            set_nested(&mut inner, rest, value)?;
            *slot = Value::Map(inner);

            Ok(())
        }
    }
}

// Remove the value at `segments`; missing or non-map intermediates mean
// there is nothing to remove.
fn remove_nested(document: &mut BTreeMap<String, Value>, segments: &[String]) -> Result<(), Error> {
    match segments {
        [] => Err(Error::invalid_argument(
            ErrorOrigin::Store,
            "empty field path in remove",
        )),
        [field] => {
            document.remove(field);
            Ok(())
        }
        [field, rest @ ..] => match document.get_mut(field) {
            Some(Value::Map(inner)) => remove_nested(inner, rest),
            _ => Ok(()),
        },
    }
}

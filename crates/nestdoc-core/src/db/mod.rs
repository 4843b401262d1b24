//! Store boundary: the document store interface, an in-memory store, and
//! the session that drives entities through it.

pub mod document;
pub mod memory;
pub mod session;

pub use document::{Document, from_document, to_document};
pub use memory::MemoryStore;
pub use session::EntitySession;

use crate::{error::Error, path::FieldPath, value::Value};

///
/// DocumentStore
///
/// Hierarchical document store addressed by slash-delimited paths.
/// Implementations report failures as persistence errors with
/// [`ErrorOrigin::Store`](crate::error::ErrorOrigin::Store).
///

pub trait DocumentStore: Send + Sync {
    fn get(&self, path: &str) -> Result<Option<Document>, Error>;

    /// Write a document. With `merge`, fields not present in `document` are kept.
    fn set(&self, path: &str, document: Document, merge: bool) -> Result<(), Error>;

    /// Apply field updates, in order, to an existing document.
    fn update(&self, path: &str, fields: Vec<(FieldPath, Value)>) -> Result<(), Error>;

    /// Delete fields or map entries from an existing document. Absent
    /// fields are ignored.
    fn remove_fields(&self, path: &str, fields: Vec<FieldPath>) -> Result<(), Error>;

    fn delete(&self, path: &str) -> Result<(), Error>;

    /// A fresh document id under `collection_path`.
    fn next_id(&self, collection_path: &str) -> String;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn get(&self, path: &str) -> Result<Option<Document>, Error> {
        (**self).get(path)
    }

    fn set(&self, path: &str, document: Document, merge: bool) -> Result<(), Error> {
        (**self).set(path, document, merge)
    }

    fn update(&self, path: &str, fields: Vec<(FieldPath, Value)>) -> Result<(), Error> {
        (**self).update(path, fields)
    }

    fn remove_fields(&self, path: &str, fields: Vec<FieldPath>) -> Result<(), Error> {
        (**self).remove_fields(path, fields)
    }

    fn delete(&self, path: &str) -> Result<(), Error> {
        (**self).delete(path)
    }

    fn next_id(&self, collection_path: &str) -> String {
        (**self).next_id(collection_path)
    }
}

use crate::{traits::FieldValueKind, value::Value};
use std::fmt;

/// Read one field of `E` as a store value.
pub type FieldGetFn<E> = fn(&E) -> Value;

/// Write one field of `E`; hands the value back when its shape does not fit.
pub type FieldSetFn<E> = fn(&mut E, Value) -> Result<(), Value>;

///
/// FieldAccessor
///
/// Named get/set pair for one field of `E`.
/// Assembled once per type by its declaration; no reflection at call time.
///

pub struct FieldAccessor<E> {
    /// Field name as used by attributes and descriptors.
    pub name: &'static str,
    pub kind: FieldValueKind,
    pub get: FieldGetFn<E>,
    pub set: FieldSetFn<E>,
}

impl<E> FieldAccessor<E> {
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: FieldValueKind,
        get: FieldGetFn<E>,
        set: FieldSetFn<E>,
    ) -> Self {
        Self {
            name,
            kind,
            get,
            set,
        }
    }
}

// Manual impls: fn pointers are Copy regardless of `E`.
impl<E> Clone for FieldAccessor<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for FieldAccessor<E> {}

impl<E> fmt::Debug for FieldAccessor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

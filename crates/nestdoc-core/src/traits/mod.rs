mod field_value;

pub use field_value::*;

use crate::model::{entity::EntityDescriptor, field::FieldAccessor};

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================

///
/// Path
/// Fully-qualified type path, used for dispatch and diagnostics.
///

pub trait Path {
    const PATH: &'static str;
}

// ============================================================================
// ENTITY DECLARATION
// ============================================================================
//
// These traits describe *what an entity is* and how its fields are reached.
// They are the whole contract between a declaration source (the derive
// macro or a hand-written impl) and the metadata registry.
//

///
/// EntityKind
///
/// A type that maps to one document in a hierarchical store.
///
/// `describe` supplies the entity descriptor; `field_accessors` supplies the
/// per-field get/set table. Both are called once per registry, when the
/// type's mapper is first built.
///

pub trait EntityKind: Path + Default + Send + Sync + 'static {
    fn describe() -> EntityDescriptor;

    fn field_accessors() -> Vec<FieldAccessor<Self>>;
}

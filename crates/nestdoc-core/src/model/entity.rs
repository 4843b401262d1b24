use crate::{
    error::Error,
    registry::MetadataRegistry,
    traits::{EntityKind, Path},
};
use std::{any::TypeId, fmt};

///
/// EntityDescriptor
///
/// Per-type declaration consumed by the metadata registry.
/// Parent references are kept in declaration order, outermost ancestor first.
///

#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    /// Collection the entity's documents live in.
    pub collection: &'static str,
    /// Field holding the document id.
    pub id_field: &'static str,
    pub create_time_field: Option<&'static str>,
    pub update_time_field: Option<&'static str>,
    pub parents: Vec<ParentReference>,
}

impl EntityDescriptor {
    #[must_use]
    pub const fn new(collection: &'static str, id_field: &'static str) -> Self {
        Self {
            collection,
            id_field,
            create_time_field: None,
            update_time_field: None,
            parents: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_create_time(mut self, field: &'static str) -> Self {
        self.create_time_field = Some(field);
        self
    }

    #[must_use]
    pub fn with_update_time(mut self, field: &'static str) -> Self {
        self.update_time_field = Some(field);
        self
    }

    /// Append a parent reference; call order is nesting order.
    #[must_use]
    pub fn with_parent(mut self, parent: ParentReference) -> Self {
        self.parents.push(parent);
        self
    }
}

///
/// ParentReference
///
/// A field on the child holding the id of one ancestor document.
///

#[derive(Clone, Copy, Debug)]
pub struct ParentReference {
    pub local_field: &'static str,
    pub target: ParentTarget,
}

impl ParentReference {
    /// Parent whose collection comes from another mapped entity.
    #[must_use]
    pub fn entity<P: EntityKind>(local_field: &'static str) -> Self {
        Self {
            local_field,
            target: ParentTarget::Entity(EntityRef::of::<P>()),
        }
    }

    /// Parent living in an explicitly named collection.
    #[must_use]
    pub const fn collection(local_field: &'static str, collection: &'static str) -> Self {
        Self {
            local_field,
            target: ParentTarget::Collection(collection),
        }
    }
}

///
/// ParentTarget
///

#[derive(Clone, Copy, Debug)]
pub enum ParentTarget {
    Collection(&'static str),
    Entity(EntityRef),
}

///
/// EntityRef
///
/// Type-erased handle on a mapped entity type.
/// Lets descriptors point at other entities without becoming generic.
///

#[derive(Clone, Copy)]
pub struct EntityRef {
    pub type_id: TypeId,
    pub path: &'static str,
    pub(crate) describe: fn() -> EntityDescriptor,
    pub(crate) resolve_collection: fn(&MetadataRegistry) -> Result<&'static str, Error>,
}

impl EntityRef {
    #[must_use]
    pub fn of<E: EntityKind>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            path: E::PATH,
            describe: E::describe,
            resolve_collection: resolve_collection::<E>,
        }
    }

    /// The referenced type's descriptor, straight from its declaration.
    #[must_use]
    pub fn describe(&self) -> EntityDescriptor {
        (self.describe)()
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.path).finish()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityRef {}

// Resolve through the registry so the referenced type is validated and cached
// like any other.
fn resolve_collection<E: EntityKind>(registry: &MetadataRegistry) -> Result<&'static str, Error> {
    registry.type_mapper::<E>().map(|mapper| mapper.collection())
}

//! Core of the nestdoc object-document mapper: entity declarations, the
//! metadata registry, typed attributes, hierarchical path building, id
//! validation and the document store boundary.

#[macro_use]
mod macros;

// public exports are one module level down
pub mod attribute;
pub mod config;
pub mod db;
pub mod error;
pub mod helper;
pub mod model;
pub mod obs;
pub mod path;
pub mod registry;
pub mod traits;
pub mod validate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary: declarations, tokens, values
/// and the registry entry point.
///

pub mod prelude {
    pub use crate::{
        attribute::{Attribute, AttributeRemoval, AttributeValue, AttributeValues, MapAttribute},
        error::Error,
        model::entity::{EntityDescriptor, ParentReference},
        path::FieldPath,
        registry::MetadataRegistry,
        traits::{EntityKind, FieldValue, Path},
        value::Value,
    };
}

//! ## Crate layout
//! - `core`: registry, attributes, paths, validation, values and the store boundary.
//! - `Entity`: derive macro declaring a struct as a mapped entity.
//!
//! Core modules are re-exported at the top level so generated code can name
//! them as `::nestdoc::<module>`.

pub use nestdoc_core as core;
pub use nestdoc_core::{
    attribute, config, db, error, field_accessor, helper, model, obs, path, registry, traits,
    validate, value,
};
pub use nestdoc_derive::Entity;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
/// Entity vocabulary plus the session and in-memory store.
///

pub mod prelude {
    pub use crate::Entity;
    pub use crate::core::{
        db::{DocumentStore, EntitySession, MemoryStore},
        helper::EntityHelper,
        prelude::*,
    };
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}

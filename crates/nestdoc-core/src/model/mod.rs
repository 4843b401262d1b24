//! Declared entity model.
//!
//! Types here are what a declaration source hands to the registry: the
//! entity descriptor (collection, id, timestamps, parent references) and
//! the per-field accessor table. The registry resolves them into a
//! [`TypeMapper`](crate::registry::TypeMapper).
//!
//! In general:
//! - Declarations define *what exists*
//! - `registry` defines *what runs*
pub mod entity;
pub mod field;

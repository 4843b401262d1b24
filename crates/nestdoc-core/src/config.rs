//! Registry configuration.
//!
//! Configuration is plain data: construct it in code or deserialize it from
//! whatever format the host application already uses.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How field names are written into stored documents and field paths.
    pub naming: NamingStrategy,
}

impl Config {
    #[must_use]
    pub const fn with_naming(naming: NamingStrategy) -> Self {
        Self { naming }
    }
}

///
/// NamingStrategy
///
/// Mapping from declared field names to stored field names.
/// Attribute lookups always use the declared name.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Store fields under their declared names.
    #[default]
    Identity,
    /// `post_id` → `postId`
    CamelCase,
    /// `postId` → `post_id`
    SnakeCase,
    /// `post_id` → `post-id`
    KebabCase,
    /// `post_id` → `PostId`
    PascalCase,
}

impl NamingStrategy {
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Identity => name.to_string(),
            Self::CamelCase => name.to_case(Case::Camel),
            Self::SnakeCase => name.to_case(Case::Snake),
            Self::KebabCase => name.to_case(Case::Kebab),
            Self::PascalCase => name.to_case(Case::Pascal),
        }
    }
}

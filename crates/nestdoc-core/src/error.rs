use crate::value::Value;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error with a stable class + origin classification.
/// Every failure in the core surfaces as one of these before any path or
/// entity is produced.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,

    /// Wrapped cause, if this error was raised on behalf of another one.
    #[source]
    pub source: Option<Box<Self>>,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    /// Construct a declaration error (missing or malformed entity metadata).
    pub fn declaration(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Declaration, origin, message)
    }

    /// Construct an invalid-argument error (caller supplied unusable input).
    pub fn invalid_argument(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidArgument, origin, message)
    }

    /// Construct a type-mismatch error.
    pub fn type_mismatch(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::TypeMismatch, origin, message)
    }

    /// Construct a persistence error.
    pub fn persistence(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Persistence, origin, message)
    }

    /// Wrap `cause` into a persistence error raised from `origin`.
    pub fn persistence_caused_by(
        origin: ErrorOrigin,
        message: impl Into<String>,
        cause: Self,
    ) -> Self {
        Self::persistence(origin, message).with_source(cause)
    }

    /// A required id or id reference holds no value.
    pub fn null_required_field(entity_path: &str, field: &'static str) -> Self {
        Self::persistence(
            ErrorOrigin::Validate,
            format!("id/id references are required: {entity_path}.{field}"),
        )
        .with_detail(ErrorDetail::NullField { field })
    }

    /// A field accessor rejected a value of the wrong shape.
    pub fn value_mismatch(entity_path: &str, field: &'static str, value: &Value) -> Self {
        let found = value.variant_name();

        Self::type_mismatch(
            ErrorOrigin::Attribute,
            format!("field {entity_path}.{field} cannot hold a {found} value"),
        )
        .with_detail(ErrorDetail::ValueMismatch { field, found })
    }

    /// An entity is reachable from itself through its parent references.
    pub fn parent_cycle(cycle: Vec<&'static str>) -> Self {
        Self::declaration(
            ErrorOrigin::Registry,
            format!("cyclic parent references: {}", cycle.join(" -> ")),
        )
        .with_detail(ErrorDetail::ParentCycle { cycle })
    }

    /// An attribute-value sequence lacks a field the operation needs.
    pub fn missing_attribute(origin: ErrorOrigin, field: &'static str) -> Self {
        Self::invalid_argument(origin, format!("attribute value not set: {field}"))
            .with_detail(ErrorDetail::MissingAttribute { field })
    }

    /// No document stored at `path`.
    pub fn document_not_found(path: impl Into<String>) -> Self {
        let path = path.into();

        Self::persistence(ErrorOrigin::Store, format!("no document at path: {path}"))
            .with_detail(ErrorDetail::NotFound { path })
    }

    #[must_use]
    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Self) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub const fn is_declaration(&self) -> bool {
        matches!(self.class, ErrorClass::Declaration)
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidArgument)
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.class, ErrorClass::TypeMismatch)
    }

    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self.class, ErrorClass::Persistence)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::NotFound { .. }))
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, class-specific detail carried by [`Error`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ErrorDetail {
    #[error("field '{field}' is null")]
    NullField { field: &'static str },

    #[error("field '{field}' rejected a {found} value")]
    ValueMismatch {
        field: &'static str,
        found: &'static str,
    },

    #[error("parent cycle: {}", .cycle.join(" -> "))]
    ParentCycle { cycle: Vec<&'static str> },

    #[error("attribute '{field}' missing")]
    MissingAttribute { field: &'static str },

    #[error("document '{path}' not found")]
    NotFound { path: String },
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Entity metadata is missing or cannot be resolved. Never recovered.
    Declaration,
    /// The caller supplied input the operation cannot use.
    InvalidArgument,
    /// A value or attribute does not fit its declared target.
    TypeMismatch,
    /// Validation or reconstruction failed before reaching the store,
    /// or the store itself reported a failure.
    Persistence,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Declaration => "declaration",
            Self::InvalidArgument => "invalid_argument",
            Self::TypeMismatch => "type_mismatch",
            Self::Persistence => "persistence",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Registry,
    Attribute,
    Path,
    Validate,
    Materialize,
    Session,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Registry => "registry",
            Self::Attribute => "attribute",
            Self::Path => "path",
            Self::Validate => "validate",
            Self::Materialize => "materialize",
            Self::Session => "session",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}

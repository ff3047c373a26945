//! Error types for entity definitions and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building or validating entity metadata.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(relmap::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(relmap::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Lookup of an entity that is not registered.
    #[error("unknown entity `{name}`")]
    #[diagnostic(
        code(relmap::schema::unknown_entity),
        help("register the entity before resolving relations for it")
    )]
    UnknownEntity { name: String },

    /// A relation target or embedded type that is not defined.
    #[error("unknown type `{type_name}` in `{owner}.{field}`")]
    #[diagnostic(code(relmap::schema::unknown_type))]
    UnknownType {
        owner: String,
        field: String,
        type_name: String,
    },

    /// Invalid field definition.
    #[error("invalid field `{owner}.{field}`: {message}")]
    #[diagnostic(code(relmap::schema::invalid_field))]
    InvalidField {
        owner: String,
        field: String,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(relmap::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Validation error with multiple issues.
    #[error("entity metadata validation failed with {count} error(s)")]
    #[diagnostic(code(relmap::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create an unknown entity error.
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    /// Create an unknown type error.
    pub fn unknown_type(
        owner: impl Into<String>,
        field: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            owner: owner.into(),
            field: field.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        owner: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            owner: owner.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_error_messages() {
        let err = SchemaError::unknown_type("Product", "owner", "Owner");
        assert_eq!(err.to_string(), "unknown type `Owner` in `Product.owner`");

        let err = SchemaError::invalid_field("Owner", "address.street", "field names cannot contain `.`");
        assert!(err.to_string().contains("Owner.address.street"));

        let err = SchemaError::duplicate("entity", "Product");
        assert_eq!(err.to_string(), "duplicate entity `Product`");
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = SchemaError::unknown_entity("Ghost");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("relmap::schema::unknown_entity"));
        assert!(err.help().is_some());
    }
}

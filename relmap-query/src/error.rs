//! Error types for relation resolution with actionable messages.
//!
//! Every error carries a numeric code for programmatic handling, plus
//! optional context (entity, field path, fragment) and suggestions.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: R{category}{number}
//! - 1xxx: Query shape errors (missing field, unknown fragment)
//! - 2xxx: Document errors (parse failures, operation selection)
//!
//! ```rust
//! use relmap_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::field_not_found("products.store");
//! assert_eq!(err.code, ErrorCode::FieldNotFound);
//! assert!(err.to_string().contains("R1001"));
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for resolution operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Query shape errors (1xxx)
    /// A field name or dotted path did not resolve to a selection (R1001).
    FieldNotFound = 1001,
    /// A fragment spread references an undefined fragment (R1002).
    UnresolvedFragment = 1002,

    // Document errors (2xxx)
    /// The GraphQL document could not be parsed or used (R2001).
    InvalidDocument = 2001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "R1001").
    pub fn code(&self) -> String {
        format!("R{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FieldNotFound => "Field not found in query",
            Self::UnresolvedFragment => "Unresolved fragment spread",
            Self::InvalidDocument => "Invalid GraphQL document",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Suggestion for fixing an error.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The suggestion text.
    pub text: String,
    /// Optional code example.
    pub code: Option<String>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
        }
    }

    /// Add a code example.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The entity involved.
    pub entity: Option<String>,
    /// The field name or dotted path involved.
    pub field: Option<String>,
    /// The fragment involved.
    pub fragment: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<Suggestion>,
    /// Help text.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Create new empty context.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Errors that can occur while resolving relations from a query.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(suggestion));
        self
    }

    /// Add a code suggestion.
    pub fn with_code_suggestion(mut self, text: impl Into<String>, code: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(text).with_code(code));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.context.entity = Some(entity.into());
        self
    }

    /// Set the field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the fragment.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.context.fragment = Some(fragment.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create a field not found error for a field name or dotted path.
    pub fn field_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::FieldNotFound,
            format!("Could not locate field named \"{}\" in query info", path),
        )
        .with_field(&path)
        .with_suggestion("Take the field name and sub-path from the query being resolved")
        .with_code_suggestion(
            "Check membership first when the path is optional",
            format!("resolver.is_field_selected(\"{}\", &info)?", path),
        )
    }

    /// Create an unresolved fragment error.
    pub fn unresolved_fragment(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::UnresolvedFragment,
            format!("Fragment \"{}\" is not defined in the fragment table", name),
        )
        .with_fragment(&name)
        .with_suggestion(format!("Define `fragment {} on ...` in the same document", name))
        .with_help("The document should be validated before relations are resolved")
    }

    /// Create an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorCode::InvalidDocument, format!("Invalid GraphQL document: {}", message))
    }

    // ============== Error Type Checks ==============

    /// Check if this is a field not found error.
    pub fn is_field_not_found(&self) -> bool {
        self.code == ErrorCode::FieldNotFound
    }

    /// Check if this is an unresolved fragment error.
    pub fn is_unresolved_fragment(&self) -> bool {
        self.code == ErrorCode::UnresolvedFragment
    }

    /// Get the error code.
    pub fn error_code(&self) -> &ErrorCode {
        &self.code
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref entity) = self.context.entity {
            output.push_str(&format!("  → Entity: {}\n", entity));
        }
        if let Some(ref field) = self.context.field {
            output.push_str(&format!("  → Field: {}\n", field));
        }
        if let Some(ref fragment) = self.context.fragment {
            output.push_str(&format!("  → Fragment: {}\n", fragment));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion.text));
                if let Some(ref code) = suggestion.code {
                    output.push_str(&format!("     ```\n     {}\n     ```\n", code.replace('\n', "\n     ")));
                }
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

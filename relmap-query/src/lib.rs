//! # relmap-query
//!
//! Resolves the relations a GraphQL query needs from an ORM.
//!
//! Given the selections below a query field and metadata describing which
//! entity properties are relations, this crate builds the minimal set of
//! relation paths to eager load: no lazy N+1 loading for what the client
//! asked for, no joins for what it did not.
//!
//! This crate provides:
//! - Selection nodes and path lookup (`selection`)
//! - Query info built from GraphQL documents (`document`)
//! - The entity metadata contract (`metadata`)
//! - Relation maps and the resolver (`relations`)
//!
//! ## Resolving Relations
//!
//! ```rust
//! use relmap_query::{EntityMetadata, PropertyMetadata, QueryInfo, RelationResolver};
//! use serde_json::json;
//!
//! struct Shop;
//!
//! impl EntityMetadata for Shop {
//!     type Entity = &'static str;
//!
//!     fn property(&self, entity: &&'static str, path: &str) -> Option<PropertyMetadata<&'static str>> {
//!         match (*entity, path) {
//!             ("Product", "store") => Some(PropertyMetadata::relation("store", "Store")),
//!             ("Store", "owner") => Some(PropertyMetadata::relation("owner", "Owner")),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let info = QueryInfo::parse(
//!     "{ products { id store { name owner { name } } } }",
//!     "products",
//! )?;
//!
//! let relations = RelationResolver::new(Shop).resolve_for_query(&"Product", &info, None)?;
//!
//! assert_eq!(relations.to_nested(), json!({ "store": { "owner": true } }));
//! assert_eq!(relations.to_paths(), vec!["store", "store.owner"]);
//! # Ok::<(), relmap_query::QueryError>(())
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use relmap_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::unresolved_fragment("OwnerFragment");
//! assert_eq!(err.code, ErrorCode::UnresolvedFragment);
//! ```

pub mod document;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod relations;
pub mod selection;

pub use document::QueryInfo;
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult, Suggestion};
pub use metadata::{EntityMetadata, PropertyMetadata};
pub use relations::{RelationMap, RelationNode, RelationResolver};
pub use selection::{
    Field, FragmentDefinition, Fragments, InlineFragment, Selection, SelectionSet,
    find_named_field, is_selected,
};

// Re-export logging utilities
pub use logging::{get_log_format, get_log_level, init as init_logging, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::document::QueryInfo;
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::metadata::{EntityMetadata, PropertyMetadata};
    pub use crate::relations::{RelationMap, RelationResolver};
    pub use crate::selection::{Fragments, Selection};
}

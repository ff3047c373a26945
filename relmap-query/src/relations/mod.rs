//! Relation loading plans derived from GraphQL selections.
//!
//! This module provides:
//! - `RelationMap` for the nested set of relation paths to eager load
//! - `RelationResolver` for building one from a query's selections
//!
//! ## Example
//!
//! ```rust,ignore
//! // Resolve the relations selected below `products { ... }`
//! let resolver = RelationResolver::new(&registry);
//! let relations = resolver.resolve_for_query(&"Product".into(), &info, None)?;
//!
//! // Nested form: { "store": { "owner": true } }
//! let nested = relations.to_nested();
//!
//! // Flat form: ["store", "store.owner"]
//! let paths = relations.to_paths();
//! ```

mod map;
mod resolver;

pub use map::{RelationMap, RelationNode};
pub use resolver::RelationResolver;

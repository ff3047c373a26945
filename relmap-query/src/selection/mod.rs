//! Uniform access to GraphQL selection nodes.
//!
//! This module normalizes the three selection node kinds (field, fragment
//! spread, inline fragment) into a "name + child selection set" view and
//! provides dotted-path lookup over a selection tree:
//! - [`Selection::name`] for the node's name, if it has one
//! - [`Selection::selection_set`] for its effective children, resolving spreads
//! - [`find_named_field`] / [`is_selected`] for path lookup
//!
//! ## Example
//!
//! ```rust
//! use relmap_query::selection::{Fragments, Selection, is_selected};
//!
//! let root = Selection::field(
//!     "images",
//!     [Selection::field("sizes", [Selection::field("medium", [Selection::leaf("fileName")])])],
//! );
//!
//! assert!(is_selected("sizes.medium", &root, &Fragments::new())?);
//! assert!(!is_selected("sizes.small", &root, &Fragments::new())?);
//! # Ok::<(), relmap_query::QueryError>(())
//! ```

mod navigate;
mod node;

pub use navigate::{PATH_SEPARATOR, find_named_field, is_selected, path_segments};
pub use node::{
    Field, FragmentDefinition, FragmentSpread, Fragments, InlineFragment, Selection, SelectionSet,
};

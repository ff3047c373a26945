//! # Relmap
//!
//! Resolve the ORM relations a GraphQL query selects.
//!
//! A GraphQL resolver that loads entities through an ORM either joins every
//! relation up front or lazily loads each one on access (the N+1 problem).
//! Relmap reads the query's selections, consults entity metadata and
//! produces exactly the relation paths to eager load.
//!
//! Relmap provides:
//! - Selection navigation by dotted path, through fragments
//! - A relation map with nested and flat path views
//! - A relation resolver driven by entity metadata
//! - An entity registry loaded from code or `relmap.toml`
//!
//! ## Quick Start
//!
//! ```rust
//! use relmap::prelude::*;
//!
//! let registry: EntityRegistry = r#"
//!     [entities.Product.fields]
//!     store = { relation = "Store" }
//!
//!     [entities.Store.fields]
//!     owner = { relation = "Owner" }
//!
//!     [entities.Owner.fields]
//!     address = { embedded = "Address" }
//!
//!     [entities.Country]
//!
//!     [embeddables.Address.fields]
//!     country = { relation = "Country" }
//! "#
//! .parse::<RelmapConfig>()?
//! .into_registry()?;
//!
//! let info = QueryInfo::parse(
//!     r#"
//!     query {
//!         products {
//!             id
//!             store { owner { address { street country { name } } } }
//!         }
//!     }
//!     "#,
//!     "products",
//! )?;
//!
//! let relations = RelationResolver::new(&registry).resolve_for_query(&"Product".into(), &info, None)?;
//!
//! assert_eq!(
//!     relations.to_paths(),
//!     vec!["store", "store.owner", "store.owner.address.country"]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Selection navigation and relation resolution.
pub mod query {
    pub use relmap_query::*;
}

/// Entity metadata and configuration.
pub mod schema {
    pub use relmap_schema::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::query::{
        EntityMetadata, PropertyMetadata, QueryError, QueryInfo, RelationMap, RelationResolver,
    };
    pub use crate::schema::{Embeddable, Entity, EntityRegistry, RelmapConfig, SchemaError};
}

// Re-export key types at the crate root
pub use query::{QueryError, QueryInfo, RelationMap, RelationResolver};
pub use schema::{EntityRegistry, RelmapConfig, SchemaError};

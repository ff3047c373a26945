//! # relmap-schema
//!
//! Entity metadata for relation resolution.
//!
//! This crate provides:
//! - Entity, embeddable and field definitions (`ast`)
//! - An [`EntityRegistry`] implementing `relmap_query::EntityMetadata`
//! - Registry validation
//! - Configuration parser for `relmap.toml` files
//!
//! ## Example
//!
//! ```rust
//! use relmap_schema::{EntityRegistry, Entity, Embeddable, RelmapConfig};
//!
//! // Build a registry in code
//! let registry = EntityRegistry::new()
//!     .with_entity(Entity::new("Owner").column("name").embedded("address", "Address"))
//!     .with_entity(Entity::new("Country"))
//!     .with_embeddable(Embeddable::new("Address").relation("country", "Country"))
//!     .validate()?;
//! assert!(registry.field_at("Owner", "address.country").is_some());
//!
//! // Or load it from configuration
//! let config: RelmapConfig = r#"
//!     [entities.Country]
//!     [entities.Owner.fields]
//!     address = { embedded = "Address" }
//!     [embeddables.Address.fields]
//!     country = { relation = "Country" }
//! "#.parse()?;
//! assert_eq!(config.into_registry()?, registry.clone());
//! # Ok::<(), relmap_schema::SchemaError>(())
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod registry;
pub mod validator;

pub use ast::*;
pub use config::RelmapConfig;
pub use error::{SchemaError, SchemaResult};
pub use registry::EntityRegistry;
pub use validator::{Validator, validate_registry};

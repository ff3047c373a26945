//! Configuration file parsing for `relmap.toml`.
//!
//! ```toml
//! [debug]
//! log_level = "debug"
//! log_format = "pretty"
//!
//! [entities.Product]
//! table = "products"
//!
//! [entities.Product.fields]
//! id = { column = "int" }
//! owner = { relation = "Owner" }
//! images = { relation = "Image", kind = "one-to-many" }
//!
//! [entities.Owner.fields]
//! address = { embedded = "Address" }
//!
//! [embeddables.Address.fields]
//! street = { column = "string" }
//! country = { relation = "Country" }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::Path;
use std::str::FromStr;

use crate::ast::{Embeddable, Entity, FieldDef, RelationType};
use crate::error::{SchemaError, SchemaResult};
use crate::registry::EntityRegistry;

/// Main configuration structure for `relmap.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelmapConfig {
    /// Entity definitions, keyed by entity name.
    #[serde(default)]
    pub entities: IndexMap<SmolStr, EntityConfig>,

    /// Embeddable definitions, keyed by type name.
    #[serde(default)]
    pub embeddables: IndexMap<SmolStr, EmbeddableConfig>,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,
}

impl RelmapConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        content.parse()
    }

    /// Build a validated registry from the configuration.
    pub fn to_registry(&self) -> SchemaResult<EntityRegistry> {
        let mut registry = EntityRegistry::new();

        for (name, config) in &self.entities {
            let mut entity = Entity::new(name.clone());
            entity.table = config.table.clone();
            for (field, kind) in &config.fields {
                entity.add_field(kind.to_field(field.clone()));
            }
            registry.add_entity(entity);
        }

        for (name, config) in &self.embeddables {
            let mut embeddable = Embeddable::new(name.clone());
            for (field, kind) in &config.fields {
                embeddable.add_field(kind.to_field(field.clone()));
            }
            registry.add_embeddable(embeddable);
        }

        registry.validate()
    }

    /// Build a validated registry, consuming the configuration.
    pub fn into_registry(self) -> SchemaResult<EntityRegistry> {
        self.to_registry()
    }

    /// Install the relmap log subscriber with the `[debug]` settings.
    ///
    /// `RELMAP_LOG_LEVEL` and `RELMAP_LOG_FORMAT` take precedence when set.
    pub fn init_logging(&self) {
        let level = std::env::var("RELMAP_LOG_LEVEL").unwrap_or_else(|_| self.debug.log_level.clone());
        let format =
            std::env::var("RELMAP_LOG_FORMAT").unwrap_or_else(|_| self.debug.log_format.clone());
        relmap_query::logging::init_with(&level, &format);
    }
}

impl FromStr for RelmapConfig {
    type Err = SchemaError;

    /// Parse configuration from a TOML string.
    fn from_str(content: &str) -> SchemaResult<Self> {
        toml::from_str(content).map_err(|e| SchemaError::TomlError { source: e })
    }
}

/// Entity configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    /// Table name, when it differs from the entity name.
    pub table: Option<SmolStr>,

    /// Field definitions, in declaration order.
    #[serde(default)]
    pub fields: IndexMap<SmolStr, FieldConfig>,
}

/// Embeddable configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddableConfig {
    /// Field definitions, in declaration order.
    #[serde(default)]
    pub fields: IndexMap<SmolStr, FieldConfig>,
}

/// A field definition: `{ relation = "..." }`, `{ embedded = "..." }` or `{ column = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldConfig {
    /// A relation to another entity.
    Relation(RelationFieldConfig),
    /// An embedded value object.
    Embedded(EmbeddedFieldConfig),
    /// A plain column.
    Column(ColumnFieldConfig),
}

impl FieldConfig {
    fn to_field(&self, name: SmolStr) -> FieldDef {
        match self {
            Self::Relation(config) => FieldDef::relation(name, config.relation.clone(), config.kind),
            Self::Embedded(config) => FieldDef::embedded(name, config.embedded.clone()),
            Self::Column(config) => FieldDef::typed_column(name, config.column.clone()),
        }
    }
}

/// `{ relation = "Target", kind = "many-to-one" }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelationFieldConfig {
    /// Target entity.
    pub relation: SmolStr,
    /// Relation cardinality.
    #[serde(default)]
    pub kind: RelationType,
}

/// `{ embedded = "Embeddable" }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddedFieldConfig {
    /// Embeddable type.
    pub embedded: SmolStr,
}

/// `{ column = "type" }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnFieldConfig {
    /// Column type.
    pub column: SmolStr,
}

/// Debug configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log level: trace, debug, info, warn or error.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: json, pretty or compact.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "json".to_string() }

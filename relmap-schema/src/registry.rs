//! The entity registry: metadata lookups for relation resolution.

use indexmap::IndexMap;
use relmap_query::selection::path_segments;
use relmap_query::{EntityMetadata, PropertyMetadata};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::trace;

use crate::ast::{Embeddable, Entity, FieldDef, FieldKind};
use crate::error::{SchemaError, SchemaResult};
use crate::validator::validate_registry;

/// Registered entities and embeddables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// All entities.
    pub entities: IndexMap<SmolStr, Entity>,
    /// All embeddable types.
    pub embeddables: IndexMap<SmolStr, Embeddable>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the registry.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.name.clone(), entity);
    }

    /// Add an embeddable to the registry.
    pub fn add_embeddable(&mut self, embeddable: Embeddable) {
        self.embeddables.insert(embeddable.name.clone(), embeddable);
    }

    /// Add an entity, builder style.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.add_entity(entity);
        self
    }

    /// Add an embeddable, builder style.
    pub fn with_embeddable(mut self, embeddable: Embeddable) -> Self {
        self.add_embeddable(embeddable);
        self
    }

    /// Get an entity by name.
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Get an entity by name, failing if it is not registered.
    pub fn entity(&self, name: &str) -> SchemaResult<&Entity> {
        self.get_entity(name)
            .ok_or_else(|| SchemaError::unknown_entity(name))
    }

    /// Get an embeddable by name.
    pub fn get_embeddable(&self, name: &str) -> Option<&Embeddable> {
        self.embeddables.get(name)
    }

    /// Get all entity names.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(|s| s.as_str())
    }

    /// Validate the registry, returning it when consistent.
    pub fn validate(self) -> SchemaResult<Self> {
        validate_registry(self)
    }

    /// Find the field at a dotted path on an entity.
    ///
    /// Every segment but the last must be an embedded field; the walk
    /// descends into the embeddable's fields. Relations are not followed.
    pub fn field_at(&self, entity: &str, path: &str) -> Option<&FieldDef> {
        let mut fields = &self.get_entity(entity)?.fields;
        let mut segments = path_segments(path).peekable();

        while let Some(segment) = segments.next() {
            let field = fields.get(segment)?;
            if segments.peek().is_none() {
                return Some(field);
            }
            match &field.kind {
                FieldKind::Embedded { type_name } => {
                    fields = &self.get_embeddable(type_name)?.fields;
                }
                _ => return None,
            }
        }

        None
    }
}

impl EntityMetadata for EntityRegistry {
    type Entity = SmolStr;

    fn property(&self, entity: &SmolStr, path: &str) -> Option<PropertyMetadata<SmolStr>> {
        let field = self.field_at(entity, path)?;
        let metadata = match &field.kind {
            FieldKind::Relation { target, .. } => {
                PropertyMetadata::relation(field.name.clone(), target.clone())
            }
            FieldKind::Embedded { .. } => PropertyMetadata::embedded(field.name.clone()),
            FieldKind::Column { .. } => return None,
        };

        trace!(entity = %entity, path, relation = metadata.is_relation(), "EntityRegistry::property()");
        Some(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shop() -> EntityRegistry {
        EntityRegistry::new()
            .with_entity(
                Entity::new("Product")
                    .column("id")
                    .relation("owner", "Owner")
                    .relation("store", "Store"),
            )
            .with_entity(Entity::new("Store").column("name").relation("owner", "Owner"))
            .with_entity(Entity::new("Owner").column("name").embedded("address", "Address"))
            .with_entity(Entity::new("Country").column("name"))
            .with_embeddable(
                Embeddable::new("Address")
                    .column("street")
                    .relation("country", "Country")
                    .embedded("geo", "Geo"),
            )
            .with_embeddable(Embeddable::new("Geo").column("lat").relation("region", "Region"))
    }

    #[test]
    fn test_field_at_top_level() {
        let registry = shop();
        assert_eq!(registry.field_at("Product", "owner").and_then(|f| f.relation_target()), Some("Owner"));
        assert!(registry.field_at("Product", "missing").is_none());
        assert!(registry.field_at("Missing", "owner").is_none());
    }

    #[test]
    fn test_field_at_walks_embeddables() {
        let registry = shop();
        assert_eq!(
            registry.field_at("Owner", "address.country").and_then(|f| f.relation_target()),
            Some("Country")
        );
        assert_eq!(
            registry.field_at("Owner", "address.geo.region").and_then(|f| f.relation_target()),
            Some("Region")
        );
    }

    #[test]
    fn test_field_at_does_not_follow_relations() {
        let registry = shop();
        assert!(registry.field_at("Product", "owner.name").is_none());
        assert!(registry.field_at("Owner", "name.first").is_none());
    }

    #[test]
    fn test_property_classification() {
        let registry = shop();
        let owner: SmolStr = "Owner".into();

        assert_eq!(
            registry.property(&owner, "address"),
            Some(PropertyMetadata::embedded("address"))
        );
        assert_eq!(
            registry.property(&owner, "address.country"),
            Some(PropertyMetadata::relation("country", SmolStr::new("Country")))
        );
        assert_eq!(registry.property(&owner, "name"), None);
        assert_eq!(registry.property(&owner, "address.street"), None);
        assert_eq!(registry.property(&owner, "unknown"), None);
    }

    #[test]
    fn test_entity_lookup() {
        let registry = shop();
        assert_eq!(registry.entity("Store").map(|e| e.name()).ok(), Some("Store"));
        assert!(matches!(registry.entity("Ghost"), Err(SchemaError::UnknownEntity { .. })));
        assert_eq!(
            registry.entity_names().collect::<Vec<_>>(),
            vec!["Product", "Store", "Owner", "Country"]
        );
    }

    #[test]
    fn test_validate_reports_missing_region() {
        assert!(matches!(shop().validate(), Err(SchemaError::ValidationFailed { count: 1, .. })));
    }
}

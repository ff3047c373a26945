//! Entity metadata lookup used by the relation resolver.
//!
//! The resolver never reaches for a global connection or data source; a
//! metadata provider is handed to it explicitly. Providers classify a
//! property path on an entity as a relation, an embedded object, or
//! neither.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

/// Classification of a property on an entity.
///
/// A plain column (or an unknown name) is represented by the provider
/// returning `None` instead of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyMetadata<E> {
    /// The property joins to another entity.
    Relation {
        /// Relation property name on the owning entity (last path segment).
        property: SmolStr,
        /// The entity the relation points at.
        target: E,
    },
    /// The property is a value object stored on the owner's row.
    Embedded {
        /// Path segment contributed by the embedded object.
        property: SmolStr,
    },
}

impl<E> PropertyMetadata<E> {
    /// Create a relation classification.
    pub fn relation(property: impl Into<SmolStr>, target: E) -> Self {
        Self::Relation {
            property: property.into(),
            target,
        }
    }

    /// Create an embedded classification.
    pub fn embedded(property: impl Into<SmolStr>) -> Self {
        Self::Embedded {
            property: property.into(),
        }
    }

    /// The property name carried by either variant.
    pub fn property(&self) -> &str {
        match self {
            Self::Relation { property, .. } | Self::Embedded { property } => property,
        }
    }

    /// Check if this is a relation.
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation { .. })
    }

    /// Check if this is an embedded object.
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }
}

/// A provider of relational metadata for entities.
///
/// `path` is a dotted property path relative to `entity`. Segments before
/// the last one name embedded objects (`"address.country"` asks about the
/// `country` property inside the embedded `address` of `entity`).
///
/// Implementations must be deterministic and free of side effects.
pub trait EntityMetadata {
    /// Identifier for an entity type (a name, a type handle, ...).
    type Entity: Clone + fmt::Debug;

    /// Classify the property at `path` on `entity`.
    fn property(&self, entity: &Self::Entity, path: &str) -> Option<PropertyMetadata<Self::Entity>>;
}

impl<M: EntityMetadata + ?Sized> EntityMetadata for &M {
    type Entity = M::Entity;

    fn property(&self, entity: &Self::Entity, path: &str) -> Option<PropertyMetadata<Self::Entity>> {
        (**self).property(entity, path)
    }
}

impl<M: EntityMetadata + ?Sized> EntityMetadata for Arc<M> {
    type Entity = M::Entity;

    fn property(&self, entity: &Self::Entity, path: &str) -> Option<PropertyMetadata<Self::Entity>> {
        (**self).property(entity, path)
    }
}

//! Field definitions for entities and embeddables.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The type of relation between two entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    /// One-to-one relation.
    OneToOne,
    /// One-to-many relation.
    OneToMany,
    /// Many-to-one relation (inverse of one-to-many).
    #[default]
    ManyToOne,
    /// Many-to-many relation.
    ManyToMany,
}

impl RelationType {
    /// Check if this is a "to-one" relation.
    pub fn is_to_one(&self) -> bool {
        matches!(self, Self::OneToOne | Self::ManyToOne)
    }

    /// Check if this is a "to-many" relation.
    pub fn is_to_many(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneToOne => write!(f, "1:1"),
            Self::OneToMany => write!(f, "1:n"),
            Self::ManyToOne => write!(f, "n:1"),
            Self::ManyToMany => write!(f, "m:n"),
        }
    }
}

/// What a field maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// A plain column. The type is informational only.
    Column { column_type: Option<SmolStr> },
    /// A relation to another entity.
    Relation {
        target: SmolStr,
        relation_type: RelationType,
    },
    /// A value object stored inline in the owning entity.
    Embedded { type_name: SmolStr },
}

/// A field of an entity or embeddable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name.
    pub name: SmolStr,
    /// What the field maps to.
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a column field.
    pub fn column(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Column { column_type: None },
        }
    }

    /// Create a typed column field.
    pub fn typed_column(name: impl Into<SmolStr>, column_type: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Column {
                column_type: Some(column_type.into()),
            },
        }
    }

    /// Create a relation field.
    pub fn relation(
        name: impl Into<SmolStr>,
        target: impl Into<SmolStr>,
        relation_type: RelationType,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Relation {
                target: target.into(),
                relation_type,
            },
        }
    }

    /// Create an embedded field.
    pub fn embedded(name: impl Into<SmolStr>, type_name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Embedded {
                type_name: type_name.into(),
            },
        }
    }

    /// Check if this field is a relation.
    pub fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation { .. })
    }

    /// Check if this field is embedded.
    pub fn is_embedded(&self) -> bool {
        matches!(self.kind, FieldKind::Embedded { .. })
    }

    /// The entity a relation points to.
    pub fn relation_target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Relation { target, .. } => Some(target),
            _ => None,
        }
    }

    /// The embeddable type of an embedded field.
    pub fn embedded_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Embedded { type_name } => Some(type_name),
            _ => None,
        }
    }

    /// The type this field refers to, if any.
    pub fn referenced_type(&self) -> Option<&str> {
        self.relation_target().or_else(|| self.embedded_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_type_cardinality() {
        assert!(RelationType::ManyToOne.is_to_one());
        assert!(RelationType::OneToOne.is_to_one());
        assert!(RelationType::OneToMany.is_to_many());
        assert!(!RelationType::ManyToMany.is_to_one());
        assert_eq!(RelationType::default(), RelationType::ManyToOne);
    }

    #[test]
    fn test_relation_type_display() {
        assert_eq!(RelationType::OneToMany.to_string(), "1:n");
        assert_eq!(RelationType::ManyToMany.to_string(), "m:n");
    }

    #[test]
    fn test_field_constructors() {
        let owner = FieldDef::relation("owner", "Owner", RelationType::ManyToOne);
        assert!(owner.is_relation());
        assert_eq!(owner.relation_target(), Some("Owner"));
        assert_eq!(owner.referenced_type(), Some("Owner"));

        let address = FieldDef::embedded("address", "Address");
        assert!(address.is_embedded());
        assert_eq!(address.embedded_type(), Some("Address"));
        assert_eq!(address.relation_target(), None);

        let name = FieldDef::typed_column("name", "string");
        assert!(!name.is_relation());
        assert!(!name.is_embedded());
        assert_eq!(name.referenced_type(), None);
    }
}

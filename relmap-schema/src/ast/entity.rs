//! Entity and embeddable definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{FieldDef, RelationType};

/// An entity definition (maps to a database table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name.
    pub name: SmolStr,
    /// Table name, when it differs from the entity name.
    pub table: Option<SmolStr>,
    /// Entity fields.
    pub fields: IndexMap<SmolStr, FieldDef>,
}

impl Entity {
    /// Create a new entity.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: IndexMap::new(),
        }
    }

    /// Get the entity name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the database table name.
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(&self.name)
    }

    /// Set the table name.
    pub fn with_table(mut self, table: impl Into<SmolStr>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add a field to the entity.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.add_field(field);
        self
    }

    /// Add a column field.
    pub fn column(self, name: impl Into<SmolStr>) -> Self {
        self.with_field(FieldDef::column(name))
    }

    /// Add a many-to-one relation field.
    pub fn relation(self, name: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        self.with_field(FieldDef::relation(name, target, RelationType::ManyToOne))
    }

    /// Add an embedded field.
    pub fn embedded(self, name: impl Into<SmolStr>, type_name: impl Into<SmolStr>) -> Self {
        self.with_field(FieldDef::embedded(name, type_name))
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Get all relation fields.
    pub fn relation_fields(&self) -> Vec<&FieldDef> {
        self.fields.values().filter(|f| f.is_relation()).collect()
    }

    /// Get all embedded fields.
    pub fn embedded_fields(&self) -> Vec<&FieldDef> {
        self.fields.values().filter(|f| f.is_embedded()).collect()
    }
}

/// An embeddable value object. Its fields live in the owning entity's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embeddable {
    /// Type name.
    pub name: SmolStr,
    /// Type fields.
    pub fields: IndexMap<SmolStr, FieldDef>,
}

impl Embeddable {
    /// Create a new embeddable.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Get the type name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a field to the type.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.add_field(field);
        self
    }

    /// Add a column field.
    pub fn column(self, name: impl Into<SmolStr>) -> Self {
        self.with_field(FieldDef::column(name))
    }

    /// Add a many-to-one relation field.
    pub fn relation(self, name: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        self.with_field(FieldDef::relation(name, target, RelationType::ManyToOne))
    }

    /// Add an embedded field.
    pub fn embedded(self, name: impl Into<SmolStr>, type_name: impl Into<SmolStr>) -> Self {
        self.with_field(FieldDef::embedded(name, type_name))
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }
}

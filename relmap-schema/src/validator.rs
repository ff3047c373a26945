//! Entity metadata validation.
//!
//! Checks that a registry is consistent before it is used for resolution:
//! - Relation targets name registered entities
//! - Embedded fields name registered embeddables
//! - Field names are usable as path segments
//! - Embeddables do not embed themselves, directly or indirectly
//! - Entity and embeddable names do not collide

use std::collections::HashSet;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::ast::{FieldDef, FieldKind};
use crate::error::{SchemaError, SchemaResult};
use crate::registry::EntityRegistry;

/// Registry validator.
#[derive(Debug, Default)]
pub struct Validator {
    /// Collected validation errors.
    errors: Vec<SchemaError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Validate a registry and return it or the collected errors.
    pub fn validate(&mut self, registry: EntityRegistry) -> SchemaResult<EntityRegistry> {
        self.errors.clear();

        for name in registry.entities.keys() {
            if registry.embeddables.contains_key(name) {
                self.errors.push(SchemaError::duplicate("type", name.as_str()));
            }
        }

        for entity in registry.entities.values() {
            for field in entity.fields.values() {
                self.validate_field(field, entity.name(), &registry);
            }
        }

        for embeddable in registry.embeddables.values() {
            for field in embeddable.fields.values() {
                self.validate_field(field, embeddable.name(), &registry);
            }
        }

        self.check_embedding_cycles(&registry);

        debug!(
            entities = registry.entities.len(),
            embeddables = registry.embeddables.len(),
            errors = self.errors.len(),
            "Validator::validate()"
        );

        if self.errors.is_empty() {
            Ok(registry)
        } else {
            Err(SchemaError::ValidationFailed {
                count: self.errors.len(),
                errors: std::mem::take(&mut self.errors),
            })
        }
    }

    fn validate_field(&mut self, field: &FieldDef, owner: &str, registry: &EntityRegistry) {
        if field.name.is_empty() {
            self.errors
                .push(SchemaError::invalid_field(owner, "", "field name cannot be empty"));
        } else if field.name.contains(relmap_query::selection::PATH_SEPARATOR) {
            self.errors.push(SchemaError::invalid_field(
                owner,
                field.name.as_str(),
                "field names cannot contain `.`",
            ));
        }

        match &field.kind {
            FieldKind::Relation { target, .. } => {
                if !registry.entities.contains_key(target) {
                    self.errors.push(SchemaError::unknown_type(
                        owner,
                        field.name.as_str(),
                        target.as_str(),
                    ));
                }
            }
            FieldKind::Embedded { type_name } => {
                if !registry.embeddables.contains_key(type_name) {
                    self.errors.push(SchemaError::unknown_type(
                        owner,
                        field.name.as_str(),
                        type_name.as_str(),
                    ));
                }
            }
            FieldKind::Column { .. } => {}
        }
    }

    /// An embeddable that contains itself has no finite layout.
    fn check_embedding_cycles(&mut self, registry: &EntityRegistry) {
        let edges: IndexMap<&SmolStr, Vec<(&SmolStr, &str)>> = registry
            .embeddables
            .iter()
            .map(|(name, embeddable)| {
                let targets = embeddable
                    .fields
                    .values()
                    .filter_map(|field| match &field.kind {
                        FieldKind::Embedded { type_name } => Some((type_name, field.name.as_str())),
                        _ => None,
                    })
                    .collect();
                (name, targets)
            })
            .collect();

        let mut reported = HashSet::new();
        for start in edges.keys() {
            let mut stack = vec![*start];
            let mut seen = HashSet::new();
            while let Some(current) = stack.pop() {
                if !seen.insert(current) {
                    continue;
                }
                for (target, field) in edges.get(current).into_iter().flatten() {
                    if *target == *start && reported.insert(*start) {
                        self.errors.push(SchemaError::invalid_field(
                            current.as_str(),
                            *field,
                            format!("embedding `{}` here makes `{}` contain itself", target, start),
                        ));
                    }
                    stack.push(*target);
                }
            }
        }
    }
}

/// Validate a registry.
pub fn validate_registry(registry: EntityRegistry) -> SchemaResult<EntityRegistry> {
    Validator::new().validate(registry)
}

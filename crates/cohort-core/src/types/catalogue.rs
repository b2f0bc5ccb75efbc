//! Field catalogue
//!
//! The catalogue is built once from the schema and never mutated afterwards.
//! Entities and their fields keep insertion order; the first field of an
//! entity is its default field unless one is configured explicitly.

use super::field::{Entity, Field};
use crate::error::{CoreError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct EntityEntry {
    entity: Entity,
    fields: Vec<Field>,
    default_field: Option<String>,
}

/// Immutable catalogue of entities and their fields
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: Vec<EntityEntry>,
    /// Field path -> (entry index, field index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity with its fields.
    ///
    /// Field paths must be unique across the catalogue; duplicates are
    /// dropped with a warning.
    pub fn add_entity(mut self, entity: Entity, fields: Vec<Field>) -> Self {
        let entry_index = self.entries.len();
        let mut kept = Vec::with_capacity(fields.len());
        for field in fields {
            if self.index.contains_key(&field.path) {
                log::warn!("Duplicate field path '{}' dropped from catalogue", field.path);
                continue;
            }
            self.index
                .insert(field.path.clone(), (entry_index, kept.len()));
            kept.push(field);
        }
        self.entries.push(EntityEntry {
            entity,
            fields: kept,
            default_field: None,
        });
        self
    }

    /// Configure the default field of an entity
    pub fn with_default_field(mut self, entity_id: &str, path: &str) -> Result<Self> {
        self.set_default_field(entity_id, path)?;
        Ok(self)
    }

    /// Configure the default field of an entity in place
    pub fn set_default_field(&mut self, entity_id: &str, path: &str) -> Result<()> {
        let entry_index = self
            .entries
            .iter()
            .position(|entry| entry.entity.id == entity_id)
            .ok_or_else(|| CoreError::EntityNotFound(entity_id.to_string()))?;

        match self.index.get(path) {
            Some((owner, _)) if *owner == entry_index => {
                self.entries[entry_index].default_field = Some(path.to_string());
                Ok(())
            }
            _ => Err(CoreError::FieldNotFound(path.to_string())),
        }
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entries.iter().map(|entry| &entry.entity)
    }

    pub fn entity(&self, entity_id: &str) -> Option<&Entity> {
        self.entry(entity_id).map(|entry| &entry.entity)
    }

    pub fn first_entity(&self) -> Option<&Entity> {
        self.entries.first().map(|entry| &entry.entity)
    }

    /// Fields of an entity; empty when the entity is unknown
    pub fn fields(&self, entity_id: &str) -> &[Field] {
        self.entry(entity_id)
            .map(|entry| entry.fields.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a field by its full value path
    pub fn field(&self, path: &str) -> Option<&Field> {
        self.index
            .get(path)
            .map(|(entry, field)| &self.entries[*entry].fields[*field])
    }

    /// Iterate every field of every entity
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.entries.iter().flat_map(|entry| entry.fields.iter())
    }

    /// Default field of an entity: the configured one, else the first field.
    ///
    /// Returns `None` with a warning when the entity has no fields.
    pub fn default_field(&self, entity_id: &str) -> Option<&Field> {
        let entry = match self.entry(entity_id) {
            Some(entry) => entry,
            None => {
                log::warn!("No field configuration for unknown entity '{}'", entity_id);
                return None;
            }
        };

        let configured = entry
            .default_field
            .as_deref()
            .and_then(|path| self.field(path));

        let field = configured.or_else(|| entry.fields.first());
        if field.is_none() {
            log::warn!("Entity '{}' has no queryable fields", entity_id);
        }
        field
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn entry(&self, entity_id: &str) -> Option<&EntityEntry> {
        self.entries.iter().find(|entry| entry.entity.id == entity_id)
    }
}

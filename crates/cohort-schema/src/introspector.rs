//! Schema introspector
//!
//! Turns the resource descriptors of a [`SchemaDocument`] into the flat
//! field catalogue the query builder works on.
//!
//! Introspection is fail-soft: a property whose type cannot be resolved still
//! becomes a field, typed `Unknown` and without operators, and a missing
//! resource yields no fields. Both cases are logged and never abort the rest
//! of the catalogue.

use crate::config::IntrospectorConfig;
use crate::document::{PropertySchema, ResourceSchema, SchemaDocument, TypeDecl};
use cohort_core::ast::{Rule, RuleSet};
use cohort_core::types::{
    BaseType, Catalogue, DefaultValue, Entity, Field, FieldOption, FieldType, FieldValidator,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolved type information of one property
#[derive(Debug, Clone, PartialEq)]
struct ResolvedType {
    field_type: FieldType,
    options: Option<Vec<FieldOption>>,
    /// Nested sub-resource to expand instead of emitting a field
    nested: Option<String>,
}

impl ResolvedType {
    fn of(field_type: FieldType) -> Self {
        Self {
            field_type,
            options: None,
            nested: None,
        }
    }

    fn scalar(base: BaseType) -> Self {
        Self::of(FieldType::Scalar(base))
    }

    fn unknown(name: &str) -> Self {
        Self::of(FieldType::Unknown(name.to_string()))
    }

    fn enumeration(values: &[Value]) -> Self {
        let options = values
            .iter()
            .map(|value| {
                let label = match value {
                    Value::String(s) => humanize(s),
                    other => other.to_string(),
                };
                FieldOption::new(value.clone(), label)
            })
            .collect();
        Self {
            field_type: FieldType::Scalar(BaseType::Enum),
            options: Some(options),
            nested: None,
        }
    }

    fn into_array(mut self) -> Self {
        self.field_type = self.field_type.into_multi();
        self
    }
}

/// Builds fields and catalogues from a schema document
pub struct Introspector {
    document: SchemaDocument,
    config: IntrospectorConfig,
    producers: HashMap<String, DefaultValue>,
    validators: HashMap<String, FieldValidator>,
}

impl Introspector {
    /// Create a new introspector
    pub fn new(document: SchemaDocument, config: IntrospectorConfig) -> Self {
        Self {
            document,
            config,
            producers: HashMap::new(),
            validators: HashMap::new(),
        }
    }

    /// Attach a default-value producer to a field path
    pub fn with_default_producer(
        mut self,
        path: impl Into<String>,
        producer: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.producers
            .insert(path.into(), DefaultValue::producer(producer));
        self
    }

    /// Attach a custom validator to a field path
    pub fn with_validator(
        mut self,
        path: impl Into<String>,
        validator: impl Fn(&Rule, &RuleSet) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.validators.insert(path.into(), Arc::new(validator));
        self
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    pub fn config(&self) -> &IntrospectorConfig {
        &self.config
    }

    /// Fields of one resource. An unknown resource yields no fields.
    pub fn fields(&self, entity_id: &str) -> Vec<Field> {
        let resource = match self.document.resource(entity_id) {
            Some(resource) => resource,
            None => {
                log::warn!("Resource '{}' not found in schema", entity_id);
                return Vec::new();
            }
        };

        let mut fields = Vec::new();
        self.collect_fields(entity_id, resource, entity_id, None, 0, &mut fields);
        fields
    }

    /// Build the catalogue of every configured entity
    pub fn build_catalogue(&self) -> Catalogue {
        let mut catalogue = Catalogue::new();
        for entity in &self.config.entities {
            let fields = self.fields(&entity.id);
            log::debug!("Introspected {} fields for '{}'", fields.len(), entity.id);
            catalogue = catalogue.add_entity(Entity::new(&entity.id, &entity.name), fields);
        }

        for entity in &self.config.entities {
            if let Some(property) = &entity.default_field {
                let path = format!("{}.{}", entity.id, property);
                if let Err(e) = catalogue.set_default_field(&entity.id, &path) {
                    log::warn!("Ignoring default field of '{}': {}", entity.id, e);
                }
            }
        }

        catalogue
    }

    fn collect_fields(
        &self,
        entity_id: &str,
        resource: &ResourceSchema,
        path_prefix: &str,
        name_prefix: Option<&str>,
        depth: usize,
        fields: &mut Vec<Field>,
    ) {
        for (property, schema) in &resource.properties {
            if self.config.is_excluded(property) {
                continue;
            }

            let path = format!("{}.{}", path_prefix, property);
            let title = schema.title.clone().unwrap_or_else(|| humanize(property));
            let name = match name_prefix {
                Some(prefix) => format!("{} - {}", prefix, title),
                None => title,
            };

            let resolved = self.resolve(schema);

            if let Some(nested) = &resolved.nested {
                if depth >= self.config.max_nesting_depth {
                    log::warn!("Nested resource '{}' at '{}' exceeds nesting depth", nested, path);
                    continue;
                }
                match self.document.resource(nested) {
                    Some(nested_resource) => {
                        self.collect_fields(
                            entity_id,
                            nested_resource,
                            &path,
                            Some(&name),
                            depth + 1,
                            fields,
                        );
                    }
                    None => {
                        log::warn!("Nested resource '{}' of '{}' not found in schema", nested, path);
                        fields.push(self.make_field(entity_id, path, name, ResolvedType::unknown(nested)));
                    }
                }
                continue;
            }

            if !resolved.field_type.is_known() {
                log::warn!(
                    "Cannot resolve type '{}' of '{}'; field has no operators",
                    resolved.field_type,
                    path
                );
            }
            fields.push(self.make_field(entity_id, path, name, resolved));
        }
    }

    fn make_field(&self, entity_id: &str, path: String, name: String, resolved: ResolvedType) -> Field {
        let field_override = self.config.field_overrides.get(&path);
        let name = field_override
            .and_then(|o| o.name.clone())
            .unwrap_or(name);

        let mut field = Field::new(entity_id, path, name, resolved.field_type);
        let options = field_override
            .and_then(|o| o.options.clone())
            .or(resolved.options);
        if let Some(options) = options {
            field = field.with_options(options);
        }
        if let Some(value) = field_override.and_then(|o| o.default_value.clone()) {
            field = field.with_default(DefaultValue::Literal(value));
        }
        if let Some(producer) = self.producers.get(&field.path) {
            field = field.with_default(producer.clone());
        }
        if let Some(validator) = self.validators.get(&field.path) {
            field.validator = Some(validator.clone());
        }
        field
    }

    fn resolve(&self, schema: &PropertySchema) -> ResolvedType {
        // Nullable wrappers: `anyOf: [X, {type: null}]`
        if let Some(members) = schema.any_of.as_ref().or(schema.all_of.as_ref()) {
            let candidates: Vec<&PropertySchema> =
                members.iter().filter(|member| !member.is_null_type()).collect();
            return match candidates.as_slice() {
                [single] => self.resolve(single),
                _ => ResolvedType::unknown("union"),
            };
        }

        if let Some(values) = &schema.enumeration {
            return ResolvedType::enumeration(values);
        }

        if let Some(reference) = schema.reference_name() {
            return self.resolve_reference(reference);
        }

        let type_name = match &schema.type_decl {
            Some(TypeDecl::Single(name)) => Some(name.as_str()),
            Some(TypeDecl::Union(names)) => {
                let non_null: Vec<&str> = names
                    .iter()
                    .map(String::as_str)
                    .filter(|name| *name != "null")
                    .collect();
                match non_null.as_slice() {
                    [single] => Some(*single),
                    _ => None,
                }
            }
            None => None,
        };

        match type_name {
            Some("array") => match &schema.items {
                Some(items) => self.resolve(items).into_array(),
                None => ResolvedType::unknown("array"),
            },
            Some("string") => match schema.format.as_deref() {
                Some("date") => ResolvedType::scalar(BaseType::Date),
                Some("date-time") => ResolvedType::scalar(BaseType::DateTime),
                _ => ResolvedType::scalar(BaseType::String),
            },
            Some("number") => ResolvedType::scalar(BaseType::Number),
            Some("integer") => ResolvedType::scalar(BaseType::Integer),
            Some("boolean") => ResolvedType::scalar(BaseType::Boolean),
            Some(other) => ResolvedType::unknown(other),
            None => ResolvedType::unknown("untyped"),
        }
    }

    fn resolve_reference(&self, reference: &str) -> ResolvedType {
        if self.config.is_nested_resource(reference) {
            return ResolvedType {
                field_type: FieldType::Unknown(reference.to_string()),
                options: None,
                nested: Some(reference.to_string()),
            };
        }

        if let Some(field_type) = self.config.composite_types.get(reference) {
            return ResolvedType::of(field_type.clone());
        }

        match self.document.resource(reference) {
            Some(resource) if resource.is_enumeration() => {
                ResolvedType::enumeration(resource.enumeration.as_deref().unwrap_or(&[]))
            }
            _ => ResolvedType::unknown(reference),
        }
    }
}

/// Turn a property name into a display label (`ageAtDiagnosis` -> `Age at diagnosis`)
pub fn humanize(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;

    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let sentence = words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Common test utilities for schema integration tests

use cohort_schema::{EntityConfig, Introspector, IntrospectorConfig, SchemaDocument};

pub const ONCOLOGY_SCHEMA: &str = include_str!("../fixtures/oncology_schema.yaml");

/// Configuration exposing the fixture's clinical resources
pub fn oncology_config() -> IntrospectorConfig {
    IntrospectorConfig::new()
        .exclude_property("pseudoidentifier")
        .with_entity(EntityConfig::new("PatientCase", "Patient case").with_default_field("age"))
        .with_entity(EntityConfig::new("SystemicTherapy", "Systemic therapy"))
        .with_entity(EntityConfig::new("NeoplasticEntity", "Neoplastic entity"))
        .with_entity(EntityConfig::new("Comorbidities", "Comorbidities"))
}

/// Introspector over the fixture schema
pub fn oncology_introspector() -> Introspector {
    let document = SchemaDocument::parse(ONCOLOGY_SCHEMA).expect("fixture schema parses");
    Introspector::new(document, oncology_config())
}

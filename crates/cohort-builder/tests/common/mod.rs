//! Common test utilities for query builder integration tests

#![allow(dead_code)]

use cohort_builder::{BuilderConfig, QueryBuilder, QueryBuilderFactory, QueryBuilderListener};
use cohort_core::types::{BaseType, DefaultValue, Entity, Field, FieldOption, FieldType};
use cohort_core::Catalogue;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const ONCOLOGY_SCHEMA: &str =
    include_str!("../../../cohort-schema/tests/fixtures/oncology_schema.yaml");

/// The single-entity catalogue: `Case` with an integer `age`
pub fn case_catalogue() -> Catalogue {
    Catalogue::new().add_entity(
        Entity::new("Case", "Case"),
        vec![Field::new("Case", "Case.age", "Age", FieldType::Scalar(BaseType::Integer))],
    )
}

/// Two clinical entities plus an entity without fields
pub fn clinical_catalogue() -> Catalogue {
    Catalogue::new()
        .add_entity(
            Entity::new("Case", "Patient case"),
            vec![
                Field::new("Case", "Case.age", "Age", FieldType::Scalar(BaseType::Integer)),
                Field::new("Case", "Case.sex", "Sex", FieldType::Scalar(BaseType::String)),
                Field::new("Case", "Case.site", "Site", FieldType::Scalar(BaseType::String)),
                Field::new(
                    "Case",
                    "Case.diagnosis",
                    "Diagnosis",
                    FieldType::Scalar(BaseType::CodedConcept),
                ),
                Field::new("Case", "Case.ageAtDiagnosis", "Age at diagnosis", FieldType::Scalar(BaseType::Integer))
                    .with_default(DefaultValue::Literal(json!(18))),
            ],
        )
        .add_entity(
            Entity::new("Therapy", "Systemic therapy"),
            vec![
                Field::new("Therapy", "Therapy.period", "Period", FieldType::Scalar(BaseType::Period))
                    .with_default(DefaultValue::producer(|| json!({"start": "2020-01-01"}))),
                Field::new("Therapy", "Therapy.intent", "Intent", FieldType::Scalar(BaseType::Enum))
                    .with_options(vec![
                        FieldOption::new("curative", "Curative"),
                        FieldOption::new("palliative", "Palliative"),
                    ]),
                Field::new(
                    "Therapy",
                    "Therapy.drugs",
                    "Drugs",
                    FieldType::Multi(BaseType::CodedConcept),
                ),
            ],
        )
        .add_entity(Entity::new("Gap", "Schema gap"), vec![])
}

pub fn factory(catalogue: Catalogue) -> QueryBuilderFactory {
    QueryBuilderFactory::builder()
        .with_catalogue(catalogue)
        .build()
        .expect("factory builds from a catalogue")
}

pub fn session_with(catalogue: Catalogue, config: BuilderConfig) -> QueryBuilder {
    QueryBuilderFactory::builder()
        .with_catalogue(catalogue)
        .with_config(config)
        .build()
        .expect("factory builds from a catalogue")
        .session()
}

/// Listener counting notifications
#[derive(Clone, Default)]
pub struct CountingListener {
    pub touched: Arc<AtomicUsize>,
    pub changed: Arc<AtomicUsize>,
}

impl CountingListener {
    pub fn touch_count(&self) -> usize {
        self.touched.load(Ordering::SeqCst)
    }

    pub fn change_count(&self) -> usize {
        self.changed.load(Ordering::SeqCst)
    }
}

impl QueryBuilderListener for CountingListener {
    fn touched(&mut self) {
        self.touched.fetch_add(1, Ordering::SeqCst);
    }

    fn changed(&mut self) {
        self.changed.fetch_add(1, Ordering::SeqCst);
    }
}

//! Integration tests for schema introspection
//!
//! Runs the introspector over a trimmed oncology registry schema and checks
//! the resulting catalogue.

mod common;

use cohort_core::types::{BaseType, FieldOption, FieldType, Operator};
use cohort_schema::{FieldOverride, Introspector, SchemaDocument};
use common::{oncology_config, oncology_introspector, ONCOLOGY_SCHEMA};
use serde_json::json;

fn paths(fields: &[cohort_core::Field]) -> Vec<&str> {
    fields.iter().map(|field| field.path.as_str()).collect()
}

// =============================================================================
// Field extraction
// =============================================================================

#[test]
fn test_patient_case_fields() {
    let fields = oncology_introspector().fields("PatientCase");

    assert_eq!(
        paths(&fields),
        vec![
            "PatientCase.age",
            "PatientCase.gender",
            "PatientCase.vitalStatus",
            "PatientCase.dateOfDeath",
            "PatientCase.consentStatus",
            "PatientCase.clinicalIdentifiers",
        ]
    );

    let types: Vec<String> = fields.iter().map(|f| f.field_type.to_string()).collect();
    assert_eq!(
        types,
        vec!["integer", "CodedConcept", "enum", "date", "boolean", "Multistring"]
    );
    assert!(fields.iter().all(|field| field.entity == "PatientCase"));
}

#[test]
fn test_display_names() {
    let fields = oncology_introspector().fields("PatientCase");
    assert_eq!(fields[0].name, "Age");
    assert_eq!(fields[2].name, "Vital status");
    assert_eq!(fields[3].name, "Date of death");
}

#[test]
fn test_nested_resource_fields_are_reparented() {
    let fields = oncology_introspector().fields("SystemicTherapy");

    assert_eq!(
        paths(&fields),
        vec![
            "SystemicTherapy.period",
            "SystemicTherapy.intent",
            "SystemicTherapy.cycles",
            "SystemicTherapy.medications.drug",
            "SystemicTherapy.medications.dosageMass",
            "SystemicTherapy.targetedEntities",
        ]
    );

    let drug = &fields[3];
    assert_eq!(drug.entity, "SystemicTherapy");
    assert_eq!(drug.name, "Medications - Drug");
    assert_eq!(drug.field_type, FieldType::Scalar(BaseType::CodedConcept));
    assert_eq!(drug.property(), "medications.drug");

    assert_eq!(fields[4].field_type, FieldType::Scalar(BaseType::Measure));
    assert_eq!(fields[5].field_type, FieldType::Multi(BaseType::CodedConcept));
}

#[test]
fn test_operators_follow_types() {
    let fields = oncology_introspector().fields("SystemicTherapy");

    assert_eq!(fields[0].default_operator(), Some(Operator::OverlapsPeriodFilter));
    assert_eq!(fields[2].default_operator(), Some(Operator::EqualIntegerFilter));
    assert!(fields[5].allows(Operator::AllOfMultiConceptFilter));
}

#[test]
fn test_unresolvable_property_keeps_the_rest() {
    let fields = oncology_introspector().fields("NeoplasticEntity");

    assert_eq!(fields.len(), 4);
    let differentiation = fields.last().unwrap();
    assert_eq!(
        differentiation.field_type,
        FieldType::Unknown("Differentiation".to_string())
    );
    assert!(differentiation.operators.is_empty());
    assert!(fields[..3].iter().all(|field| !field.operators.is_empty()));
}

// =============================================================================
// Catalogue
// =============================================================================

#[test]
fn test_catalogue_contains_configured_entities() {
    let catalogue = oncology_introspector().build_catalogue();

    let ids: Vec<&str> = catalogue.entities().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["PatientCase", "SystemicTherapy", "NeoplasticEntity", "Comorbidities"]
    );
    assert_eq!(catalogue.first_entity().unwrap().name, "Patient case");
    assert!(catalogue.field("SystemicTherapy.medications.drug").is_some());
}

#[test]
fn test_schema_gap_entity() {
    let catalogue = oncology_introspector().build_catalogue();

    assert!(catalogue.fields("Comorbidities").is_empty());
    assert!(catalogue.default_field("Comorbidities").is_none());
}

#[test]
fn test_configured_default_field() {
    let catalogue = oncology_introspector().build_catalogue();
    assert_eq!(
        catalogue.default_field("PatientCase").map(|f| f.path.as_str()),
        Some("PatientCase.age")
    );
    assert_eq!(
        catalogue.default_field("SystemicTherapy").map(|f| f.path.as_str()),
        Some("SystemicTherapy.period")
    );
}

#[test]
fn test_invalid_default_field_is_ignored() {
    let mut config = oncology_config();
    config.entities[1].default_field = Some("doesNotExist".to_string());
    let document = SchemaDocument::parse(ONCOLOGY_SCHEMA).unwrap();

    let catalogue = Introspector::new(document, config).build_catalogue();
    assert_eq!(
        catalogue.default_field("SystemicTherapy").map(|f| f.path.as_str()),
        Some("SystemicTherapy.period")
    );
}

#[test]
fn test_field_override() -> anyhow::Result<()> {
    let config = oncology_config().with_field_override(
        "PatientCase.age",
        FieldOverride {
            name: Some("Age at consent".to_string()),
            default_value: Some(json!(18)),
            ..FieldOverride::default()
        },
    );
    let document = SchemaDocument::parse(ONCOLOGY_SCHEMA)?;

    let catalogue = Introspector::new(document, config).build_catalogue();
    let age = catalogue.field("PatientCase.age").expect("age field");
    assert_eq!(age.name, "Age at consent");
    assert_eq!(age.default_value(), Some(json!(18)));
    Ok(())
}

#[test]
fn test_option_override_replaces_schema_options() -> anyhow::Result<()> {
    let options = vec![
        FieldOption::new("curative", "Curative intent"),
        FieldOption::new("palliative", "Palliative intent"),
    ];
    let config = oncology_config().with_field_override(
        "SystemicTherapy.intent",
        FieldOverride {
            options: Some(options.clone()),
            ..FieldOverride::default()
        },
    );
    let document = SchemaDocument::parse(ONCOLOGY_SCHEMA)?;

    let catalogue = Introspector::new(document, config).build_catalogue();
    let intent = catalogue.field("SystemicTherapy.intent").expect("intent field");
    assert_eq!(intent.options, Some(options));
    assert_eq!(intent.field_type, FieldType::Scalar(BaseType::Enum));
    Ok(())
}

#[test]
fn test_option_override_attaches_options() -> anyhow::Result<()> {
    let options = vec![FieldOption::new(1, "One cycle"), FieldOption::new(2, "Two cycles")];
    let config = oncology_config().with_field_override(
        "SystemicTherapy.cycles",
        FieldOverride {
            options: Some(options.clone()),
            ..FieldOverride::default()
        },
    );
    let document = SchemaDocument::parse(ONCOLOGY_SCHEMA)?;

    let catalogue = Introspector::new(document, config).build_catalogue();
    let cycles = catalogue.field("SystemicTherapy.cycles").expect("cycles field");
    assert_eq!(cycles.options, Some(options));
    assert_eq!(cycles.field_type, FieldType::Scalar(BaseType::Integer));

    let untouched = catalogue.field("SystemicTherapy.period").expect("period field");
    assert!(untouched.options.is_none());
    Ok(())
}

#[test]
fn test_nesting_depth_guard() {
    let mut config = oncology_config();
    config.max_nesting_depth = 0;
    let document = SchemaDocument::parse(ONCOLOGY_SCHEMA).unwrap();

    let fields = Introspector::new(document, config).fields("SystemicTherapy");
    assert!(fields.iter().all(|field| !field.path.contains("medications")));
}

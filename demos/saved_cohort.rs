//! Saved cohort example
//!
//! This example demonstrates:
//! - Loading a stored cohort definition into a read-only session
//! - Rejected edits on read-only sessions
//! - Reopening the definition for editing

use cohort_builder::{Condition, QueryBuilderFactory};
use cohort_query_demos::read_demo_file;
use cohort_schema::IntrospectorConfig;

const SAVED_COHORT: &str = r#"{
  "condition": "and",
  "rules": [
    {"entity": "PatientCase", "filters": [
      {"field": "age", "operator": "BetweenIntegerFilter", "value": [40, 65]},
      {"field": "dateOfDeath", "operator": "IsNullFilter"}
    ]},
    {"entity": "NeoplasticEntity", "filters": [
      {"field": "topography", "operator": "DescendantsOfConceptFilter", "value": {"code": "C50"}}
    ]}
  ]
}"#;

fn main() -> anyhow::Result<()> {
    cohort_query_demos::init_tracing()?;

    println!("=== Saved Cohort Example ===\n");

    let factory = QueryBuilderFactory::builder()
        .with_schema(
            read_demo_file("schemas/oncology.yaml")?,
            IntrospectorConfig::from_yaml_str(&read_demo_file("config/introspector.yaml")?)?,
        )
        .read_only(true)
        .build()?;

    let mut session = factory.load(SAVED_COHORT)?;
    println!("Loaded {} rules, valid: {}", session.value().rule_count(), session.is_valid());

    let applied = session.change_condition(&[], Condition::Or);
    println!("Edit on read-only session applied: {}", applied);

    session.set_read_only(false);
    session.remove_rule_filter(&[0], 1);
    session.change_condition(&[], Condition::Or);

    println!("\nEdited cohort:");
    println!("{}", session.to_json()?);

    Ok(())
}

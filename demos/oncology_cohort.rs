//! Oncology cohort example
//!
//! This example demonstrates:
//! - Introspecting a registry schema with a YAML configuration
//! - Listing entities, fields and operators
//! - Building a nested cohort query across entities

use cohort_builder::{CallbackListener, Condition, Operator, QueryBuilderFactory};
use cohort_query_demos::read_demo_file;
use cohort_schema::IntrospectorConfig;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    cohort_query_demos::init_tracing()?;

    println!("=== Oncology Cohort Example ===\n");

    let schema = read_demo_file("schemas/oncology.yaml")?;
    let introspector_config = IntrospectorConfig::from_yaml_str(&read_demo_file("config/introspector.yaml")?)?;

    let factory = QueryBuilderFactory::builder()
        .with_schema(schema, introspector_config)
        .with_config_yaml(&read_demo_file("config/builder.yaml")?)?
        .build()?;

    println!("Catalogue:");
    for entity in factory.catalogue().entities() {
        println!("  {} ({})", entity.name, entity.id);
        for field in factory.catalogue().fields(&entity.id) {
            println!(
                "    {:<40} {:<18} {} operators",
                field.path,
                field.field_type.to_string(),
                field.operators.len()
            );
        }
    }
    println!();

    let mut session = factory.session();
    session.add_listener(CallbackListener::new(|| {}, || println!("  .. query changed")));

    // Patients older than 50 ...
    session.change_operator(&[0], 0, Operator::GreaterThanIntegerFilter);
    session.set_filter_value(&[0], 0, Some(json!(50)));

    // ... treated curatively or with a given drug
    session.add_rule_set(&[]);
    session.change_condition(&[1], Condition::Or);
    session.add_rule(&[1]);
    session.change_entity(&[1, 0], "SystemicTherapy");
    session.change_field(&[1, 0], 0, "SystemicTherapy.intent");
    session.set_filter_value(&[1, 0], 0, Some(json!("curative")));
    session.add_rule(&[1]);
    session.change_entity(&[1, 1], "SystemicTherapy");
    session.change_field(&[1, 1], 0, "SystemicTherapy.medications.drug");
    session.change_operator(&[1, 1], 0, Operator::AnyOfConceptFilter);
    session.set_filter_value(&[1, 1], 0, Some(json!([{"code": "L01XC03", "system": "ATC"}])));

    println!("\nValid: {}", session.is_valid());
    println!("Wire JSON:");
    if let Some(wire) = session.to_wire() {
        println!("{}", serde_json::to_string_pretty(&wire)?);
    }

    Ok(())
}

//! Simple query example
//!
//! This example demonstrates:
//! - Building a catalogue by hand
//! - Adding a rule and watching the validation state
//! - Printing the wire JSON sent to the query planner

use cohort_builder::QueryBuilderFactory;
use cohort_core::types::{BaseType, Entity, Field, FieldType};
use cohort_core::Catalogue;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    cohort_query_demos::init_tracing()?;

    println!("=== Simple Query Example ===\n");

    let catalogue = Catalogue::new().add_entity(
        Entity::new("Case", "Case"),
        vec![Field::new("Case", "Case.age", "Age", FieldType::Scalar(BaseType::Integer))],
    );
    let factory = QueryBuilderFactory::builder().with_catalogue(catalogue).build()?;

    let mut session = factory.session();
    session.add_rule(&[]);

    println!("Internal tree:");
    println!("{}\n", serde_json::to_string_pretty(session.value())?);

    if let Some(report) = session.errors() {
        println!("Validation errors:");
        println!("{}\n", serde_json::to_string_pretty(report)?);
    }

    session.set_filter_value(&[0], 0, Some(json!(42)));
    println!("Valid after setting age = 42: {}\n", session.is_valid());

    println!("Wire JSON:");
    println!("{}", session.to_json()?);

    Ok(())
}

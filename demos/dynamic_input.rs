//! Building charts from JSON input, including the errors bad input produces.
//!
//! Run with: cargo run --example dynamic_input

use chartjs_schema::{
    from_str, from_value, to_string, value, Chart, Dataset, DatasetData, Error as ChartError,
};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Reading {
    x: &'static str,
    y: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Either key spelling is accepted; output is always camelCase
    let chart: Chart = from_str(
        r#"{
            "type": "bar",
            "data": {
                "datasets": [{"label": "Steps", "data": [4200, 8100, 6400], "border_color": "teal"}],
                "labels": ["Mon", "Tue", "Wed"]
            }
        }"#,
    )?;
    println!("Parsed chart:\n{}\n", to_string(&chart)?);

    // Caller structs become object-shaped points
    let readings = [
        Reading { x: "2025-08-11", y: 2 },
        Reading { x: "2025-08-12", y: 6 },
    ];
    let data = DatasetData::from_serialize(&readings)?;
    let mood = Dataset::new(data).with_label("Mood");
    println!("Date series ({}):\n{}\n", mood.data().shape_name(), to_string(&mood)?);

    // Invalid input is rejected at construction
    let attempts = [
        value!({ "data": [1, "two", 3] }),
        value!({ "data": [1], "borderColor": "not-a-color" }),
        value!({ "label": "no data" }),
        value!({ "data": [1], "borderDash": [4, 2.5] }),
    ];
    for attempt in &attempts {
        match from_value::<Dataset>(attempt) {
            Ok(dataset) => println!("accepted: {}", to_string(&dataset)?),
            Err(err @ ChartError::RequiredFieldMissing { .. }) => println!("missing: {}", err),
            Err(err) => println!("rejected: {}", err),
        }
    }

    Ok(())
}

//! A two-series line chart with a legend and a title.
//!
//! Run with: cargo run --example line_chart

use chartjs_schema::{
    to_string_pretty, Chart, ChartType, Color, Data, Dataset, Legend, Options, Plugins, Position,
    Title,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut data = Data::new(Vec::new());
    data.push_dataset(
        Dataset::line(vec![0, 1, 2, 3])
            .with_label("Anxiety")
            .with_border_color(Color::parse("red")?),
    );
    data.push_dataset(
        Dataset::line(vec![5, 6, 7, 8])
            .with_label("Energy")
            .with_border_color(Color::parse("blue")?),
    );
    for label in ["0", "1", "2", "3"] {
        data.push_label(label);
    }

    let mut plugins = Plugins::new();
    plugins.insert("legend", Legend::new().with_position(Position::Top));
    plugins.insert(
        "title",
        Title::new().with_display(true).with_text("Test Chart"),
    );

    let chart = Chart::new(data)
        .with_chart_type(ChartType::Line)
        .with_options(Options::new(plugins).with_responsive(true));

    // Explicit defaults (top, display, responsive) are pruned from the output
    println!("{}", to_string_pretty(&chart)?);
    println!("\n{} datasets", chart.datasets().len());

    Ok(())
}

//! Alignment Charts demo
//!
//! Builds a small in-memory trajectory table, assembles the chart
//! specification and writes it out as JSON for a renderer to pick up.

use alignment_charts::{
    plot_trajectory, Layer, LineMetric, ObservationRow, PlotOptions, ReferenceData, ScenarioSpec,
};
use std::fs::File;

fn observation(metric: &str, metric_type: &str, year: i32, value: f64) -> ObservationRow {
    ObservationRow {
        year: Some(year),
        metric_type: Some(metric_type.to_string()),
        metric: Some(metric.to_string()),
        value: Some(value),
        technology: Some("renewablescap".to_string()),
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Alignment Charts v0.1.0");
    println!("=======================\n");

    let mut rows = Vec::new();
    for (year, value) in [(2025, 40.0), (2026, 43.0), (2027, 47.0), (2028, 50.0)] {
        rows.push(observation("projected", "portfolio", year, value));
    }
    for (year, value) in [(2025, 38.0), (2026, 40.0), (2027, 41.0), (2028, 43.0)] {
        rows.push(observation("corporate_economy", "benchmark", year, value));
    }
    for (year, value) in [(2025, 42.0), (2026, 48.0), (2027, 55.0), (2028, 62.0)] {
        rows.push(observation("target_sds", "scenario", year, value));
    }
    for (year, value) in [(2025, 40.0), (2026, 42.0), (2027, 44.0), (2028, 46.0)] {
        rows.push(observation("target_sps", "scenario", year, value));
    }

    let scenario_specs = vec![
        ScenarioSpec {
            scenario: "target_sds".to_string(),
            label: "SDS".to_string(),
            color: "#9cab7c".to_string(),
        },
        ScenarioSpec {
            scenario: "target_sps".to_string(),
            label: "SPS".to_string(),
            color: "#c3d7a4".to_string(),
        },
    ];
    let main_line = LineMetric {
        metric: "projected".to_string(),
        label: "Projected".to_string(),
    };
    let additional_lines = vec![LineMetric {
        metric: "corporate_economy".to_string(),
        label: "Corporate Economy".to_string(),
    }];

    let spec = plot_trajectory(
        &rows,
        &scenario_specs,
        &main_line,
        &additional_lines,
        &ReferenceData::default(),
        &PlotOptions::quick(),
    )?;

    println!("Chart: {}", spec.title);
    if let Some((lower, upper)) = spec.y_domain {
        println!("  y-range: {lower:.2} .. {upper:.2}");
    }
    println!("  Layers:");
    for layer in &spec.layers {
        match layer {
            Layer::Ribbon { series, points, .. } => {
                println!("    ribbon {series:<22} {} points", points.len())
            }
            Layer::Line { series, style, points, .. } => {
                println!("    line   {series:<22} {style:?}, {} points", points.len())
            }
            Layer::Bars { facet, stack, .. } => println!("    bars   {stack} @ {facet}"),
            Layer::Text { x, text, .. } => println!("    text   {text:<22} @ {x}"),
        }
    }

    let json_path = "trajectory_spec.json";
    let file = File::create(json_path)?;
    serde_json::to_writer_pretty(file, &spec)?;
    println!("\nChart specification written to: {json_path}");

    Ok(())
}

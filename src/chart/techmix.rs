//! Technology-mix chart: proportionally-stacked bars faceted by year

use super::{BarSegment, ChartSpec, Layer, LegendEntry};
use crate::data::{MetricKind, ObservationRow};
use crate::error::ChartError;
use crate::prepare::{prepare_techmix, to_title, PlotOptions, TechmixRow};
use crate::refdata::ReferenceData;
use crate::validate::{validate, ChartKind};

/// Build the chart specification for a techmix chart.
///
/// One proportionally-stacked bar per (year, metric-label) group, faceted by
/// year. Stacks are ordered portfolio first, then the non-scenario metrics in
/// table order, then the scenario last; the technology legend is reversed so
/// it reads top to bottom like the stacks.
pub fn plot_techmix(
    rows: &[ObservationRow],
    refdata: &ReferenceData,
    options: &PlotOptions,
) -> Result<ChartSpec, ChartError> {
    validate(rows, ChartKind::TechMix)?;
    let prepared = prepare_techmix(rows, options)?;

    let sector = prepared
        .first()
        .map(|row| row.sector.clone())
        .ok_or(ChartError::EmptyInput)?;

    let mut years: Vec<i32> = prepared.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let metrics = stack_order(&prepared);
    let technologies = distinct_technologies(&prepared);

    let mut layers = Vec::new();
    for &year in &years {
        for metric in &metrics {
            let group: Vec<&TechmixRow> = prepared
                .iter()
                .filter(|r| r.year == year && &r.metric == metric)
                .collect();
            let Some(first) = group.first() else {
                continue;
            };
            let total: f64 = group.iter().map(|r| r.share).sum();
            let segments = technologies
                .iter()
                .filter_map(|technology| {
                    group.iter().find(|r| &r.technology == technology).map(|r| {
                        BarSegment {
                            technology: r.technology.clone(),
                            label: r.label_tech.clone(),
                            value: if total > 0.0 { r.share / total } else { 0.0 },
                            color: refdata.technology_color(&sector, &r.technology),
                        }
                    })
                })
                .collect();
            layers.push(Layer::Bars {
                facet: year.to_string(),
                stack: first.label.clone(),
                segments,
            });
        }
    }

    if technologies.len() > refdata.series_palette.len() {
        log::warn!(
            "{} technologies share one palette; adjacent segments may be hard to tell apart",
            technologies.len()
        );
    }

    // Legend reversed for top-to-bottom readability against the stacks
    let legend: Vec<LegendEntry> = technologies
        .iter()
        .rev()
        .map(|technology| LegendEntry {
            label: prepared
                .iter()
                .find(|r| &r.technology == technology)
                .map(|r| r.label_tech.clone())
                .unwrap_or_else(|| technology.clone()),
            color: refdata.technology_color(&sector, technology),
        })
        .collect();

    let title = if options.pretty_labels {
        format!("Technology mix: {}", to_title(&sector))
    } else {
        format!("Technology mix: {sector}")
    };

    Ok(ChartSpec {
        title,
        x_label: String::new(),
        y_label: "Share of technology".to_string(),
        y_domain: Some((0.0, 1.0)),
        facet: Some("year".to_string()),
        layers,
        legend,
    })
}

/// Stack display order: portfolio, non-scenario metrics in table order,
/// scenario last.
fn stack_order(rows: &[TechmixRow]) -> Vec<String> {
    let mut portfolio = Vec::new();
    let mut middle = Vec::new();
    let mut scenario = Vec::new();
    for row in rows {
        let bucket = match row.kind {
            MetricKind::Portfolio => &mut portfolio,
            MetricKind::Scenario => &mut scenario,
            _ => &mut middle,
        };
        if !bucket.iter().any(|m| m == &row.metric) {
            bucket.push(row.metric.clone());
        }
    }
    portfolio.extend(middle);
    portfolio.extend(scenario);
    portfolio
}

fn distinct_technologies(rows: &[TechmixRow]) -> Vec<String> {
    let mut technologies: Vec<String> = Vec::new();
    for row in rows {
        if !technologies.iter().any(|t| t == &row.technology) {
            technologies.push(row.technology.clone());
        }
    }
    technologies
}

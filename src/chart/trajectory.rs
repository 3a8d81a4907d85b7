//! Trajectory chart: a portfolio line against an envelope of scenario bands

use super::{ChartSpec, Layer, LegendEntry, LinePoint, LineStyle, RibbonPoint, SUPPORT_LINE_STYLES};
use crate::data::{LineMetric, ObservationRow, ScenarioSpec};
use crate::error::ChartError;
use crate::layout::{compute_band_layout, BandLayout, WORSE_BAND_METRIC};
use crate::prepare::{prepare_trajectory, to_title, PlotOptions, TrajectoryRow};
use crate::refdata::{ReferenceData, TechnologyDirection};
use crate::validate::{validate, ChartKind};

/// Build the chart specification for a trajectory chart.
///
/// `scenario_specs` is ordered most to least sustainable and defines band
/// identity, draw order and color. The main line is drawn solid on top of the
/// bands; `additional_lines` take the fixed support-style rotation in order.
pub fn plot_trajectory(
    rows: &[ObservationRow],
    scenario_specs: &[ScenarioSpec],
    main_line: &LineMetric,
    additional_lines: &[LineMetric],
    refdata: &ReferenceData,
    options: &PlotOptions,
) -> Result<ChartSpec, ChartError> {
    validate(rows, ChartKind::Trajectory)?;
    let prepared = prepare_trajectory(rows, options)?;

    let technology = prepared
        .first()
        .map(|row| row.technology.clone())
        .ok_or(ChartError::EmptyInput)?;
    let direction = refdata.direction(&technology);
    let layout = compute_band_layout(&prepared, scenario_specs, direction)?;

    Ok(assemble(
        &prepared,
        &layout,
        scenario_specs,
        main_line,
        additional_lines,
        refdata,
        direction,
        options,
        &technology,
    ))
}

fn assemble(
    rows: &[TrajectoryRow],
    layout: &BandLayout,
    scenario_specs: &[ScenarioSpec],
    main_line: &LineMetric,
    additional_lines: &[LineMetric],
    refdata: &ReferenceData,
    direction: TechnologyDirection,
    options: &PlotOptions,
    technology: &str,
) -> ChartSpec {
    let mut layers = Vec::new();
    let mut legend = Vec::new();
    let last_year = rows.iter().map(|r| r.year).max().unwrap_or_default();

    // Ribbons draw first, in band order, so lines stay visible on top. Each
    // scenario band also gets a boundary line at its own target edge; the
    // synthetic band has no target of its own, so no line.
    for spec in scenario_specs {
        let band_points = ribbon_points(layout, &spec.scenario);
        layers.push(Layer::Ribbon {
            series: spec.label.clone(),
            color: spec.color.clone(),
            points: band_points.clone(),
        });
        let boundary: Vec<LinePoint> = band_points
            .iter()
            .map(|p| LinePoint {
                year: p.year,
                value: match direction {
                    TechnologyDirection::Brown => p.upper,
                    TechnologyDirection::Green => p.lower,
                },
            })
            .collect();
        layers.push(Layer::Line {
            series: spec.label.clone(),
            color: spec.color.clone(),
            style: LineStyle::Solid,
            points: boundary,
        });
        legend.push(LegendEntry {
            label: spec.label.clone(),
            color: spec.color.clone(),
        });
    }
    layers.push(Layer::Ribbon {
        series: refdata.worse_band_label().to_string(),
        color: refdata.worse_band_color.clone(),
        points: ribbon_points(layout, WORSE_BAND_METRIC),
    });
    legend.push(LegendEntry {
        label: refdata.worse_band_label().to_string(),
        color: refdata.worse_band_color.clone(),
    });

    for (index, line) in additional_lines.iter().enumerate() {
        // Positional rotation with wraparound: the 5th line reuses pair 1.
        let slot = index % SUPPORT_LINE_STYLES.len();
        let color = refdata.series_color(slot + 1);
        layers.push(Layer::Line {
            series: line.label.clone(),
            color: color.clone(),
            style: SUPPORT_LINE_STYLES[slot],
            points: line_points(rows, &line.metric),
        });
        legend.push(LegendEntry {
            label: line.label.clone(),
            color,
        });
    }

    let main_color = refdata.series_color(0);
    layers.push(Layer::Line {
        series: main_line.label.clone(),
        color: main_color.clone(),
        style: LineStyle::Solid,
        points: line_points(rows, &main_line.metric),
    });
    legend.push(LegendEntry {
        label: main_line.label.clone(),
        color: main_color.clone(),
    });

    if options.annotate {
        for spec in scenario_specs {
            if let Some(band) = layout
                .bands
                .iter()
                .rev()
                .find(|b| b.metric == spec.scenario && b.year == last_year)
            {
                layers.push(Layer::Text {
                    x: last_year,
                    y: (band.value_low + band.value) / 2.0,
                    text: spec.label.clone(),
                    color: spec.color.clone(),
                });
            }
        }
        let mut labelled: Vec<(&LineMetric, String)> = vec![(main_line, main_color)];
        for (index, line) in additional_lines.iter().enumerate() {
            labelled.push((line, refdata.series_color(index % SUPPORT_LINE_STYLES.len() + 1)));
        }
        for (line, color) in labelled {
            if let Some(point) = line_points(rows, &line.metric).last() {
                layers.push(Layer::Text {
                    x: point.year,
                    y: point.value,
                    text: line.label.clone(),
                    color,
                });
            }
        }
    }

    let title = if options.pretty_labels {
        format!("Trajectory: {}", to_title(technology))
    } else {
        format!("Trajectory: {technology}")
    };

    ChartSpec {
        title,
        x_label: "Year".to_string(),
        y_label: main_line.label.clone(),
        y_domain: Some((layout.borders.lower, layout.borders.upper)),
        facet: None,
        layers,
        legend,
    }
}

fn ribbon_points(layout: &BandLayout, metric: &str) -> Vec<RibbonPoint> {
    layout
        .bands
        .iter()
        .filter(|band| band.metric == metric)
        .map(|band| RibbonPoint {
            year: band.year,
            lower: band.value_low,
            upper: band.value,
        })
        .collect()
}

fn line_points(rows: &[TrajectoryRow], metric: &str) -> Vec<LinePoint> {
    let mut points: Vec<LinePoint> = rows
        .iter()
        .filter(|row| row.metric == metric)
        .map(|row| LinePoint {
            year: row.year,
            value: row.value,
        })
        .collect();
    points.sort_by_key(|p| p.year);
    points
}

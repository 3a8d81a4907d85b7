//! Reshaping of validated tables into plot-ready canonical rows
//!
//! Canonicalizes sector names, fills label columns, applies the optional
//! five-year window, and flattens the optional input columns into concrete
//! per-chart row types. Run [`crate::validate::validate`] first; these
//! functions assume the structural contract holds and only re-report a
//! missing column if handed an unvalidated table.

use crate::data::{MetricKind, ObservationRow, SCENARIO_PREFIX};
use crate::error::ChartError;

/// Options shared by the chart builders.
///
/// The defaults plot the full year span with labels taken verbatim from the
/// input; [`PlotOptions::quick`] is the preset the quick-plot variants use.
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    /// Restrict the plot to a five-year window from the start year.
    pub five_year_window: bool,
    /// Derive pretty display labels instead of raw metric names.
    pub pretty_labels: bool,
    /// Anchor per-series text annotations at the last year.
    pub annotate: bool,
    /// First plotted year; defaults to the minimum year in the data.
    pub start_year: Option<i32>,
}

impl PlotOptions {
    /// Preset for the quick-plot variants: five-year window, pretty labels,
    /// annotated series.
    pub fn quick() -> Self {
        Self {
            five_year_window: true,
            pretty_labels: true,
            annotate: true,
            start_year: None,
        }
    }
}

/// Canonical trajectory row, one per (year, metric).
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRow {
    pub year: i32,
    pub metric: String,
    pub kind: MetricKind,
    pub value: f64,
    pub technology: String,
}

/// Canonical techmix row, one per (year, metric, technology).
#[derive(Debug, Clone, PartialEq)]
pub struct TechmixRow {
    pub year: i32,
    pub metric: String,
    pub kind: MetricKind,
    pub technology: String,
    pub share: f64,
    /// Display label of the metric (bar stack).
    pub label: String,
    /// Display label of the technology (bar segment).
    pub label_tech: String,
    pub sector: String,
}

/// Canonical emission-intensity row, one per (year, metric).
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityRow {
    pub year: i32,
    pub metric: String,
    pub value: f64,
    pub label: String,
}

/// Canonicalize a free-text sector name.
///
/// Case-insensitive containment rules, checked in order; anything unmatched
/// comes back lower-cased as-is (including names that merely mention one of
/// the keywords, which is the intended catch-all behavior). Idempotent.
pub fn recode_sector(sector: &str) -> String {
    let lower = sector.to_lowercase();
    if lower.contains("power") {
        "power".to_string()
    } else if matches_keyword_plus(&lower, "auto") {
        "automotive".to_string()
    } else if matches_oil_then_gas(&lower) {
        "oil&gas".to_string()
    } else if matches_keyword_plus(&lower, "fossil") {
        "fossil fuels".to_string()
    } else {
        lower
    }
}

/// True when `text` contains `keyword` followed by at least one more
/// character (the `keyword.+` pattern).
fn matches_keyword_plus(text: &str, keyword: &str) -> bool {
    text.find(keyword)
        .is_some_and(|at| text.len() > at + keyword.len())
}

/// True when `text` contains "oil" with "gas" anywhere after it.
fn matches_oil_then_gas(text: &str) -> bool {
    text.find("oil")
        .is_some_and(|at| text[at + 3..].contains("gas"))
}

/// Title-case a snake_case or free-text name: "corporate_economy" becomes
/// "Corporate Economy".
pub fn to_title(text: &str) -> String {
    text.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pretty display label for a metric: the portfolio series reads
/// "Projected", scenarios read as their upper-cased suffix ("target_sds"
/// becomes "SDS"), everything else is title-cased.
pub fn format_metric_label(metric: &str) -> String {
    match MetricKind::of_metric(metric) {
        MetricKind::Portfolio => "Projected".to_string(),
        MetricKind::Scenario => metric
            .trim_start_matches(SCENARIO_PREFIX)
            .to_uppercase(),
        _ => to_title(metric),
    }
}

/// Flatten a validated trajectory table into canonical rows, applying the
/// optional rolling five-year window (`start ..= start + 5`).
pub fn prepare_trajectory(
    rows: &[ObservationRow],
    options: &PlotOptions,
) -> Result<Vec<TrajectoryRow>, ChartError> {
    let mut prepared = Vec::with_capacity(rows.len());
    for row in rows {
        prepared.push(TrajectoryRow {
            year: require_year(row)?,
            metric: require_text(row, "metric")?.to_string(),
            kind: MetricKind::of_metric_type(require_text(row, "metric_type")?),
            value: require_number(row, "value")?,
            technology: require_text(row, "technology")?.to_string(),
        });
    }

    let start = options
        .start_year
        .or_else(|| prepared.iter().map(|r| r.year).min())
        .unwrap_or_default();
    if options.five_year_window {
        prepared.retain(|row| row.year >= start && row.year <= start + 5);
    }
    Ok(prepared)
}

/// Flatten a validated techmix table into canonical rows.
///
/// Sector names are canonicalized, `label_tech` falls back to the technology
/// name, and `label` falls back to the metric (pretty-formatted when
/// requested). With the five-year window the table is filtered to exactly the
/// start year and start+5; no rows at start+5 is allowed, not an error. The
/// full-span plot narrows to the first and last available years, with a
/// non-fatal advisory since this regularly surprises users.
pub fn prepare_techmix(
    rows: &[ObservationRow],
    options: &PlotOptions,
) -> Result<Vec<TechmixRow>, ChartError> {
    let mut prepared = Vec::with_capacity(rows.len());
    for row in rows {
        let metric = require_text(row, "metric")?.to_string();
        let technology = require_text(row, "technology")?.to_string();
        let label = match row.label.clone() {
            Some(label) => label,
            None if options.pretty_labels => format_metric_label(&metric),
            None => metric.clone(),
        };
        let label_tech = match row.label_tech.clone() {
            Some(label) => label,
            None => technology.clone(),
        };
        prepared.push(TechmixRow {
            year: require_year(row)?,
            kind: MetricKind::of_metric(&metric),
            metric,
            technology,
            share: require_number(row, "technology_share")?,
            label,
            label_tech,
            sector: recode_sector(require_text(row, "sector")?),
        });
    }

    let start = options
        .start_year
        .or_else(|| prepared.iter().map(|r| r.year).min())
        .unwrap_or_default();
    if options.five_year_window {
        // Filter for the literal start+5 even when no data exists there.
        prepared.retain(|row| row.year == start || row.year == start + 5);
        if !prepared.iter().any(|row| row.year == start + 5) {
            log::warn!(
                "no techmix data at year {}; the chart will show year {} only",
                start + 5,
                start
            );
        }
    } else {
        let end = prepared.iter().map(|r| r.year).max().unwrap_or(start);
        prepared.retain(|row| row.year == start || row.year == end);
        log::info!(
            "techmix defaults to the extreme years {start} and {end}; \
             set a five-year window to plot {start} and {}",
            start + 5
        );
    }
    Ok(prepared)
}

/// Flatten a validated emission-intensity table into canonical rows,
/// applying the optional rolling five-year window.
pub fn prepare_emission_intensity(
    rows: &[ObservationRow],
    options: &PlotOptions,
) -> Result<Vec<IntensityRow>, ChartError> {
    let mut prepared = Vec::with_capacity(rows.len());
    for row in rows {
        let metric = require_text(row, "emission_factor_metric")?.to_string();
        let label = match row.label.clone() {
            Some(label) => label,
            None if options.pretty_labels => to_title(&metric),
            None => metric.clone(),
        };
        prepared.push(IntensityRow {
            year: require_year(row)?,
            value: require_number(row, "emission_factor_value")?,
            metric,
            label,
        });
    }

    let start = options
        .start_year
        .or_else(|| prepared.iter().map(|r| r.year).min())
        .unwrap_or_default();
    if options.five_year_window {
        prepared.retain(|row| row.year >= start && row.year <= start + 5);
    }
    Ok(prepared)
}

fn missing(column: &str) -> ChartError {
    ChartError::MissingColumns {
        columns: vec![column.to_string()],
        hint: "Validate the table before preparing it.".to_string(),
    }
}

fn require_text<'a>(row: &'a ObservationRow, column: &str) -> Result<&'a str, ChartError> {
    row.text_column(column).ok_or_else(|| missing(column))
}

fn require_year(row: &ObservationRow) -> Result<i32, ChartError> {
    row.year.ok_or_else(|| missing("year"))
}

fn require_number(row: &ObservationRow, column: &str) -> Result<f64, ChartError> {
    match column {
        "value" => row.value,
        "technology_share" => row.technology_share,
        "emission_factor_value" => row.emission_factor_value,
        _ => None,
    }
    .ok_or_else(|| missing(column))
}

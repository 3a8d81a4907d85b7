//! Structural validation of input tables per chart type
//!
//! Checks run in a fixed order and fail fast on the first violation:
//! non-empty table, required columns, single-valued identity columns, then
//! chart-specific metric vocabulary. Advisories (non-fatal diagnostics) go
//! through the `log` facade and never halt execution.

use crate::data::{MetricKind, ObservationRow};
use crate::error::ChartError;

/// Maximum number of distinct metric lines an emission-intensity chart
/// stays readable with.
pub const MAX_INTENSITY_LINES: usize = 7;

/// Identity columns that must hold a single value across the whole table,
/// checked wherever present.
const IDENTITY_COLUMNS: [&str; 3] = ["sector", "region", "scenario_source"];

/// The chart type an input table is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Portfolio line against an envelope of scenario bands.
    Trajectory,
    /// Proportionally-stacked technology-mix bars, faceted by year.
    TechMix,
    /// One intensity line per metric.
    EmissionIntensity,
}

impl ChartKind {
    /// Columns the input table must carry for this chart type.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            ChartKind::Trajectory => &["year", "metric_type", "metric", "value", "technology"],
            ChartKind::TechMix => &[
                "sector",
                "region",
                "scenario_source",
                "technology",
                "year",
                "metric",
                "technology_share",
            ],
            ChartKind::EmissionIntensity => &[
                "sector",
                "year",
                "emission_factor_metric",
                "emission_factor_value",
            ],
        }
    }

    /// Names the reference dataset shape the input should match, for the
    /// missing-column error message.
    fn shape_hint(self) -> &'static str {
        match self {
            ChartKind::Trajectory | ChartKind::TechMix => {
                "The input must match the market-share alignment output \
                 (one row per sector, technology, year, region, scenario source and metric)."
            }
            ChartKind::EmissionIntensity => {
                "The input must match the emission-intensity (SDA) output \
                 (one row per sector, year and emission factor metric)."
            }
        }
    }
}

/// Validate an input table against the structural contract of `kind`.
///
/// Returns the first violation found; a table that passes is safe to hand to
/// the matching `prepare_*` function.
pub fn validate(rows: &[ObservationRow], kind: ChartKind) -> Result<(), ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyInput);
    }

    let missing: Vec<String> = kind
        .required_columns()
        .iter()
        .filter(|column| !rows.iter().all(|row| row.has_column(column)))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ChartError::MissingColumns {
            columns: missing,
            hint: kind.shape_hint().to_string(),
        });
    }

    for column in IDENTITY_COLUMNS {
        if !rows.iter().all(|row| row.has_column(column)) {
            continue;
        }
        let values = distinct_text(rows, column);
        if values.len() > 1 {
            return Err(ChartError::MultipleValues {
                column: column.to_string(),
                values,
            });
        }
    }

    match kind {
        ChartKind::TechMix => {
            let scenarios: Vec<String> = distinct_text(rows, "metric")
                .into_iter()
                .filter(|metric| MetricKind::of_metric(metric) == MetricKind::Scenario)
                .collect();
            match scenarios.len() {
                0 => return Err(ChartError::NoScenario),
                1 => {}
                _ => return Err(ChartError::MultipleScenarios { values: scenarios }),
            }
        }
        ChartKind::EmissionIntensity => {
            let lines = distinct_text(rows, "emission_factor_metric").len();
            if lines > MAX_INTENSITY_LINES {
                return Err(ChartError::TooManyLines {
                    found: lines,
                    max: MAX_INTENSITY_LINES,
                });
            }
        }
        ChartKind::Trajectory => {}
    }

    Ok(())
}

/// Distinct values of a text column in first-seen order.
fn distinct_text(rows: &[ObservationRow], column: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for row in rows {
        if let Some(text) = row.text_column(column) {
            if !values.iter().any(|v| v == text) {
                values.push(text.to_string());
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn techmix_row(metric: &str, year: i32, technology: &str, share: f64) -> ObservationRow {
        ObservationRow {
            sector: Some("power".to_string()),
            region: Some("global".to_string()),
            scenario_source: Some("weo_2023".to_string()),
            technology: Some(technology.to_string()),
            year: Some(year),
            metric: Some(metric.to_string()),
            technology_share: Some(share),
            ..Default::default()
        }
    }

    fn intensity_row(metric: &str, year: i32, value: f64) -> ObservationRow {
        ObservationRow {
            sector: Some("cement".to_string()),
            year: Some(year),
            emission_factor_metric: Some(metric.to_string()),
            emission_factor_value: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_fails_first() {
        // Must be EmptyInput, not a missing-column or index error
        assert_eq!(
            validate(&[], ChartKind::TechMix),
            Err(ChartError::EmptyInput)
        );
        assert_eq!(
            validate(&[], ChartKind::Trajectory),
            Err(ChartError::EmptyInput)
        );
        assert_eq!(
            validate(&[], ChartKind::EmissionIntensity),
            Err(ChartError::EmptyInput)
        );
    }

    #[test]
    fn test_missing_column_named_exactly() {
        let mut row = techmix_row("projected", 2025, "renewablescap", 0.3);
        row.technology_share = None;
        match validate(&[row], ChartKind::TechMix) {
            Err(ChartError::MissingColumns { columns, .. }) => {
                assert_eq!(columns, vec!["technology_share".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_values_in_identity_column() {
        let mut rows = vec![
            techmix_row("projected", 2025, "renewablescap", 0.3),
            techmix_row("target_sds", 2025, "renewablescap", 0.4),
        ];
        rows[1].region = Some("europe".to_string());
        match validate(&rows, ChartKind::TechMix) {
            Err(ChartError::MultipleValues { column, values }) => {
                assert_eq!(column, "region");
                assert_eq!(values, vec!["global".to_string(), "europe".to_string()]);
            }
            other => panic!("expected MultipleValues, got {:?}", other),
        }
    }

    #[test]
    fn test_techmix_requires_exactly_one_scenario() {
        let no_scenario = vec![
            techmix_row("projected", 2025, "renewablescap", 0.3),
            techmix_row("corporate_economy", 2025, "renewablescap", 0.35),
        ];
        assert_eq!(
            validate(&no_scenario, ChartKind::TechMix),
            Err(ChartError::NoScenario)
        );

        let two_scenarios = vec![
            techmix_row("projected", 2025, "renewablescap", 0.3),
            techmix_row("target_sds", 2025, "renewablescap", 0.4),
            techmix_row("target_cps", 2025, "renewablescap", 0.35),
        ];
        match validate(&two_scenarios, ChartKind::TechMix) {
            Err(ChartError::MultipleScenarios { values }) => {
                assert_eq!(
                    values,
                    vec!["target_sds".to_string(), "target_cps".to_string()]
                );
            }
            other => panic!("expected MultipleScenarios, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_scenarios_message_suggests_filter() {
        let err = ChartError::MultipleScenarios {
            values: vec!["target_sds".to_string(), "target_cps".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("target_sds, target_cps"));
        assert!(message.contains("drop rows where metric == \"target_cps\""));
    }

    #[test]
    fn test_emission_intensity_line_cap() {
        let mut rows: Vec<ObservationRow> = (0..MAX_INTENSITY_LINES)
            .map(|i| intensity_row(&format!("metric_{i}"), 2025, 1.0))
            .collect();
        assert_eq!(validate(&rows, ChartKind::EmissionIntensity), Ok(()));

        rows.push(intensity_row("metric_7", 2025, 1.0));
        assert_eq!(
            validate(&rows, ChartKind::EmissionIntensity),
            Err(ChartError::TooManyLines { found: 8, max: 7 })
        );
    }

    #[test]
    fn test_valid_techmix_passes() {
        let rows = vec![
            techmix_row("projected", 2025, "renewablescap", 0.3),
            techmix_row("corporate_economy", 2025, "renewablescap", 0.35),
            techmix_row("target_sds", 2025, "renewablescap", 0.45),
        ];
        assert_eq!(validate(&rows, ChartKind::TechMix), Ok(()));
    }
}

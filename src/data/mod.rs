//! Input data model: observation rows, metric classification, side tables
//!
//! An input table is a `Vec<ObservationRow>`. The row is a superset over the
//! three chart input schemas (trajectory, techmix, emission intensity), with
//! every column optional so that column presence can be checked per table
//! instead of failing inside serde.

pub mod loader;

use serde::Deserialize;

/// One row of an input table.
///
/// Which columns must be populated depends on the chart type; see
/// [`crate::validate::ChartKind::required_columns`]. A column counts as
/// present only when every row of the table carries a value for it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObservationRow {
    pub sector: Option<String>,
    pub region: Option<String>,
    pub scenario_source: Option<String>,
    pub technology: Option<String>,
    pub year: Option<i32>,
    /// Trajectory inputs carry an explicit series classification.
    pub metric_type: Option<String>,
    pub metric: Option<String>,
    /// Trajectory value column (e.g. production).
    pub value: Option<f64>,
    /// Techmix value column.
    pub technology_share: Option<f64>,
    /// Emission-intensity metric column.
    pub emission_factor_metric: Option<String>,
    pub emission_factor_value: Option<f64>,
    pub label: Option<String>,
    pub label_tech: Option<String>,
}

impl ObservationRow {
    /// Whether this row carries a value for the named column.
    pub fn has_column(&self, column: &str) -> bool {
        match column {
            "sector" => self.sector.is_some(),
            "region" => self.region.is_some(),
            "scenario_source" => self.scenario_source.is_some(),
            "technology" => self.technology.is_some(),
            "year" => self.year.is_some(),
            "metric_type" => self.metric_type.is_some(),
            "metric" => self.metric.is_some(),
            "value" => self.value.is_some(),
            "technology_share" => self.technology_share.is_some(),
            "emission_factor_metric" => self.emission_factor_metric.is_some(),
            "emission_factor_value" => self.emission_factor_value.is_some(),
            "label" => self.label.is_some(),
            "label_tech" => self.label_tech.is_some(),
            _ => false,
        }
    }

    /// Text content of the named column, for distinct-value checks.
    pub fn text_column(&self, column: &str) -> Option<&str> {
        match column {
            "sector" => self.sector.as_deref(),
            "region" => self.region.as_deref(),
            "scenario_source" => self.scenario_source.as_deref(),
            "technology" => self.technology.as_deref(),
            "metric_type" => self.metric_type.as_deref(),
            "metric" => self.metric.as_deref(),
            "emission_factor_metric" => self.emission_factor_metric.as_deref(),
            "label" => self.label.as_deref(),
            "label_tech" => self.label_tech.as_deref(),
            _ => None,
        }
    }
}

/// Metric name a portfolio series always uses.
pub const PORTFOLIO_METRIC: &str = "projected";

/// Prefix that marks a metric as a scenario target.
pub const SCENARIO_PREFIX: &str = "target_";

/// Metric name of the sector-wide benchmark series.
pub const BENCHMARK_METRIC: &str = "corporate_economy";

/// Closed classification of a metric into the role it plays in a chart.
///
/// The naming convention is fixed, not configurable per call; this is the
/// single place in the crate where it is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// The analyzed entity's actual/projected series.
    Portfolio,
    /// A comparison series not tied to a climate scenario.
    Benchmark,
    /// A named climate-policy pathway target.
    Scenario,
    Other,
}

impl MetricKind {
    /// Classify a metric name by the fixed exact/prefix convention.
    pub fn of_metric(metric: &str) -> Self {
        if metric == PORTFOLIO_METRIC {
            MetricKind::Portfolio
        } else if metric.starts_with(SCENARIO_PREFIX) {
            MetricKind::Scenario
        } else if metric == BENCHMARK_METRIC {
            MetricKind::Benchmark
        } else {
            MetricKind::Other
        }
    }

    /// Classify from a trajectory table's explicit `metric_type` column.
    pub fn of_metric_type(metric_type: &str) -> Self {
        match metric_type {
            "portfolio" => MetricKind::Portfolio,
            "benchmark" => MetricKind::Benchmark,
            "scenario" => MetricKind::Scenario,
            _ => MetricKind::Other,
        }
    }
}

/// One scenario band of a trajectory chart.
///
/// Supplied by the caller as an ordered sequence, most to least sustainable.
/// Order defines band identity and draw order; the sequence is read-only
/// during chart construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioSpec {
    /// Scenario metric name as it appears in the input table.
    pub scenario: String,
    /// Display label.
    pub label: String,
    /// Band fill color.
    pub color: String,
}

/// A metric-to-label pairing for the main line or an additional line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineMetric {
    pub metric: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_classification() {
        assert_eq!(MetricKind::of_metric("projected"), MetricKind::Portfolio);
        assert_eq!(MetricKind::of_metric("target_sds"), MetricKind::Scenario);
        assert_eq!(MetricKind::of_metric("target_cps"), MetricKind::Scenario);
        assert_eq!(
            MetricKind::of_metric("corporate_economy"),
            MetricKind::Benchmark
        );
        assert_eq!(MetricKind::of_metric("exchange_traded"), MetricKind::Other);
    }

    #[test]
    fn test_metric_type_classification() {
        assert_eq!(
            MetricKind::of_metric_type("portfolio"),
            MetricKind::Portfolio
        );
        assert_eq!(MetricKind::of_metric_type("scenario"), MetricKind::Scenario);
        assert_eq!(
            MetricKind::of_metric_type("benchmark"),
            MetricKind::Benchmark
        );
        assert_eq!(MetricKind::of_metric_type("unknown"), MetricKind::Other);
    }

    #[test]
    fn test_column_presence() {
        let row = ObservationRow {
            sector: Some("power".to_string()),
            year: Some(2025),
            ..Default::default()
        };
        assert!(row.has_column("sector"));
        assert!(row.has_column("year"));
        assert!(!row.has_column("metric"));
        assert!(!row.has_column("no_such_column"));
        assert_eq!(row.text_column("sector"), Some("power"));
        assert_eq!(row.text_column("metric"), None);
    }
}

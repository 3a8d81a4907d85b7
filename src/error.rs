//! Error taxonomy for validation and layout
//!
//! Every failure is raised eagerly at the validator or layout boundary,
//! before any chart object is assembled. Partial chart specs are never
//! returned; the only recovery path is the caller correcting the input.

use thiserror::Error;

/// Errors raised while validating input tables or computing band geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// The input table has no rows.
    #[error("input data is empty")]
    EmptyInput,

    /// One or more columns required by the chart type are absent.
    #[error(
        "missing required column(s): {}. {hint}",
        .columns.join(", ")
    )]
    MissingColumns {
        /// Columns absent from the input table.
        columns: Vec<String>,
        /// Names the reference dataset shape the input should match.
        hint: String,
    },

    /// A column that must hold a single value holds several.
    #[error(
        "column `{column}` must have a single value, found {}: {}",
        .values.len(),
        .values.join(", ")
    )]
    MultipleValues { column: String, values: Vec<String> },

    /// No scenario metric present where exactly one is required.
    #[error("no scenario metric found; expected exactly one metric named `target_*`")]
    NoScenario,

    /// More than one scenario metric present where exactly one is required.
    #[error(
        "expected a single scenario metric, found {}: {}. Keep one scenario, \
         e.g. drop rows where metric == \"{}\"",
        .values.len(),
        .values.join(", "),
        .values.last().map(String::as_str).unwrap_or_default()
    )]
    MultipleScenarios { values: Vec<String> },

    /// More distinct metric lines than a readable chart can carry.
    #[error("too many lines to plot: {found} metrics, at most {max} are readable")]
    TooManyLines { found: usize, max: usize },

    /// All values in the window are identical, so fractional distances
    /// from the borders are undefined.
    #[error("value range is degenerate: every value equals {value}")]
    DegenerateRange { value: f64 },
}

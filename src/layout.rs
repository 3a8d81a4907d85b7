//! Band layout engine for the trajectory chart
//!
//! Computes the stacked ribbon geometry: the visual y-range for the ribbon
//! stack, the asymmetric tightening that keeps the portfolio's starting value
//! near the vertical middle, and one contiguous `{value_low, value}` interval
//! per (year, scenario) band. All geometry is recomputed from scratch per
//! chart-build call; nothing is cached across calls.

use crate::data::ScenarioSpec;
use crate::error::ChartError;
use crate::prepare::TrajectoryRow;
use crate::refdata::TechnologyDirection;

/// Maximum tolerated difference between the start value's fractional
/// distances from the two borders before one border is tightened.
pub const CENTERING_THRESHOLD: f64 = 0.1;

/// Metric name of the synthetic band beyond the least sustainable scenario.
pub const WORSE_BAND_METRIC: &str = "worse_than_scenarios";

/// The visual y-range of the ribbon stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBorders {
    pub lower: f64,
    pub upper: f64,
}

impl AreaBorders {
    /// Tighten whichever border is farther from `start_value` so that the
    /// start value sits within 10 percentage-points-of-span from center.
    ///
    /// One-directional: only the farther border moves, and only when the
    /// fractional distances differ by more than [`CENTERING_THRESHOLD`].
    /// The two cases are deliberately separate branches; the moved border
    /// ends up `CENTERING_THRESHOLD` of the original span past the start
    /// value's distance to the untouched border.
    pub fn centered_on(self, start_value: f64) -> AreaBorders {
        let span = self.upper - self.lower;
        let dist_lower = (start_value - self.lower) / span;
        let dist_upper = (self.upper - start_value) / span;

        if dist_lower - dist_upper > CENTERING_THRESHOLD {
            AreaBorders {
                lower: start_value - (dist_upper + CENTERING_THRESHOLD) * span,
                upper: self.upper,
            }
        } else if dist_upper - dist_lower > CENTERING_THRESHOLD {
            AreaBorders {
                lower: self.lower,
                upper: start_value + (dist_lower + CENTERING_THRESHOLD) * span,
            }
        } else {
            self
        }
    }
}

/// One scenario band at one year, bounded by `value_low` and `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandRow {
    pub year: i32,
    pub metric: String,
    pub value_low: f64,
    pub value: f64,
}

/// Output of the layout engine: the y-range plus one band row per
/// (year, scenario), the synthetic worse-than-scenarios band last.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLayout {
    pub borders: AreaBorders,
    pub bands: Vec<BandRow>,
}

/// Global value bounds across all rows in the input window.
///
/// Fails with [`ChartError::DegenerateRange`] when every value is identical,
/// since the fractional distances used for centering would be undefined.
pub fn area_borders(rows: &[TrajectoryRow]) -> Result<AreaBorders, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let mut lower = f64::INFINITY;
    let mut upper = f64::NEG_INFINITY;
    for row in rows {
        lower = lower.min(row.value);
        upper = upper.max(row.value);
    }
    if upper == lower {
        return Err(ChartError::DegenerateRange { value: lower });
    }
    Ok(AreaBorders { lower, upper })
}

/// Compute the stacked band geometry for a trajectory chart.
///
/// `scenario_specs` is ordered most to least sustainable; `direction` decides
/// which border is the "worst" extreme and therefore which direction the
/// bands stack in. For every year the produced intervals, in spec order plus
/// the synthetic band, are contiguous and exactly tile the borders.
pub fn compute_band_layout(
    rows: &[TrajectoryRow],
    scenario_specs: &[ScenarioSpec],
    direction: TechnologyDirection,
) -> Result<BandLayout, ChartError> {
    let borders = area_borders(rows)?;

    // Empty rows is caught above, so a minimum year exists.
    let start_year = rows.iter().map(|r| r.year).min().unwrap_or_default();
    let start_value = rows
        .iter()
        .find(|r| r.year == start_year && r.kind == crate::data::MetricKind::Portfolio)
        .map(|r| r.value);
    // Without a portfolio start value the borders stay at the raw extremes.
    let borders = match start_value {
        Some(value) => borders.centered_on(value),
        None => borders,
    };

    let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let mut bands = Vec::with_capacity(years.len() * (scenario_specs.len() + 1));
    for &year in &years {
        match direction {
            // High values are bad: stack upward from the lower border, the
            // synthetic band pins to the upper border.
            TechnologyDirection::Brown => {
                let mut floor = borders.lower;
                for spec in scenario_specs {
                    let ceiling = scenario_value(rows, &spec.scenario, year)
                        .map(|v| v.clamp(floor, borders.upper))
                        .unwrap_or(floor);
                    bands.push(BandRow {
                        year,
                        metric: spec.scenario.clone(),
                        value_low: floor,
                        value: ceiling,
                    });
                    floor = ceiling;
                }
                bands.push(BandRow {
                    year,
                    metric: WORSE_BAND_METRIC.to_string(),
                    value_low: floor,
                    value: borders.upper,
                });
            }
            // Low values are bad: mirrored stacking downward from the upper
            // border, the synthetic band pins to the lower border.
            TechnologyDirection::Green => {
                let mut ceiling = borders.upper;
                for spec in scenario_specs {
                    let floor = scenario_value(rows, &spec.scenario, year)
                        .map(|v| v.clamp(borders.lower, ceiling))
                        .unwrap_or(ceiling);
                    bands.push(BandRow {
                        year,
                        metric: spec.scenario.clone(),
                        value_low: floor,
                        value: ceiling,
                    });
                    ceiling = floor;
                }
                bands.push(BandRow {
                    year,
                    metric: WORSE_BAND_METRIC.to_string(),
                    value_low: borders.lower,
                    value: ceiling,
                });
            }
        }
    }

    Ok(BandLayout { borders, bands })
}

fn scenario_value(rows: &[TrajectoryRow], metric: &str, year: i32) -> Option<f64> {
    rows.iter()
        .find(|r| r.year == year && r.metric == metric)
        .map(|r| r.value)
}

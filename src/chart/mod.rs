//! Declarative chart specification handed to the external renderer
//!
//! A [`ChartSpec`] is an ordered list of draw instructions plus scales,
//! facets and a legend. It serializes to JSON so it can be inspected in
//! tests or handed across a process boundary; the rendering itself is out of
//! scope for this crate.

pub mod emission_intensity;
pub mod techmix;
pub mod trajectory;

pub use emission_intensity::plot_emission_intensity;
pub use techmix::plot_techmix;
pub use trajectory::plot_trajectory;

use serde::Serialize;

/// Line style of a line layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DotDash,
    LongDash,
}

/// Fixed rotation of styles for supporting lines, applied positionally.
///
/// The rotation wraps around: a 5th supporting metric reuses the 1st pair.
/// That bounded-list-with-wraparound behavior is intentional, not a bug to
/// fix; charts with more than 4 supporting lines are already hard to read.
pub const SUPPORT_LINE_STYLES: [LineStyle; 4] = [
    LineStyle::Dashed,
    LineStyle::Dotted,
    LineStyle::DotDash,
    LineStyle::LongDash,
];

/// One point of a line layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub year: i32,
    pub value: f64,
}

/// One point of a ribbon layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibbonPoint {
    pub year: i32,
    pub lower: f64,
    pub upper: f64,
}

/// One segment of a stacked bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSegment {
    pub technology: String,
    pub label: String,
    /// Proportional share within the stack; segments of one stack sum to 1.
    pub value: f64,
    pub color: String,
}

/// One draw instruction for the renderer. Layers draw in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Ribbon {
        series: String,
        color: String,
        points: Vec<RibbonPoint>,
    },
    Line {
        series: String,
        color: String,
        style: LineStyle,
        points: Vec<LinePoint>,
    },
    Bars {
        /// Facet value this stack belongs to (the year, for techmix).
        facet: String,
        /// Stack identity and axis label.
        stack: String,
        segments: Vec<BarSegment>,
    },
    Text {
        x: i32,
        y: f64,
        text: String,
        color: String,
    },
}

/// One legend entry; entry order is the top-to-bottom display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// A complete declarative chart specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Fixed y-range; `None` lets the renderer fit the data.
    pub y_domain: Option<(f64, f64)>,
    /// Facet variable, when the chart splits into small multiples.
    pub facet: Option<String>,
    pub layers: Vec<Layer>,
    pub legend: Vec<LegendEntry>,
}

//! Alignment Charts - validation and chart assembly for climate scenario alignment data
//!
//! This library provides:
//! - Structural validation of alignment tables per chart type
//! - Reshaping into canonical plot-ready rows (labels, sector recoding, year windows)
//! - Band layout for trajectory charts (scenario ribbon geometry)
//! - Declarative chart specifications for an external renderer

pub mod chart;
pub mod data;
pub mod error;
pub mod layout;
pub mod prepare;
pub mod refdata;
pub mod validate;

// Re-export commonly used types
pub use chart::{plot_emission_intensity, plot_techmix, plot_trajectory, ChartSpec, Layer};
pub use data::{LineMetric, MetricKind, ObservationRow, ScenarioSpec};
pub use error::ChartError;
pub use layout::{compute_band_layout, AreaBorders, BandLayout, BandRow};
pub use prepare::PlotOptions;
pub use refdata::{ReferenceData, TechnologyDirection};
pub use validate::{validate, ChartKind};

//! Read-only reference data injected into layout and assembly
//!
//! Technology colors, the green/brown classification, and the generic series
//! palette. Built-in defaults cover the canonical sectors; analysts with
//! custom palettes load them from CSV files instead.

use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

/// Fallback color for technologies absent from the palette.
pub const NEUTRAL_COLOR: &str = "#c0c0c0";

/// Whether high or low values of a technology represent better alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechnologyDirection {
    /// More is better; low values are the bad extreme.
    Green,
    /// Less is better; high values are the bad extreme.
    Brown,
}

/// Injected read-only context for chart construction.
///
/// Passed explicitly into the layout engine and the assemblers; there are no
/// ambient/global lookups.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// (sector, technology) -> fill color.
    technology_colors: HashMap<(String, String), String>,
    /// technology -> direction; technologies not listed count as green.
    brown_technologies: Vec<String>,
    /// Rotation of colors for auxiliary series.
    pub series_palette: Vec<String>,
    /// Fill of the synthetic worse-than-scenarios band.
    pub worse_band_color: String,
}

impl Default for ReferenceData {
    fn default() -> Self {
        let palette = [
            ("power", "coal", "#212121"),
            ("power", "oil", "#6e4e45"),
            ("power", "gas", "#9e9e9e"),
            ("power", "nuclear", "#7b68ae"),
            ("power", "hydro", "#4ea6dd"),
            ("power", "renewables", "#87bc45"),
            ("automotive", "ice", "#6e4e45"),
            ("automotive", "hybrid", "#f2b84b"),
            ("automotive", "fuelcell", "#7b68ae"),
            ("automotive", "electric", "#87bc45"),
            ("oil&gas", "oil", "#212121"),
            ("oil&gas", "gas", "#9e9e9e"),
            ("fossil fuels", "coal", "#212121"),
            ("fossil fuels", "oil", "#6e4e45"),
            ("fossil fuels", "gas", "#9e9e9e"),
        ];
        let technology_colors = palette
            .into_iter()
            .map(|(sector, technology, color)| {
                ((sector.to_string(), technology.to_string()), color.to_string())
            })
            .collect();

        Self {
            technology_colors,
            brown_technologies: ["coal", "oil", "gas", "ice"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            series_palette: [
                "#1b324f", "#00c082", "#ff9623", "#574099", "#78c4d6", "#a63d57", "#f2e06e",
                "#454545",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            worse_band_color: "#b33946".to_string(),
        }
    }
}

/// CSV row of a technology color palette file.
#[derive(Debug, Deserialize)]
struct ColorRow {
    sector: String,
    technology: String,
    color: String,
}

/// CSV row of a technology direction file.
#[derive(Debug, Deserialize)]
struct DirectionRow {
    technology: String,
    direction: String,
}

impl ReferenceData {
    /// Load the palette and direction tables from a directory holding
    /// `technology_colors.csv` and `technology_directions.csv`. The series
    /// palette and synthetic-band color keep their defaults.
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let mut refdata = Self::default();

        let mut reader = csv::Reader::from_path(path.join("technology_colors.csv"))?;
        refdata.technology_colors.clear();
        for result in reader.deserialize() {
            let row: ColorRow = result?;
            refdata
                .technology_colors
                .insert((row.sector, row.technology), row.color);
        }

        let mut reader = csv::Reader::from_path(path.join("technology_directions.csv"))?;
        refdata.brown_technologies.clear();
        for result in reader.deserialize() {
            let row: DirectionRow = result?;
            if row.direction == "brown" {
                refdata.brown_technologies.push(row.technology);
            }
        }

        Ok(refdata)
    }

    /// Fill color of a technology within a sector.
    pub fn technology_color(&self, sector: &str, technology: &str) -> String {
        // Palette keys are exact; techmix inputs often suffix the technology
        // with the market (e.g. "renewablescap"), so fall back to a prefix
        // match before giving up.
        if let Some(color) = self
            .technology_colors
            .get(&(sector.to_string(), technology.to_string()))
        {
            return color.clone();
        }
        for ((s, t), color) in &self.technology_colors {
            if s == sector && technology.starts_with(t.as_str()) {
                return color.clone();
            }
        }
        NEUTRAL_COLOR.to_string()
    }

    /// Green/brown classification of a technology. Unlisted technologies
    /// count as green.
    pub fn direction(&self, technology: &str) -> TechnologyDirection {
        let brown = self
            .brown_technologies
            .iter()
            .any(|t| technology.starts_with(t.as_str()));
        if brown {
            TechnologyDirection::Brown
        } else {
            TechnologyDirection::Green
        }
    }

    /// Color of an auxiliary series by position, wrapping around the palette.
    pub fn series_color(&self, index: usize) -> String {
        self.series_palette[index % self.series_palette.len()].clone()
    }

    /// Display label of the synthetic worse-than-scenarios band.
    pub fn worse_band_label(&self) -> &'static str {
        "Worse than scenarios"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technology_color_lookup() {
        let refdata = ReferenceData::default();
        assert_eq!(refdata.technology_color("power", "coal"), "#212121");
        // Market-suffixed technologies resolve via the prefix fallback
        assert_eq!(
            refdata.technology_color("power", "renewablescap"),
            "#87bc45"
        );
        assert_eq!(
            refdata.technology_color("power", "unobtainium"),
            NEUTRAL_COLOR
        );
    }

    #[test]
    fn test_direction_classification() {
        let refdata = ReferenceData::default();
        assert_eq!(refdata.direction("coal"), TechnologyDirection::Brown);
        assert_eq!(refdata.direction("ice"), TechnologyDirection::Brown);
        assert_eq!(refdata.direction("oilcap"), TechnologyDirection::Brown);
        assert_eq!(refdata.direction("renewablescap"), TechnologyDirection::Green);
        assert_eq!(refdata.direction("electric"), TechnologyDirection::Green);
    }

    #[test]
    fn test_series_color_wraps() {
        let refdata = ReferenceData::default();
        let len = refdata.series_palette.len();
        assert_eq!(refdata.series_color(0), refdata.series_color(len));
    }
}

//! CSV-based table loaders
//!
//! Loads observation tables and side tables from CSV files or readers.
//! Observation rows deserialize with every column optional, so tables carrying
//! any column subset load cleanly; the validator decides what is required.

use super::{LineMetric, ObservationRow, ScenarioSpec};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Load an observation table from a CSV file.
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<ObservationRow>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: ObservationRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load an observation table from any reader (e.g. string buffer).
pub fn load_observations_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ObservationRow>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ObservationRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load scenario specs from a CSV file with columns scenario,label,color.
///
/// Row order is meaningful: most to least sustainable.
pub fn load_scenario_specs<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioSpec>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut specs = Vec::new();

    for result in reader.deserialize() {
        let spec: ScenarioSpec = result?;
        specs.push(spec);
    }

    Ok(specs)
}

/// Load line-metric side tables (metric,label) from a CSV file.
pub fn load_line_metrics<P: AsRef<Path>>(path: P) -> Result<Vec<LineMetric>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut lines = Vec::new();

    for result in reader.deserialize() {
        let line: LineMetric = result?;
        lines.push(line);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_observations_from_reader() {
        let csv = "\
sector,technology,year,region,scenario_source,metric,technology_share
power,renewablescap,2025,global,weo_2023,projected,0.25
power,renewablescap,2030,global,weo_2023,target_sds,0.45
";
        let rows = load_observations_from_reader(csv.as_bytes()).expect("csv should parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sector.as_deref(), Some("power"));
        assert_eq!(rows[0].technology_share, Some(0.25));
        // Columns absent from the file stay unset rather than erroring
        assert!(rows[0].value.is_none());
        assert!(rows[0].label.is_none());
        assert_eq!(rows[1].metric.as_deref(), Some("target_sds"));
    }

    #[test]
    fn test_load_scenario_specs_from_reader() {
        let csv = "\
scenario,label,color
target_sds,SDS,#9cab7c
target_sps,SPS,#c3d7a4
";
        let mut reader = Reader::from_reader(csv.as_bytes());
        let specs: Vec<ScenarioSpec> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("csv should parse");
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].scenario, "target_sds");
        assert_eq!(specs[1].color, "#c3d7a4");
    }
}

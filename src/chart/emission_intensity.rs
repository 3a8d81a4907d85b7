//! Emission-intensity chart: one line per emission factor metric

use super::{ChartSpec, Layer, LegendEntry, LinePoint, LineStyle};
use crate::data::ObservationRow;
use crate::error::ChartError;
use crate::prepare::{prepare_emission_intensity, recode_sector, to_title, PlotOptions};
use crate::refdata::ReferenceData;
use crate::validate::{validate, ChartKind};

/// Build the chart specification for an emission-intensity chart.
///
/// One solid line per metric, colored from the generic series palette. The
/// validator caps the line count at
/// [`crate::validate::MAX_INTENSITY_LINES`].
pub fn plot_emission_intensity(
    rows: &[ObservationRow],
    refdata: &ReferenceData,
    options: &PlotOptions,
) -> Result<ChartSpec, ChartError> {
    validate(rows, ChartKind::EmissionIntensity)?;
    let prepared = prepare_emission_intensity(rows, options)?;

    let sector = rows
        .first()
        .and_then(|row| row.sector.as_deref())
        .map(recode_sector)
        .ok_or(ChartError::EmptyInput)?;

    let mut metrics: Vec<(String, String)> = Vec::new();
    for row in &prepared {
        if !metrics.iter().any(|(metric, _)| metric == &row.metric) {
            metrics.push((row.metric.clone(), row.label.clone()));
        }
    }

    let mut layers = Vec::new();
    let mut legend = Vec::new();
    for (index, (metric, label)) in metrics.iter().enumerate() {
        let mut points: Vec<LinePoint> = prepared
            .iter()
            .filter(|row| &row.metric == metric)
            .map(|row| LinePoint {
                year: row.year,
                value: row.value,
            })
            .collect();
        points.sort_by_key(|p| p.year);

        let color = refdata.series_color(index);
        let annotation = match points.last() {
            Some(last) if options.annotate => Some(Layer::Text {
                x: last.year,
                y: last.value,
                text: label.clone(),
                color: color.clone(),
            }),
            _ => None,
        };
        layers.push(Layer::Line {
            series: label.clone(),
            color: color.clone(),
            style: LineStyle::Solid,
            points,
        });
        layers.extend(annotation);
        legend.push(LegendEntry {
            label: label.clone(),
            color,
        });
    }

    let title = if options.pretty_labels {
        format!("Emission intensity: {}", to_title(&sector))
    } else {
        format!("Emission intensity: {sector}")
    };

    Ok(ChartSpec {
        title,
        x_label: "Year".to_string(),
        y_label: "Emission intensity".to_string(),
        y_domain: None,
        facet: None,
        layers,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(metric: &str, year: i32, value: f64) -> ObservationRow {
        ObservationRow {
            sector: Some("Cement".to_string()),
            year: Some(year),
            emission_factor_metric: Some(metric.to_string()),
            emission_factor_value: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_line_per_metric() {
        let rows = vec![
            observation("projected", 2025, 0.7),
            observation("projected", 2030, 0.6),
            observation("target_demo", 2025, 0.7),
            observation("target_demo", 2030, 0.4),
        ];
        let spec = plot_emission_intensity(
            &rows,
            &ReferenceData::default(),
            &PlotOptions::default(),
        )
        .unwrap();

        let lines: Vec<&Layer> = spec
            .layers
            .iter()
            .filter(|layer| matches!(layer, Layer::Line { .. }))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(spec.legend.len(), 2);
        assert_ne!(spec.legend[0].color, spec.legend[1].color);
        assert_eq!(spec.title, "Emission intensity: cement");
    }

    #[test]
    fn test_points_sorted_by_year() {
        let rows = vec![
            observation("projected", 2030, 0.6),
            observation("projected", 2025, 0.7),
        ];
        let spec = plot_emission_intensity(
            &rows,
            &ReferenceData::default(),
            &PlotOptions::default(),
        )
        .unwrap();
        match &spec.layers[0] {
            Layer::Line { points, .. } => {
                let years: Vec<i32> = points.iter().map(|p| p.year).collect();
                assert_eq!(years, vec![2025, 2030]);
            }
            other => panic!("expected a line layer, got {:?}", other),
        }
    }

    #[test]
    fn test_label_column_feeds_legend() {
        let mut rows = vec![
            observation("projected", 2025, 0.7),
            observation("projected", 2030, 0.6),
        ];
        for row in &mut rows {
            row.label = Some("This portfolio".to_string());
        }
        let spec = plot_emission_intensity(
            &rows,
            &ReferenceData::default(),
            &PlotOptions::default(),
        )
        .unwrap();
        assert_eq!(spec.legend[0].label, "This portfolio");
    }

    #[test]
    fn test_rolling_window_limits_years() {
        let rows = vec![
            observation("projected", 2025, 0.7),
            observation("projected", 2029, 0.6),
            observation("projected", 2040, 0.3),
        ];
        let spec = plot_emission_intensity(
            &rows,
            &ReferenceData::default(),
            &PlotOptions {
                five_year_window: true,
                ..Default::default()
            },
        )
        .unwrap();
        match &spec.layers[0] {
            Layer::Line { points, .. } => {
                assert_eq!(points.len(), 2);
                assert!(points.iter().all(|p| p.year <= 2030));
            }
            other => panic!("expected a line layer, got {:?}", other),
        }
    }
}

//! Choropleth construction and interactive document export
//!
//! One trace per advisory level keeps the legend categorical; the color
//! scale is fixed (green/yellow/orange/red, ascending severity) and legend
//! entries come from the level-code lookup so both "4" and "4.0" style
//! codes resolve to descriptive labels.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::advisory::{AdvisoryLevel, ClassifiedAdvisory, legend_entry_for_code};
use crate::visualization::figure::{ChoroplethTrace, Figure, Geo, Layout, Legend, Projection, Title};

pub const MAP_TITLE: &str = "Irish Department of Foreign Affairs Travel Advisory Levels";

/// plotly.js runtime loaded by the interactive document.
const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Build the choropleth figure for the assembled dataset.
pub fn build_figure(records: &[ClassifiedAdvisory]) -> Figure {
    let mut data = Vec::new();

    for level in AdvisoryLevel::ALL {
        let rows: Vec<&ClassifiedAdvisory> = records
            .iter()
            .filter(|record| record.advisory_level == level)
            .collect();
        if rows.is_empty() {
            debug!("No countries at level {}, skipping trace", level.code());
            continue;
        }

        let name = legend_entry_for_code(&level.code().to_string())
            .unwrap_or_else(|| level.code().to_string());

        data.push(ChoroplethTrace {
            trace_type: "choropleth".to_string(),
            name,
            locations: rows
                .iter()
                .map(|record| record.country_standardized.clone())
                .collect(),
            locationmode: "country names".to_string(),
            z: vec![level.code(); rows.len()],
            colorscale: vec![
                (0.0, level.color().to_string()),
                (1.0, level.color().to_string()),
            ],
            showscale: false,
            hovertext: rows
                .iter()
                .map(|record| format!("{}<br>{}", record.country, record.advisory_label))
                .collect(),
            hoverinfo: "text".to_string(),
            showlegend: true,
        });
    }

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: MAP_TITLE.to_string(),
            },
            geo: Geo {
                showframe: false,
                showcoastlines: true,
                projection: Projection {
                    projection_type: "equirectangular".to_string(),
                },
            },
            height: 600,
            legend: Legend {
                title: Title {
                    text: "Advisory Level".to_string(),
                },
                orientation: "v".to_string(),
                yanchor: "middle".to_string(),
                y: 0.5,
                xanchor: "left".to_string(),
                x: 1.02,
            },
        },
    }
}

/// Render the interactive document for the figure.
pub fn to_html_document(figure: &Figure) -> Result<String> {
    let figure_json =
        serde_json::to_string(figure).context("Failed to serialize map figure")?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{MAP_TITLE}</title>
<script src="{PLOTLY_JS_URL}" charset="utf-8"></script>
</head>
<body>
<div id="advisory-map"></div>
<script>
const figure = {figure_json};
Plotly.newPlot("advisory-map", figure.data, figure.layout);
</script>
</body>
</html>
"#
    ))
}

/// Write the interactive document to disk.
pub fn write_html(figure: &Figure, path: &Path) -> Result<()> {
    let document = to_html_document(figure)?;
    std::fs::write(path, document)
        .with_context(|| format!("Failed to write interactive map to {}", path.display()))?;
    info!("Interactive map saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, standardized: &str, level: AdvisoryLevel) -> ClassifiedAdvisory {
        ClassifiedAdvisory {
            country: country.to_string(),
            url: format!("https://www.ireland.ie/en/dfa/overseas-travel/advice/{country}/"),
            advisory_level: level,
            country_standardized: standardized.to_string(),
            advisory_label: level.label().to_string(),
        }
    }

    fn sample_dataset() -> Vec<ClassifiedAdvisory> {
        vec![
            record("France", "France", AdvisoryLevel::NormalPrecautions),
            record("Spain", "Spain", AdvisoryLevel::NormalPrecautions),
            record("Egypt", "Egypt", AdvisoryLevel::HighDegreeOfCaution),
            record("Lebanon", "Lebanon", AdvisoryLevel::AvoidUnnecessaryTravel),
            record("Ukraine", "Ukraine", AdvisoryLevel::DoNotTravel),
        ]
    }

    #[test]
    fn four_levels_render_four_traces_with_fixed_colors() {
        let figure = build_figure(&sample_dataset());

        assert_eq!(figure.data.len(), 4);
        let colors: Vec<&str> = figure
            .data
            .iter()
            .map(|trace| trace.colorscale[0].1.as_str())
            .collect();
        assert_eq!(colors, ["green", "yellow", "orange", "red"]);

        let names: Vec<&str> = figure.data.iter().map(|trace| trace.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Level 1: Normal Precautions",
                "Level 2: High Degree of Caution",
                "Level 3: Avoid Unnecessary Travel",
                "Level 4: Do Not Travel",
            ]
        );
    }

    #[test]
    fn traces_carry_standardized_locations_and_hover_text() {
        let records = vec![record("Uae", "United Arab Emirates", AdvisoryLevel::HighDegreeOfCaution)];
        let figure = build_figure(&records);

        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.data[0].locations, ["United Arab Emirates"]);
        assert_eq!(figure.data[0].hovertext, ["Uae<br>High Degree of Caution"]);
        assert_eq!(figure.data[0].z, [2]);
    }

    #[test]
    fn empty_levels_are_skipped() {
        let records = vec![record("France", "France", AdvisoryLevel::NormalPrecautions)];
        let figure = build_figure(&records);
        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.data[0].name, "Level 1: Normal Precautions");
    }

    #[test]
    fn layout_matches_the_fixed_map_configuration() {
        let figure = build_figure(&sample_dataset());

        assert_eq!(figure.layout.height, 600);
        assert!(!figure.layout.geo.showframe);
        assert!(figure.layout.geo.showcoastlines);
        assert_eq!(figure.layout.geo.projection.projection_type, "equirectangular");
        assert_eq!(figure.layout.legend.orientation, "v");
        assert_eq!(figure.layout.legend.title.text, "Advisory Level");
    }

    #[test]
    fn document_embeds_the_figure_and_runtime() {
        let figure = build_figure(&sample_dataset());
        let document = to_html_document(&figure).unwrap();

        assert!(document.contains(PLOTLY_JS_URL));
        assert!(document.contains("Plotly.newPlot"));
        assert!(document.contains("\"country names\""));
        assert!(document.contains(MAP_TITLE));
    }
}

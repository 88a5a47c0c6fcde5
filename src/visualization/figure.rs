//! Serializable figure model for the choropleth map
//!
//! A minimal typed mirror of the plotly.js figure schema: enough of the
//! choropleth trace and geo layout to express the advisory map. The
//! document writer embeds the serialized figure next to the plotly.js
//! runtime, so field names here must match the plotly.js schema exactly.

use serde::{Deserialize, Serialize};

/// Complete figure: one choropleth trace per advisory level plus layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: Layout,
}

/// One categorical choropleth trace covering a single advisory level.
///
/// Discrete coloring uses a constant two-stop colorscale per trace; the
/// legend then lists one entry per level instead of a continuous colorbar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    /// Canonical country names; resolved by the "country names" location mode.
    pub locations: Vec<String>,
    pub locationmode: String,
    /// Level code per location (constant within a trace).
    pub z: Vec<u8>,
    pub colorscale: Vec<(f64, String)>,
    pub showscale: bool,
    pub hovertext: Vec<String>,
    pub hoverinfo: String,
    pub showlegend: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub geo: Geo,
    pub height: u32,
    pub legend: Legend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geo {
    pub showframe: bool,
    pub showcoastlines: bool,
    pub projection: Projection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub projection_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_serializes_to_the_plotly_schema() {
        let trace = ChoroplethTrace {
            trace_type: "choropleth".to_string(),
            name: "Level 4: Do Not Travel".to_string(),
            locations: vec!["Ukraine".to_string()],
            locationmode: "country names".to_string(),
            z: vec![4],
            colorscale: vec![(0.0, "red".to_string()), (1.0, "red".to_string())],
            showscale: false,
            hovertext: vec!["Ukraine<br>Do Not Travel".to_string()],
            hoverinfo: "text".to_string(),
            showlegend: true,
        };

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "choropleth");
        assert_eq!(json["locationmode"], "country names");
        assert_eq!(json["colorscale"][0][1], "red");
        assert_eq!(json["z"][0], 4);
    }

    #[test]
    fn projection_type_uses_the_schema_key() {
        let projection = Projection {
            projection_type: "equirectangular".to_string(),
        };
        let json = serde_json::to_value(&projection).unwrap();
        assert_eq!(json["type"], "equirectangular");
    }
}

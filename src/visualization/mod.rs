//! Map visualization: figure model, choropleth builder, exporters

pub mod figure;
pub mod map_renderer;
pub mod static_export;

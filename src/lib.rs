//! Travel advisory collection and world-map rendering for the Irish DFA
//! travel advice site
//!
//! The pipeline scrapes per-country advisory levels from the advice index
//! page plus one page per country, standardizes country names for map
//! rendering, persists the dataset as CSV, and renders a color-coded
//! choropleth world map as an interactive document with an optional static
//! raster export.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod visualization;

//! Map stage entry point: render the advisory dataset as a world map

use anyhow::Result;
use tracing::{error, info, warn};

use dfa_advisory_map::infrastructure::config::ConfigManager;
use dfa_advisory_map::infrastructure::csv_store;
use dfa_advisory_map::infrastructure::error::DatasetError;
use dfa_advisory_map::infrastructure::logging::init_logging;
use dfa_advisory_map::visualization::{map_renderer, static_export};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging("info")?;
    let config = ConfigManager::new()?.load_config().await?;

    let records = match csv_store::read_dataset(&config.output.csv_path) {
        Ok(records) => records,
        Err(DatasetError::Missing { path }) => {
            error!("Advisory dataset not found at {}", path);
            error!("Run scrape-advisories first to collect the data");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    info!("Loaded data for {} countries", records.len());

    let figure = map_renderer::build_figure(&records);

    // High-resolution raster first; the backend is optional and its absence
    // must not block the interactive document.
    if let Err(err) = static_export::write_png(
        &figure,
        &config.output.png_path,
        config.output.png_width,
        config.output.png_height,
        config.output.png_scale,
    )
    .await
    {
        warn!("Could not save static map image: {}", err);
    }

    map_renderer::write_html(&figure, &config.output.html_path)?;
    info!(
        "Open {} in a browser to explore the interactive map",
        config.output.html_path.display()
    );

    Ok(())
}

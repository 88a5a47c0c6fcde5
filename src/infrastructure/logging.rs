//! Logging setup
//!
//! Console tracing with an env-filter override (`RUST_LOG`) and quieter
//! defaults for the HTTP and HTML dependency stack. Timestamps are UTC.

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// UTC timestamp formatter for log lines.
struct UtcTimeFormatter;

impl FormatTime for UtcTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize console logging. `RUST_LOG` overrides the default filter.
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(default_level);

        // Keep dependency noise below our own level unless TRACE is
        // explicitly requested.
        if !default_level.eq_ignore_ascii_case("trace") {
            filter = filter
                .add_directive("reqwest=warn".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("h2=warn".parse().unwrap())
                .add_directive("html5ever=warn".parse().unwrap())
                .add_directive("selectors=warn".parse().unwrap());
        }

        filter
    });

    let console_layer = fmt::Layer::new()
        .with_writer(std::io::stdout)
        .with_timer(UtcTimeFormatter)
        .with_target(false);

    Registry::default().with(env_filter).with(console_layer).init();
    Ok(())
}

//! EON Next Dashboard - Headless Runner
//!
//! Renders the dashboard once against a fixture and prints every panel.
//!
//! Usage: `eon-dash [FIXTURE]`. Without an argument the `fixture` path from
//! the config file is used.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use eon_dash::app::headless::HeadlessHost;
use eon_dash::components::charts::headless::HeadlessCharts;
use eon_dash::domain::config::{DashboardConfig, LogConfig};
use eon_dash::features::dashboard::DashboardPage;
use eon_dash::helpers::get_or_create_data_dir;
use eon_dash::services::{Fixture, FixtureTransport, SharedTransport, block_on_local};
use eon_dash::utils::config_store::{load_config, resolve_locale};

fn init_logging(log: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let stderr = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr);

    if !log.to_file {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return Ok(None);
    }

    let dir = get_or_create_data_dir().context("Failed to locate the log directory")?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "eon-dash.log"));
    let file = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .with_writer(writer);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .init();
    Ok(Some(guard))
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    };
    let _log_guard = init_logging(&config.log)?;
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Failed to load config, using defaults");
    }

    tracing::info!("Starting eon-dash v{}", env!("CARGO_PKG_VERSION"));

    let Some(fixture_path) = std::env::args_os().nth(1).map(PathBuf::from).or(config.fixture.clone()) else {
        bail!("No fixture given: pass a path or set `fixture` in the config file");
    };
    let fixture = Fixture::load(&fixture_path)
        .with_context(|| format!("Failed to load fixture {}", fixture_path.display()))?;

    let locale = resolve_locale(&config);
    tracing::info!(?locale, dark_mode = config.dark_mode, "Rendering dashboard");

    let transport = FixtureTransport::new(fixture).with_latency(Duration::from_millis(config.latency_ms));
    let lines = block_on_local(async move {
        let session: SharedTransport = Rc::new(transport);
        let host = Rc::new(
            HeadlessHost::new(Some(session))
                .with_locale(locale)
                .with_dark_mode(config.dark_mode),
        );

        let mut page = DashboardPage::new(host.clone(), HeadlessCharts::new(), config.currency_symbol);
        page.attach();
        let lines = page.run_until_settled(&host).await;
        page.detach();
        lines
    })?;

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

mod app;
mod commands;
mod config;
mod effects;
mod ui;

use aires_logging::{aires_info, aires_warn};
use anyhow::Context;
use clap::Parser;

use config::{Cli, Settings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let settings = Settings::resolve(cli, loaded.file);

    aires_logging::initialize(settings.log, settings.level);
    for warning in &loaded.warnings {
        aires_warn!("{warning}");
    }
    aires_info!(
        "starting: api={} download_dir={} request_timeout={:?}",
        settings.api.base_url,
        settings.download_dir.display(),
        settings.api.request_timeout
    );

    app::run(settings)
}

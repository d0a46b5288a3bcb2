mod embed_project;
mod progress;
mod sanitize;
mod utils;

use {
    tracing::{info, warn},
    lyrics_map_core::config::Config,
    crate::{
        embed_project::run_embed_project_step,
        sanitize::run_sanitize_step,
        utils::init_logging,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logging depends on the config, so a load failure is reported once logging is up
    let (config, config_error) = match Config::try_load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(config.logging().level());

    if let Some(err) = config_error {
        warn!("failed to read config, using defaults: {}", err);
    }

    info!("lyrics map preprocessing");

    if config.steps.embed_project.enabled {
        run_embed_project_step(&config).await?;
    }

    if config.steps.sanitize.enabled {
        run_sanitize_step(&config).await?;
    }

    Ok(())
}

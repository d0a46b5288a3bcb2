use {
    tracing::info,
    anyhow::{Context, Result},
    lyrics_map_core::{config::Config, sanitize::sanitize_file},
};

pub async fn run_sanitize_step(config: &Config) -> Result<()> {
    let output_path = config.data().output_path();
    info!("sanitizing {}", output_path);

    let path = output_path.clone();
    let replacements = tokio::task::spawn_blocking(move || sanitize_file(&path))
        .await
        .context("sanitize worker panicked")??;

    info!("replaced {} NaN values with null in {}", replacements, output_path);
    Ok(())
}

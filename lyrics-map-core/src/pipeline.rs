use {
    tracing::info,
    anyhow::Result,
    crate::{
        config::Config,
        dataset::Dataset,
        embedding::{embed_in_batches, TextEmbedder},
        models::LyricsPoint,
        output::assemble_points,
        projection::{embeddings_matrix, Projector, TsneParams},
        sampling::sample_rows,
    },
};

#[derive(Clone, Copy, Debug)]
pub struct PipelineParams {
    pub sample_size: usize,
    pub seed: u64,
    pub batch_size: usize,
    pub excerpt_chars: usize,
}

impl PipelineParams {
    pub fn from_config(config: &Config) -> Self {
        let data = config.data();

        Self {
            sample_size: data.sample_size(),
            seed: data.seed(),
            batch_size: config.model().batch_size(),
            excerpt_chars: data.excerpt_chars(),
        }
    }
}

impl TsneParams {
    pub fn from_config(config: &Config) -> Self {
        let projection = config.projection();

        Self {
            perplexity: projection.perplexity(),
            max_iter: projection.max_iter(),
            seed: projection.seed(),
        }
    }
}

/// Sample, embed, project and assemble. No I/O; `on_batch` only reports progress.
pub fn build_points(
    dataset: Dataset,
    params: &PipelineParams,
    embedder: &dyn TextEmbedder,
    projector: &dyn Projector,
    on_batch: impl FnMut(usize),
) -> Result<Vec<LyricsPoint>> {
    let tempo_fallback = dataset.tempo_fallback();
    let sample = sample_rows(dataset.rows, params.sample_size, params.seed)?;
    info!("sampled {} rows (seed {})", sample.len(), params.seed);

    let texts: Vec<&str> = sample.iter().map(|row| row.lyrics()).collect();
    let embeddings = embed_in_batches(embedder, &texts, params.batch_size, on_batch)?;
    info!(
        "embedded {} texts ({} dimensions)",
        embeddings.len(),
        embeddings.first().map(|v| v.len()).unwrap_or(0),
    );

    let coordinates = projector.project(embeddings_matrix(&embeddings)?)?;

    assemble_points(sample, &coordinates, params.excerpt_chars, tempo_fallback)
}

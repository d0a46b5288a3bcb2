use {
    tracing::info,
    indicatif::ProgressBar,
    anyhow::{Context, Result},
    lyrics_map_core::{
        config::{Config, EmbeddingBackend},
        dataset::load_dataset,
        embedding::{HashingEmbedder, SentenceEmbedder, TextEmbedder},
        output::write_points,
        pipeline::{build_points, PipelineParams},
        projection::{TsneParams, TsneProjector},
    },
    crate::progress::Progress,
};

const HASHING_EMBEDDING_DIM: usize = 384;

pub async fn run_embed_project_step(config: &Config) -> Result<()> {
    info!("running embed & project step");

    let data = config.data();
    let input_path = data.input_path();
    let output_path = data.output_path();
    let backend = config.model().backend()?;
    let params = PipelineParams::from_config(config);
    let tsne_params = TsneParams::from_config(config);

    let points = tokio::task::spawn_blocking(move || {
        let dataset = load_dataset(&input_path)?;
        let embedder = create_embedder(backend, params.seed)?;
        let projector = TsneProjector::new(tsne_params);

        let pb = ProgressBar::new(params.sample_size as u64);
        let mut progress = Progress::new("embedding lyrics".to_owned());

        let points = build_points(dataset, &params, embedder.as_ref(), &projector, |done| {
            pb.inc(done as u64);
            progress.update(done as u64);
        })?;

        pb.finish();
        info!("embedded {} lyrics", progress.total_processed());
        Ok::<_, anyhow::Error>(points)
    })
    .await
    .context("embed & project worker panicked")??;

    let output = output_path.clone();
    tokio::task::spawn_blocking(move || write_points(&output, &points))
        .await
        .context("output writer panicked")??;

    info!("done embedding and projecting, output: {}", output_path);
    Ok(())
}

fn create_embedder(backend: EmbeddingBackend, seed: u64) -> Result<Box<dyn TextEmbedder>> {
    Ok(match backend {
        EmbeddingBackend::SentenceTransformer(model_type) => Box::new(SentenceEmbedder::remote(model_type)?),
        EmbeddingBackend::Hashing => {
            info!("using hashing embedder ({} dimensions)", HASHING_EMBEDDING_DIM);
            Box::new(HashingEmbedder::new(HASHING_EMBEDDING_DIM, seed))
        }
    })
}

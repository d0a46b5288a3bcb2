use {
    tracing::info,
    rand::{Rng, SeedableRng},
    rand_xoshiro::SplitMix64,
    anyhow::{anyhow, Result},
    rust_bert::pipelines::sentence_embeddings::{
        SentenceEmbeddingsBuilder,
        SentenceEmbeddingsModel,
        SentenceEmbeddingsModelType,
    },
};

/// Turns a batch of texts into one vector per text, in input order.
pub trait TextEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

pub struct SentenceEmbedder {
    model: SentenceEmbeddingsModel,
}

impl SentenceEmbedder {
    /// Downloads (or reuses the cached copy of) the pretrained model.
    pub fn remote(model_type: SentenceEmbeddingsModelType) -> Result<Self> {
        info!("loading sentence embeddings model: {:?}", model_type);
        let model = SentenceEmbeddingsBuilder::remote(model_type).create_model()?;
        Ok(Self { model })
    }
}

impl TextEmbedder for SentenceEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts)?)
    }
}

/// Deterministic stand-in for a real model: each text seeds its own RNG, so a
/// vector depends only on the text, the base seed and the dimension.
pub struct HashingEmbedder {
    dim: usize,
    base_seed: u64,
}

impl HashingEmbedder {
    pub fn new(dim: usize, base_seed: u64) -> Self {
        Self { dim, base_seed }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut rng = SplitMix64::seed_from_u64(self.base_seed ^ fnv1a64(text.as_bytes()));
        let mut v: Vec<f32> = (0..self.dim).map(|_| rng.gen::<f32>() - 0.5).collect();

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

impl TextEmbedder for HashingEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Embeds `texts` `batch_size` at a time. `on_batch` receives the number of
/// texts finished in each batch.
pub fn embed_in_batches(
    embedder: &dyn TextEmbedder,
    texts: &[&str],
    batch_size: usize,
    mut on_batch: impl FnMut(usize),
) -> Result<Vec<Vec<f32>>> {
    let mut embeddings = Vec::with_capacity(texts.len());
    let mut dim = None;

    for batch in texts.chunks(batch_size.max(1)) {
        let vectors = embedder.embed_batch(batch)?;
        if vectors.len() != batch.len() {
            return Err(anyhow!("embedder returned {} vectors for {} texts", vectors.len(), batch.len()));
        }

        for vector in vectors {
            let expected = *dim.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(anyhow!("embedding dimension changed from {} to {}", expected, vector.len()));
            }
            embeddings.push(vector);
        }

        on_batch(batch.len());
    }

    Ok(embeddings)
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

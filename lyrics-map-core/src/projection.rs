use {
    tracing::info,
    ndarray::Array2,
    linfa::traits::Transformer,
    linfa_tsne::TSneParams,
    rand::SeedableRng,
    rand_xoshiro::Xoshiro256Plus,
    anyhow::{anyhow, bail, Result},
    crate::models::Coordinate,
};

/// Barnes-Hut draws its vantage-point tree from an unseeded rng, so only the
/// exact gradient is reproducible for a fixed seed.
const EXACT_GRADIENT: f64 = 0.0;

/// Maps an `n x dim` embedding matrix to `n` coordinates, row order preserved.
pub trait Projector {
    fn project(&self, embeddings: Array2<f64>) -> Result<Vec<Coordinate>>;
}

#[derive(Clone, Copy, Debug)]
pub struct TsneParams {
    pub perplexity: f64,
    pub max_iter: usize,
    pub seed: u64,
}

pub struct TsneProjector {
    params: TsneParams,
}

impl TsneProjector {
    pub fn new(params: TsneParams) -> Self {
        Self { params }
    }

    /// Smallest number of rows the solver accepts for this perplexity.
    pub fn min_rows(&self) -> usize {
        (3.0 * self.params.perplexity).ceil() as usize + 1
    }
}

impl Projector for TsneProjector {
    fn project(&self, embeddings: Array2<f64>) -> Result<Vec<Coordinate>> {
        let rows = embeddings.nrows();
        if rows == 0 {
            return Ok(Vec::new());
        }
        if rows < self.min_rows() {
            bail!(
                "t-sne with perplexity {} needs at least {} rows, got {}",
                self.params.perplexity,
                self.min_rows(),
                rows,
            );
        }
        if all_rows_equal(&embeddings) {
            bail!("t-sne needs at least two distinct embeddings, all {} rows are identical", rows);
        }

        info!(
            "running t-sne on {}x{} matrix (perplexity {}, {} iterations)",
            rows,
            embeddings.ncols(),
            self.params.perplexity,
            self.params.max_iter,
        );

        let rng = Xoshiro256Plus::seed_from_u64(self.params.seed);
        let projected = TSneParams::embedding_size_with_rng(2, rng)
            .perplexity(self.params.perplexity)
            .max_iter(self.params.max_iter)
            .approx_threshold(EXACT_GRADIENT)
            .transform(embeddings)?;

        Ok(projected
            .rows()
            .into_iter()
            .map(|row| Coordinate { x: row[0], y: row[1] })
            .collect())
    }
}

fn all_rows_equal(matrix: &Array2<f64>) -> bool {
    let first = matrix.row(0);
    matrix.rows().into_iter().all(|row| row == first)
}

/// Stacks equal-length vectors into an `f64` matrix, one row per vector.
pub fn embeddings_matrix(embeddings: &[Vec<f32>]) -> Result<Array2<f64>> {
    let dim = embeddings.first().map(|v| v.len()).unwrap_or(0);
    if let Some(bad) = embeddings.iter().find(|v| v.len() != dim) {
        return Err(anyhow!("embedding of length {} in a matrix of width {}", bad.len(), dim));
    }

    let flat: Vec<f64> = embeddings.iter().flat_map(|v| v.iter().map(|x| *x as f64)).collect();
    Ok(Array2::from_shape_vec((embeddings.len(), dim), flat)?)
}

use {
    rand::{SeedableRng, seq::index},
    rand_xoshiro::Xoshiro256PlusPlus,
    anyhow::{bail, Result},
};

/// Draws `sample_size` rows without replacement. The result is in draw order,
/// which depends only on `seed` and the number of input rows.
pub fn sample_rows<T>(rows: Vec<T>, sample_size: usize, seed: u64) -> Result<Vec<T>> {
    if rows.len() < sample_size {
        bail!("cannot sample {} rows from a dataset of {} rows", sample_size, rows.len());
    }

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let picked = index::sample(&mut rng, rows.len(), sample_size);

    let mut slots: Vec<Option<T>> = rows.into_iter().map(Some).collect();
    Ok(picked.into_iter().filter_map(|i| slots[i].take()).collect())
}

use {
    std::{fs::{self, File}, io::{BufWriter, Write}, path::Path},
    tracing::info,
    anyhow::{bail, Context, Result},
    crate::models::{Coordinate, LyricsPoint, SourceRow},
};

/// Pairs each row with the coordinate at the same position.
pub fn assemble_points(
    rows: Vec<SourceRow>,
    coordinates: &[Coordinate],
    excerpt_chars: usize,
    tempo_fallback: Option<f64>,
) -> Result<Vec<LyricsPoint>> {
    if rows.len() != coordinates.len() {
        bail!("{} rows but {} coordinates", rows.len(), coordinates.len());
    }

    Ok(rows
        .into_iter()
        .zip(coordinates)
        .map(|(row, coordinate)| row.point(*coordinate, excerpt_chars, tempo_fallback))
        .collect())
}

/// Pretty-printed JSON (2-space indent), non-ASCII kept as-is.
pub fn points_to_json(points: &[LyricsPoint]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(points)?)
}

pub fn write_points(path: impl AsRef<Path>, points: &[LyricsPoint]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, points)?;
    writer.flush()?;

    info!("wrote {} points to {}", points.len(), path.display());
    Ok(())
}

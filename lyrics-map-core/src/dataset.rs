use {
    std::{fs::File, io::Read, path::Path},
    tracing::info,
    anyhow::{anyhow, Context, Result},
    crate::models::SourceRow,
};

const LYRICS_COLUMN: &str = "text";
const TEMPO_COLUMN: &str = "Tempo";

/// Rows with lyrics present, in file order.
#[derive(Debug, Default)]
pub struct Dataset {
    pub rows: Vec<SourceRow>,
    pub total_rows: usize,
    pub has_tempo_column: bool,
}

impl Dataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers().context("failed to read csv headers")?.clone();

        if !headers.iter().any(|h| h == LYRICS_COLUMN) {
            return Err(anyhow!("csv has no \"{}\" column", LYRICS_COLUMN));
        }
        let has_tempo_column = headers.iter().any(|h| h == TEMPO_COLUMN);

        let mut rows = Vec::new();
        let mut total_rows = 0;

        for (index, record) in reader.deserialize::<SourceRow>().enumerate() {
            let row = record.with_context(|| format!("failed to parse csv record {}", index + 1))?;
            total_rows += 1;

            if row.has_lyrics() {
                rows.push(row);
            }
        }

        Ok(Self {
            rows,
            total_rows,
            has_tempo_column,
        })
    }

    pub fn dropped_rows(&self) -> usize {
        self.total_rows - self.rows.len()
    }

    /// Tempo to use for rows without one: zero when the column is missing entirely.
    pub fn tempo_fallback(&self) -> Option<f64> {
        if self.has_tempo_column {
            None
        } else {
            Some(0.0)
        }
    }
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    info!("loading dataset: {}", path.display());

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let dataset = Dataset::from_reader(file)?;

    info!(
        "loaded {} rows, dropped {} without lyrics",
        dataset.rows.len(),
        dataset.dropped_rows(),
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Artist(s),song,text,Length,emotion,Genre,Album,Release Date,Key,Tempo\n";

    #[test]
    fn renames_columns_and_drops_rows_without_lyrics() {
        let csv = format!(
            "{}{}{}{}",
            HEADER,
            "ABBA,Waterloo,\"My my, at Waterloo\",02:46,joy,pop,Waterloo,1974-03-04,D Maj,147\n",
            "Nobody,Silence,,01:00,sadness,ambient,Quiet,2000-01-01,C min,60\n",
            "Queen,Bohemian Rhapsody,Is this the real life,05:55,fear,rock,A Night at the Opera,1975-10-31,Bb Maj,\n",
        );

        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.total_rows, 3);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.dropped_rows(), 1);
        assert!(dataset.has_tempo_column);

        let abba = &dataset.rows[0];
        assert_eq!(abba.artist.as_deref(), Some("ABBA"));
        assert_eq!(abba.title.as_deref(), Some("Waterloo"));
        assert_eq!(abba.lyrics.as_deref(), Some("My my, at Waterloo"));
        assert_eq!(abba.release_date.as_deref(), Some("1974-03-04"));
        assert_eq!(abba.tempo, Some(147.0));

        let queen = &dataset.rows[1];
        assert_eq!(queen.title.as_deref(), Some("Bohemian Rhapsody"));
        assert_eq!(queen.tempo, None);
        assert!(dataset.rows.iter().all(|row| row.title.as_deref() != Some("Silence")));
    }

    #[test]
    fn na_markers_in_text_count_as_missing_lyrics() {
        let csv = format!(
            "{}{}{}{}{}",
            HEADER,
            "A,First,NaN,03:00,joy,pop,C,2001,E min,100\n",
            "A,Second,N/A,03:00,joy,pop,C,2001,E min,100\n",
            "A,Third,null,03:00,joy,pop,C,2001,E min,100\n",
            "A,Fourth,Nanana hey,03:00,joy,pop,C,2001,E min,100\n",
        );
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.dropped_rows(), 3);
        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(dataset.rows[0].title.as_deref(), Some("Fourth"));
    }

    #[test]
    fn unparsable_tempo_is_treated_as_missing() {
        let csv = format!("{}{}", HEADER, "A,B,words,03:00,joy,pop,C,2001,E min,fast\n");
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.rows[0].tempo, None);
    }

    #[test]
    fn missing_optional_columns_default() {
        let csv = "song,text\nOnly Title,some words\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.rows.len(), 1);
        assert!(!dataset.has_tempo_column);
        assert_eq!(dataset.tempo_fallback(), Some(0.0));
        assert_eq!(dataset.rows[0].artist, None);
        assert_eq!(dataset.rows[0].title.as_deref(), Some("Only Title"));
    }

    #[test]
    fn missing_lyrics_column_is_an_error() {
        let csv = "song,Tempo\nSomething,120\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn ragged_row_is_an_error() {
        let csv = format!("{}{}", HEADER, "only,three,fields\n");
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn load_dataset_reports_missing_file() {
        let err = load_dataset("definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}

use serde::{Serialize, Deserialize};

/// One row of the lyrics dataset, with the CSV's original column names mapped
/// onto snake_case fields.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SourceRow {
    #[serde(rename = "Artist(s)", default)]
    pub artist: Option<String>,
    #[serde(rename = "song", default)]
    pub title: Option<String>,
    #[serde(rename = "text", default)]
    pub lyrics: Option<String>,
    #[serde(rename = "Length", default)]
    pub length: Option<String>,
    #[serde(rename = "emotion", default)]
    pub emotion: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Album", default)]
    pub album: Option<String>,
    #[serde(rename = "Release Date", default)]
    pub release_date: Option<String>,
    #[serde(rename = "Key", default)]
    pub key: Option<String>,
    #[serde(rename = "Tempo", default, deserialize_with = "csv::invalid_option")]
    pub tempo: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// A sampled song placed on the 2-D map. Field order is the key order of the
/// written JSON.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LyricsPoint {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub release_date: String,
    pub key: String,
    pub tempo: Option<f64>,
    pub length: String,
    pub x: f64,
    pub y: f64,
    pub genre: String,
    pub emotion: String,
    pub lyrics_excerpt: String,
}

/// Cell values pandas' `read_csv` reads as missing by default.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl SourceRow {
    pub fn has_lyrics(&self) -> bool {
        self.lyrics.as_deref()
            .map(|v| !v.is_empty() && !MISSING_MARKERS.contains(&v))
            .unwrap_or(false)
    }

    pub fn lyrics(&self) -> &str {
        self.lyrics.as_deref().unwrap_or("")
    }

    /// `tempo_fallback` is used only when the dataset had no tempo column at all;
    /// a blank cell in an existing column stays `None`.
    pub fn point(self, coordinate: Coordinate, excerpt_chars: usize, tempo_fallback: Option<f64>) -> LyricsPoint {
        let lyrics_excerpt = excerpt(self.lyrics(), excerpt_chars).to_owned();

        LyricsPoint {
            artist: self.artist.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            album: self.album.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            key: self.key.unwrap_or_default(),
            tempo: self.tempo.or(tempo_fallback),
            length: self.length.unwrap_or_default(),
            x: coordinate.x,
            y: coordinate.y,
            genre: self.genre.unwrap_or_default(),
            emotion: self.emotion.unwrap_or_default(),
            lyrics_excerpt,
        }
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

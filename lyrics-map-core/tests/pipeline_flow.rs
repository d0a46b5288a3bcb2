use {
    std::fs,
    serde_json::Value,
    lyrics_map_core::{
        dataset::load_dataset,
        embedding::HashingEmbedder,
        output::write_points,
        pipeline::{build_points, PipelineParams},
        projection::{TsneParams, TsneProjector},
        sanitize::sanitize_file,
    },
};

const HEADER: &str = "Artist(s),song,text,Length,emotion,Genre,Album,Release Date,Key,Tempo\n";

fn write_dataset(path: &std::path::Path, songs: usize) {
    let mut csv = HEADER.to_owned();
    for i in 0..songs {
        let tempo = if i % 5 == 0 { String::new() } else { format!("{}", 90 + i) };
        csv.push_str(&format!(
            "Artist {i},Song {i},\"{lyrics}\",03:{sec:02},joy,pop,Album {i},2020-01-01,A Maj,{tempo}\n",
            lyrics = format!("verse {} goes like this, ", i).repeat(i % 7 + 1),
            sec = i % 60,
        ));
    }
    csv.push_str("Ghost,Empty Song,,02:00,sadness,ambient,Nothing,2021-01-01,C min,70\n");
    fs::write(path, csv).unwrap();
}

fn params(sample_size: usize) -> PipelineParams {
    PipelineParams {
        sample_size,
        seed: 42,
        batch_size: 64,
        excerpt_chars: 200,
    }
}

fn projector() -> TsneProjector {
    TsneProjector::new(TsneParams {
        perplexity: 5.0,
        max_iter: 300,
        seed: 42,
    })
}

#[test]
fn csv_to_sanitized_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("spotify_dataset.csv");
    let output = dir.path().join("data").join("tsne_data.json");
    write_dataset(&input, 60);

    let dataset = load_dataset(&input).unwrap();
    assert_eq!(dataset.total_rows, 61);
    assert_eq!(dataset.rows.len(), 60);

    let points = build_points(dataset, &params(60), &HashingEmbedder::new(32, 42), &projector(), |_| {}).unwrap();
    write_points(&output, &points).unwrap();

    assert_eq!(sanitize_file(&output).unwrap(), 0);

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("NaN"));

    let records: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(records.len(), 60);
    assert!(records.iter().all(|r| r["title"] != "Empty Song"));
    assert!(records.iter().all(|r| r["x"].is_f64() && r["y"].is_f64()));
    assert!(records.iter().all(|r| r["lyrics_excerpt"].as_str().unwrap().chars().count() <= 200));

    let song_zero = records.iter().find(|r| r["title"] == "Song 0").unwrap();
    assert!(song_zero["tempo"].is_null());
    let song_one = records.iter().find(|r| r["title"] == "Song 1").unwrap();
    assert_eq!(song_one["tempo"].as_f64(), Some(91.0));

    let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 12);
}

#[test]
fn sampling_keeps_only_requested_rows_and_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("spotify_dataset.csv");
    write_dataset(&input, 80);

    let embedder = HashingEmbedder::new(32, 42);
    let first = build_points(load_dataset(&input).unwrap(), &params(40), &embedder, &projector(), |_| {}).unwrap();
    let second = build_points(load_dataset(&input).unwrap(), &params(40), &embedder, &projector(), |_| {}).unwrap();

    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string_pretty(&first).unwrap(),
        serde_json::to_string_pretty(&second).unwrap(),
    );
}

#[test]
fn too_small_dataset_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("spotify_dataset.csv");
    write_dataset(&input, 10);

    let result = build_points(load_dataset(&input).unwrap(), &params(20_000), &HashingEmbedder::new(8, 0), &projector(), |_| {});
    assert!(result.is_err());
}

#[test]
fn nan_output_from_older_runs_is_patched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tsne_data.json");
    fs::write(&path, "[\n  {\n    \"title\": \"Song\",\n    \"tempo\": NaN,\n    \"x\": 1.0\n  }\n]").unwrap();

    assert_eq!(sanitize_file(&path).unwrap(), 1);

    let records: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(records[0]["tempo"].is_null());
    assert_eq!(sanitize_file(&path).unwrap(), 0);
}

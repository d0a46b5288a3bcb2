use {
    std::fs::read_to_string,
    serde::Deserialize,
    anyhow::{anyhow, Context, Result},
    rust_bert::pipelines::sentence_embeddings::SentenceEmbeddingsModelType,
};

pub const DEFAULT_INPUT_PATH: &str = "src/data/spotify_dataset.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "src/data/tsne_data.json";
pub const DEFAULT_SAMPLE_SIZE: usize = 20_000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_EXCERPT_CHARS: usize = 200;
pub const DEFAULT_BATCH_SIZE: usize = 64;
pub const DEFAULT_PERPLEXITY: f64 = 30.0;
pub const DEFAULT_MAX_ITER: usize = 1000;

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub steps: StepsConfig,
    data: Option<DataConfig>,
    model: Option<ModelConfig>,
    projection: Option<ProjectionConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Deserialize, Debug)]
pub struct StepsConfig {
    #[serde(default)]
    pub embed_project: EmbedProjectStepConfig,
    #[serde(default)]
    pub sanitize: SanitizeStepConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmbedProjectStepConfig {
    pub enabled: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SanitizeStepConfig {
    pub enabled: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DataConfig {
    input_path: Option<String>,
    output_path: Option<String>,
    sample_size: Option<usize>,
    seed: Option<u64>,
    excerpt_chars: Option<usize>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ModelConfig {
    name: Option<String>,
    batch_size: Option<usize>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ProjectionConfig {
    perplexity: Option<f64>,
    max_iter: Option<usize>,
    seed: Option<u64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoggingConfig {
    level: Option<String>,
}

/// Which embedding backend the embed & project step should build.
#[derive(Clone, Debug)]
pub enum EmbeddingBackend {
    SentenceTransformer(SentenceEmbeddingsModelType),
    Hashing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            steps: StepsConfig::default(),
            data: None,
            model: None,
            projection: None,
            logging: None,
        }
    }
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            embed_project: EmbedProjectStepConfig::default(),
            sanitize: SanitizeStepConfig::default(),
        }
    }
}

impl Default for EmbedProjectStepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
        }
    }
}

impl Default for SanitizeStepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            sample_size: None,
            seed: None,
            excerpt_chars: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: None,
            batch_size: None,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            perplexity: None,
            max_iter: None,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
        }
    }
}

impl Config {
    pub fn try_load() -> Result<Self> {
        let source = read_to_string("./config.toml")
            .or_else(|_| read_to_string("/config/config.toml"))
            .context("no readable ./config.toml or /config/config.toml")?;
        Self::from_toml_str(&source)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn data(&self) -> DataConfig {
        self.data.as_ref().cloned().unwrap_or_default()
    }

    pub fn model(&self) -> ModelConfig {
        self.model.as_ref().cloned().unwrap_or_default()
    }

    pub fn projection(&self) -> ProjectionConfig {
        self.projection.as_ref().cloned().unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.as_ref().cloned().unwrap_or_default()
    }
}

impl DataConfig {
    pub fn input_path(&self) -> String {
        self.input_path.as_ref().cloned().unwrap_or(DEFAULT_INPUT_PATH.to_owned())
    }

    pub fn output_path(&self) -> String {
        self.output_path.as_ref().cloned().unwrap_or(DEFAULT_OUTPUT_PATH.to_owned())
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars.unwrap_or(DEFAULT_EXCERPT_CHARS)
    }
}

impl ModelConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("all-mini-lm-l12-v2")
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1)
    }

    pub fn backend(&self) -> Result<EmbeddingBackend> {
        let model_type = match self.name() {
            "hashing" => return Ok(EmbeddingBackend::Hashing),
            "all-mini-lm-l12-v2" => SentenceEmbeddingsModelType::AllMiniLmL12V2,
            "all-mini-lm-l6-v2" => SentenceEmbeddingsModelType::AllMiniLmL6V2,
            "all-distilroberta-v1" => SentenceEmbeddingsModelType::AllDistilrobertaV1,
            "bert-base-nli-mean-tokens" => SentenceEmbeddingsModelType::BertBaseNliMeanTokens,
            "distiluse-base-multilingual-cased" => SentenceEmbeddingsModelType::DistiluseBaseMultilingualCased,
            "paraphrase-albert-small-v2" => SentenceEmbeddingsModelType::ParaphraseAlbertSmallV2,
            other => return Err(anyhow!("unknown embedding model: {}", other)),
        };

        Ok(EmbeddingBackend::SentenceTransformer(model_type))
    }
}

impl ProjectionConfig {
    pub fn perplexity(&self) -> f64 {
        self.perplexity.unwrap_or(DEFAULT_PERPLEXITY)
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter.unwrap_or(DEFAULT_MAX_ITER)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }
}

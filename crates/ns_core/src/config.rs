//! Application configuration.
//!
//! Values come from an optional TOML file; CLI flags and environment
//! variables override file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub scorer: ScorerConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    NewsApi,
    Memory,
}

/// `[news]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default)]
    pub kind: SourceKind,

    #[serde(default = "default_news_base_url")]
    pub base_url: String,

    /// Never written back out; usually supplied through `NEWS_API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub sort_by: Option<String>,

    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            base_url: default_news_base_url(),
            api_key: None,
            max_articles: default_max_articles(),
            language: None,
            sort_by: None,
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    #[default]
    Lexicon,
    Remote,
}

/// `[scorer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub kind: ScorerKind,

    /// Endpoint for the remote scorer.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            kind: ScorerKind::default(),
            url: None,
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechEngine {
    #[default]
    Google,
    Silent,
}

/// `[speech]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub engine: SpeechEngine,

    #[serde(default = "default_speech_base_url")]
    pub base_url: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,

    /// Newest clips kept in `output_dir`; older ones are removed after each
    /// write. `0` keeps everything.
    #[serde(default = "default_keep_files")]
    pub keep_files: usize,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: SpeechEngine::default(),
            base_url: default_speech_base_url(),
            language: default_language(),
            output_dir: default_output_dir(),
            timeout_secs: default_http_timeout_secs(),
            keep_files: default_keep_files(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[pipeline]` section: upper bounds on each external stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_stage_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_stage_timeout_secs")]
    pub classify_timeout_secs: u64,

    #[serde(default = "default_synthesize_timeout_secs")]
    pub synthesize_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_stage_timeout_secs(),
            classify_timeout_secs: default_stage_timeout_secs(),
            synthesize_timeout_secs: default_synthesize_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn classify_timeout(&self) -> Duration {
        Duration::from_secs(self.classify_timeout_secs)
    }

    pub fn synthesize_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesize_timeout_secs)
    }
}

fn default_news_base_url() -> String {
    "https://newsapi.org".into()
}
fn default_max_articles() -> usize {
    10
}
fn default_http_timeout_secs() -> u64 {
    10
}
fn default_speech_base_url() -> String {
    "https://translate.google.com".into()
}
fn default_language() -> String {
    "hi".into()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("audio")
}
fn default_keep_files() -> usize {
    50
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_stage_timeout_secs() -> u64 {
    30
}
fn default_synthesize_timeout_secs() -> u64 {
    60
}

impl AppConfig {
    /// Load from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| Error::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.news.max_articles == 0 {
            return Err(Error::Config("news.max_articles must be at least 1".to_string()));
        }
        parse_base_url("news.base_url", &self.news.base_url)?;
        parse_base_url("speech.base_url", &self.speech.base_url)?;
        if let Some(url) = &self.scorer.url {
            parse_base_url("scorer.url", url)?;
        }
        if self.speech.language.trim().is_empty() {
            return Err(Error::Config("speech.language must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_base_url(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("{} is not a valid URL: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.news.kind, SourceKind::NewsApi);
        assert_eq!(config.news.max_articles, 10);
        assert_eq!(config.scorer.kind, ScorerKind::Lexicon);
        assert_eq!(config.speech.language, "hi");
        assert_eq!(config.speech.keep_files, 50);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [news]
            kind = "memory"
            max_articles = 5

            [speech]
            language = "en"
            "#,
        )
        .unwrap();

        assert_eq!(config.news.kind, SourceKind::Memory);
        assert_eq!(config.news.max_articles, 5);
        assert_eq!(config.news.base_url, "https://newsapi.org");
        assert_eq!(config.speech.language, "en");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_rejects_zero_articles() {
        let err = AppConfig::from_toml("[news]\nmax_articles = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = AppConfig::from_toml("[news]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let mut config = AppConfig::default();
        config.news.api_key = Some("secret".to_string());
        let raw = toml::to_string(&config).unwrap();
        assert!(!raw.contains("secret"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
    }
}

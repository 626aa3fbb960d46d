pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{PolarityScorer, SpeechSynthesizer};
pub use sources::ArticleSource;
pub use types::{
    Article, AudioArtifact, ProcessedArticle, Query, Report, SentimentCounts, SentimentLabel,
};

pub mod prelude {
    pub use crate::{
        Article, ArticleSource, AudioArtifact, Error, PolarityScorer, ProcessedArticle, Query,
        Report, Result, SentimentCounts, SentimentLabel, SpeechSynthesizer,
    };
}

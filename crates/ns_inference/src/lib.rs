pub mod classifier;
pub mod models;

pub use classifier::{label_for, SentimentClassifier, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use models::create_scorer;

pub mod prelude {
    pub use super::classifier::{label_for, SentimentClassifier};
    pub use super::models::{create_scorer, FixedScorer, LexiconScorer, RemoteScorer};
    pub use ns_core::{Error, PolarityScorer, Result, SentimentLabel};
}

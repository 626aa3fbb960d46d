use std::fmt;

use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait PolarityScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Score a piece of text in [-1.0, 1.0]
    async fn polarity(&self, text: &str) -> Result<f64>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Synthesize speech for `text` in `language`, returning encoded audio
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

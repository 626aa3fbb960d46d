use std::sync::Arc;

use ns_core::config::{ScorerConfig, ScorerKind};
use ns_core::{Error, PolarityScorer, Result};
use tracing::info;

pub mod dummy;
pub mod lexicon;
pub mod remote;

pub use dummy::FixedScorer;
pub use lexicon::LexiconScorer;
pub use remote::RemoteScorer;

pub async fn create_scorer(config: &ScorerConfig) -> Result<Arc<dyn PolarityScorer>> {
    let scorer: Arc<dyn PolarityScorer> = match config.kind {
        ScorerKind::Lexicon => Arc::new(LexiconScorer::new()),
        ScorerKind::Remote => {
            let url = config.url.as_deref().ok_or_else(|| {
                Error::Config("the remote scorer needs a url (--scorer-url)".to_string())
            })?;
            Arc::new(RemoteScorer::new(url, config.timeout_secs)?)
        }
    };
    info!("🧠 Sentiment scorer initialized (using {})", scorer.name());
    Ok(scorer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_default_scorer() {
        let scorer = create_scorer(&ScorerConfig::default()).await.unwrap();
        assert_eq!(scorer.name(), "lexicon");
    }

    #[tokio::test]
    async fn test_remote_scorer_requires_url() {
        let config = ScorerConfig {
            kind: ScorerKind::Remote,
            ..ScorerConfig::default()
        };
        assert!(matches!(create_scorer(&config).await, Err(Error::Config(_))));
    }
}

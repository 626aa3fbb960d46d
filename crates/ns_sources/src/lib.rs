use std::sync::Arc;

use ns_core::config::{NewsConfig, SourceKind};
use ns_core::{ArticleSource, Result};

pub mod memory;
pub mod newsapi;

pub use memory::InMemorySource;
pub use newsapi::NewsApiSource;

/// Build the article source selected in the configuration.
pub fn create_source(config: &NewsConfig) -> Result<Arc<dyn ArticleSource>> {
    let source: Arc<dyn ArticleSource> = match config.kind {
        SourceKind::NewsApi => Arc::new(NewsApiSource::new(config)?),
        SourceKind::Memory => Arc::new(InMemorySource::sample().with_limit(config.max_articles)),
    };
    tracing::info!("🗞️ Article source initialized (using {})", source.name());
    Ok(source)
}

pub mod prelude {
    pub use super::{create_source, InMemorySource, NewsApiSource};
    pub use ns_core::{Article, ArticleSource, Error, Result};
}

use std::sync::Arc;

use ns_core::config::{SpeechConfig, SpeechEngine};
use ns_core::{Result, SpeechSynthesizer};

pub mod google;
pub mod silent;
pub mod speaker;
pub mod summary;

pub use google::GoogleTranslateTts;
pub use silent::SilentSynthesizer;
pub use speaker::SummarySpeaker;
pub use summary::summary_text;

pub fn create_synthesizer(config: &SpeechConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    let synthesizer: Arc<dyn SpeechSynthesizer> = match config.engine {
        SpeechEngine::Google => Arc::new(GoogleTranslateTts::new(&config.base_url, config.timeout_secs)?),
        SpeechEngine::Silent => Arc::new(SilentSynthesizer),
    };
    tracing::info!("🗣️ Speech synthesizer initialized (using {})", synthesizer.name());
    Ok(synthesizer)
}

/// Build the speaker for the configured engine, language and output directory.
pub fn create_speaker(config: &SpeechConfig) -> Result<SummarySpeaker> {
    let synthesizer = create_synthesizer(config)?;
    Ok(SummarySpeaker::new(
        synthesizer,
        config.output_dir.clone(),
        config.language.clone(),
    )
    .with_retention(config.keep_files))
}

pub mod prelude {
    pub use super::{create_speaker, create_synthesizer, summary_text, SummarySpeaker};
    pub use ns_core::{AudioArtifact, Error, Result, SpeechSynthesizer};
}

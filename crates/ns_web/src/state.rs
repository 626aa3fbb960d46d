use std::path::PathBuf;
use std::sync::Arc;

use ns_pipeline::Pipeline;

const DEFAULT_AUDIO_DIR: &str = "audio";

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub audio_dir: PathBuf,
}

impl AppState {
    /// Audio is served from wherever the pipeline's speaker writes it.
    pub fn new(pipeline: Pipeline) -> Self {
        let audio_dir = pipeline
            .speaker()
            .map(|speaker| speaker.output_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIO_DIR));
        Self {
            pipeline: Arc::new(pipeline),
            audio_dir,
        }
    }
}

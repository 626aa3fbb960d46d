use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info, warn};
use uuid::Uuid;

use ns_core::{AudioArtifact, Error, Result, SentimentCounts, SpeechSynthesizer};

use crate::summary::summary_text;

/// Renders the spoken summary and stores each clip under a fresh name.
#[derive(Clone)]
pub struct SummarySpeaker {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output_dir: PathBuf,
    language: String,
    keep_files: usize,
}

impl fmt::Debug for SummarySpeaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarySpeaker")
            .field("synthesizer", &self.synthesizer.name())
            .field("output_dir", &self.output_dir)
            .field("language", &self.language)
            .field("keep_files", &self.keep_files)
            .finish()
    }
}

impl SummarySpeaker {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, output_dir: PathBuf, language: String) -> Self {
        Self {
            synthesizer,
            output_dir,
            language,
            keep_files: 0,
        }
    }

    /// Keep only the newest `keep_files` clips after each write; `0` disables
    /// the sweep.
    pub fn with_retention(mut self, keep_files: usize) -> Self {
        self.keep_files = keep_files;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn speak(&self, company: &str, counts: &SentimentCounts, total: usize) -> Result<AudioArtifact> {
        let text = summary_text(&self.language, company, counts, total);
        info!("🔊 Synthesizing summary for {} ({})", company, self.language);

        let audio = self
            .synthesizer
            .synthesize(&text, &self.language)
            .await
            .map_err(|e| match e {
                Error::Synthesis(_) | Error::UpstreamTimeout { .. } => e,
                other => Error::Synthesis(other.to_string()),
            })?;
        if audio.is_empty() {
            return Err(Error::Synthesis(format!(
                "{} returned no audio",
                self.synthesizer.name()
            )));
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let id = Uuid::new_v4();
        let path = self.output_dir.join(format!("summary-{}.mp3", id));
        tokio::fs::write(&path, &audio).await?;
        info!("✨ Audio written to {}", path.display());

        if self.keep_files > 0 {
            if let Err(e) = self.sweep(&path).await {
                warn!("Could not prune old audio in {}: {}", self.output_dir.display(), e);
            }
        }

        Ok(AudioArtifact {
            id,
            path,
            language: self.language.clone(),
        })
    }
}

impl SummarySpeaker {
    /// Removes the oldest `summary-*.mp3` clips beyond the retention limit,
    /// never touching `latest`.
    async fn sweep(&self, latest: &Path) -> Result<()> {
        let mut clips: Vec<(SystemTime, PathBuf)> = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.output_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == latest || !is_clip(&path) {
                continue;
            }
            let modified = entry.metadata().await?.modified()?;
            clips.push((modified, path));
        }

        let keep_others = self.keep_files - 1;
        if clips.len() <= keep_others {
            return Ok(());
        }
        clips.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, path) in clips.into_iter().skip(keep_others) {
            debug!("Removing old clip {}", path.display());
            tokio::fs::remove_file(&path).await?;
        }
        Ok(())
    }
}

fn is_clip(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with("summary-") && name.ends_with(".mp3"))
}

use async_trait::async_trait;
use ns_core::{Result, SpeechSynthesizer};

/// Bare ID3v2 header, enough for players to accept an empty clip.
const SILENT_CLIP: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00";

/// Offline synthesizer that produces an empty clip for any input.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    fn name(&self) -> &str {
        "silent"
    }

    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
        Ok(SILENT_CLIP.to_vec())
    }
}

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use ns_core::{Error, Result, SpeechSynthesizer};

/// The translate endpoint rejects longer inputs.
const MAX_CHUNK_CHARS: usize = 100;

/// Speech synthesis through Google Translate's TTS endpoint.
pub struct GoogleTranslateTts {
    client: Client,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("Mozilla/5.0")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_tts", self.base_url)
    }

    async fn fetch_chunk(&self, chunk: &str, language: &str, idx: usize, total: usize) -> Result<Vec<u8>> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "TTS endpoint returned an error");
            return Err(Error::Synthesis(format!("TTS endpoint returned status {}", status)));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

impl fmt::Debug for GoogleTranslateTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslateTts")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::UpstreamTimeout { stage: "synthesize" }
    } else {
        Error::Synthesis(format!("TTS request failed: {}", err))
    }
}

/// Punctuation a chunk may end on; `।` is the Devanagari full stop.
const BREAK_AFTER: &[char] = &['।', '.', ',', '!', '?', ';', ':'];

fn joined_len(words: &[&str]) -> usize {
    let chars: usize = words.iter().map(|w| w.chars().count()).sum();
    chars + words.len().saturating_sub(1)
}

/// Split text into pieces of at most `max_chars` characters. A full piece is
/// cut after its last punctuated word when it has one, otherwise on
/// whitespace.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(current.join(" "));
                current.clear();
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        while !current.is_empty() && joined_len(&current) + 1 + word_len > max_chars {
            let cut = current
                .iter()
                .rposition(|w| w.ends_with(BREAK_AFTER))
                .map_or(current.len(), |i| i + 1);
            let rest = current.split_off(cut);
            chunks.push(current.join(" "));
            current = rest;
        }
        current.push(word);
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    fn name(&self) -> &str {
        "google-translate"
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::Synthesis("nothing to synthesize".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!(idx, total = chunks.len(), "Requesting TTS chunk");
            audio.extend(self.fetch_chunk(chunk, language, idx, chunks.len()).await?);
        }
        Ok(audio)
    }
}

//! Best-effort pronunciation: recorded clip first, speech synthesis second,
//! silence last. Never reports an error to the caller.

use thiserror::Error;

use crate::api::config::SpeechConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("no playable recording at {0}")]
    ClipUnavailable(String),

    #[error("speech synthesis unavailable: {0}")]
    SynthesisUnavailable(String),
}

/// Platform audio facilities.
#[allow(async_fn_in_trait)]
pub trait SpeechBackend {
    /// Load and start playing a recording. Resolves once playback started.
    async fn play_clip(&self, path: &str) -> Result<(), SpeechError>;

    /// Speak `text` with the platform voice, interrupting any utterance.
    fn synthesize(&self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError>;
}

/// How a word ended up being pronounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spoken {
    Clip,
    Synthesized,
    Silent,
}

pub struct Pronouncer<B> {
    backend: B,
    config: SpeechConfig,
}

impl<B: SpeechBackend> Pronouncer<B> {
    pub fn new(backend: B, config: &SpeechConfig) -> Self {
        Self {
            backend,
            config: config.clone(),
        }
    }

    /// `<audio_dir>/<word in lower case>.mp3`
    pub fn clip_path(&self, word: &str) -> String {
        format!(
            "{}/{}.mp3",
            self.config.audio_dir.trim_end_matches('/'),
            word.trim().to_lowercase()
        )
    }

    pub async fn speak(&self, word: &str) -> Spoken {
        let word = word.trim();
        if word.is_empty() {
            return Spoken::Silent;
        }

        let path = self.clip_path(word);
        match self.backend.play_clip(&path).await {
            Ok(()) => return Spoken::Clip,
            Err(e) => log::debug!("speech: {e}; falling back to synthesis"),
        }

        match self.backend.synthesize(word, &self.config) {
            Ok(()) => Spoken::Synthesized,
            Err(e) => {
                log::debug!("speech: {e}; staying silent");
                Spoken::Silent
            }
        }
    }
}

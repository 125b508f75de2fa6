use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, SpeechSynthesisUtterance};

use vocab_deck::{SpeechBackend, SpeechConfig, SpeechError};

/// Audio element playback plus the Web Speech API.
pub struct BrowserSpeech;

impl SpeechBackend for BrowserSpeech {
    async fn play_clip(&self, path: &str) -> Result<(), SpeechError> {
        let fail = |e: JsValue| SpeechError::ClipUnavailable(format!("{path}: {e:?}"));
        let audio = HtmlAudioElement::new_with_src(path).map_err(fail)?;
        // play() rejects when the source cannot be loaded or decoded.
        let started = audio.play().map_err(fail)?;
        JsFuture::from(started).await.map_err(fail)?;
        Ok(())
    }

    fn synthesize(&self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError> {
        let fail = |e: JsValue| SpeechError::SynthesisUnavailable(format!("{e:?}"));
        let synth = web_sys::window()
            .ok_or_else(|| SpeechError::SynthesisUnavailable("no window".to_string()))?
            .speech_synthesis()
            .map_err(fail)?;

        let utterance = SpeechSynthesisUtterance::new_with_text(text).map_err(fail)?;
        utterance.set_lang(&config.lang);
        utterance.set_rate(config.rate);
        utterance.set_pitch(config.pitch);

        synth.cancel();
        synth.speak(&utterance);
        Ok(())
    }
}

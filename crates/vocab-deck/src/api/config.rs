use serde::Deserialize;

/// Configuration for the trainer. Every field has a default, so the JS shell
/// may override any subset with a partial JSON document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub gesture: GestureConfig,
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    /// Path of the catalog document, relative to the page.
    pub catalog_path: String,
    /// Level opened when the page has no `level` query parameter.
    pub default_level: String,
    /// Seconds between a grade and the next card (acknowledgment animation).
    pub advance_delay: f32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            storage: StorageConfig::default(),
            speech: SpeechConfig::default(),
            catalog_path: "data/levels.json".to_string(),
            default_level: "1".to_string(),
            advance_delay: 0.36,
        }
    }
}

impl TrainerConfig {
    /// Parse a (possibly partial) configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Pointer thresholds, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Below this on both axes a release counts as a tap.
    pub tap_threshold: f32,
    /// Beyond this on an axis a release counts as a swipe.
    pub swipe_threshold: f32,
    /// Card tilt in degrees per pixel of horizontal drag.
    pub tilt_per_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_threshold: 30.0,
            swipe_threshold: 50.0,
            tilt_per_px: 0.03,
        }
    }
}

/// Key names used in the browser's local storage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix for per-level summaries and per-word grades.
    pub prefix: String,
    /// Key of the selected theme.
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefix: "vocab-lv-".to_string(),
            theme_key: "vocab-theme".to_string(),
        }
    }
}

/// Pronunciation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Directory holding `<word>.mp3` recordings.
    pub audio_dir: String,
    /// BCP 47 language tag for speech synthesis.
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            audio_dir: "assets/audio".to_string(),
            lang: "en-US".to_string(),
            rate: 0.95,
            pitch: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = TrainerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrainerConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "gesture": { "swipe_threshold": 80 },
            "advance_delay": 0.4
        }"#;
        let config = TrainerConfig::from_json(json).unwrap();
        assert_eq!(config.gesture.swipe_threshold, 80.0);
        assert_eq!(config.gesture.tap_threshold, 30.0);
        assert_eq!(config.advance_delay, 0.4);
        assert_eq!(config.storage.prefix, "vocab-lv-");
        assert_eq!(config.speech.lang, "en-US");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(TrainerConfig::from_json("{ gesture: ").is_err());
    }
}

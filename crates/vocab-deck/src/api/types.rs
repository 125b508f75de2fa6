use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mastery grade of one word within one level.
/// Only the latest grade is kept; grading again overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordStatus {
    #[default]
    Unknown,
    Partial,
    Known,
}

impl WordStatus {
    pub const ALL: [WordStatus; 3] = [WordStatus::Unknown, WordStatus::Partial, WordStatus::Known];

    /// Value written to the key-value store.
    pub fn as_str(self) -> &'static str {
        match self {
            WordStatus::Unknown => "unknown",
            WordStatus::Partial => "partial",
            WordStatus::Known => "known",
        }
    }

    /// CSS class of the acknowledgment overlay shown while a grade animates.
    pub fn feedback_class(self) -> &'static str {
        match self {
            WordStatus::Unknown => "bad",
            WordStatus::Partial => "partial",
            WordStatus::Known => "good",
        }
    }

    /// Numeric code used in the event buffer.
    pub fn code(self) -> f32 {
        match self {
            WordStatus::Unknown => 0.0,
            WordStatus::Partial => 1.0,
            WordStatus::Known => 2.0,
        }
    }
}

impl fmt::Display for WordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised word status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for WordStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unknown" => Ok(WordStatus::Unknown),
            "partial" => Ok(WordStatus::Partial),
            "known" => Ok(WordStatus::Known),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Grammatical category shown as a coloured chip on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    #[default]
    Other,
}

impl PartOfSpeech {
    /// Lenient mapping from the catalog's free-form `pos` field.
    /// Matches whole words, so "phrasal verb" is a verb but "adverb" is not.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let words: Vec<&str> = tag
            .split(|c: char| !c.is_ascii_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();
        if words.contains(&"noun") {
            PartOfSpeech::Noun
        } else if words.iter().any(|w| w.starts_with("adj")) {
            PartOfSpeech::Adjective
        } else if words.contains(&"verb") {
            PartOfSpeech::Verb
        } else {
            PartOfSpeech::Other
        }
    }

    /// Short label for the chip. Empty for `Other`.
    pub fn label(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Other => "",
        }
    }

    /// Chip CSS class. Unclassified words share the verb styling.
    pub fn css_class(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "pos-noun",
            PartOfSpeech::Adjective => "pos-adj",
            PartOfSpeech::Verb | PartOfSpeech::Other => "pos-verb",
        }
    }
}

impl Serialize for PartOfSpeech {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PartOfSpeech {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(PartOfSpeech::from_tag).unwrap_or_default())
    }
}

/// Event kinds written into `TrainerEvent::kind` (Rust → JS).
pub mod event_kind {
    /// Card face toggled. `a` = 1.0 when the back is showing, `b` = word index.
    pub const FLIPPED: f32 = 1.0;
    /// A word was graded. `a` = status code, `b` = word index.
    pub const GRADED: f32 = 2.0;
    /// A new card is showing. `a` = word index.
    pub const ADVANCED: f32 = 3.0;
    /// The level is finished. `a/b/c` = known/partial/unknown.
    pub const COMPLETED: f32 = 4.0;
    /// Progress was cleared and the session restarted.
    pub const RESET: f32 = 5.0;
}

/// An event communicated from the controller to the JS shell.
/// Fixed layout: `kind` plus three payload floats, read by JS as a `Float32Array`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TrainerEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl TrainerEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Flatten a batch of events for a `Float32Array` hand-off.
    pub fn pack(events: &[TrainerEvent]) -> Vec<f32> {
        bytemuck::cast_slice(events).to_vec()
    }
}

/// Request to pronounce a word, fulfilled asynchronously by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest(pub String);

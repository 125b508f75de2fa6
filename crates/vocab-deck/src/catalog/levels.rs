use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::types::PartOfSpeech;

/// One card of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, rename = "pos")]
    pub part_of_speech: PartOfSpeech,
}

impl WordEntry {
    pub fn new(word: &str, translation: &str, definition: &str, part_of_speech: PartOfSpeech) -> Self {
        Self {
            word: word.to_string(),
            translation: translation.to_string(),
            definition: definition.to_string(),
            part_of_speech,
        }
    }
}

/// A named, ordered list of words.
///
/// Words are unique within a level: progress is keyed by the word, so a
/// repeated entry would share (and double-count) one grade.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Level {
    pub id: String,
    pub words: Vec<WordEntry>,
}

impl Level {
    /// Build a level, keeping only the first entry of a repeated word.
    pub fn new(id: impl Into<String>, words: Vec<WordEntry>) -> Self {
        let id = id.into();
        let mut seen = HashSet::with_capacity(words.len());
        let mut unique = Vec::with_capacity(words.len());
        for entry in words {
            if seen.insert(entry.word.clone()) {
                unique.push(entry);
            } else {
                log::debug!("catalog: level {id}: dropping repeated word {}", entry.word);
            }
        }
        Self { id, words: unique }
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.words.iter()
    }
}

/// Level id → word list, in document order.
/// Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Parse a catalog from a JSON object of `{ "<level>": [word, ...] }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a level by id.
    pub fn level(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|l| l.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// Hand-written so level order follows the document instead of a sorted map.
impl<'de> Deserialize<'de> for LevelCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = LevelCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping level ids to word lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut levels: Vec<Level> = Vec::with_capacity(map.size_hint().unwrap_or(4));
                while let Some((id, words)) = map.next_entry::<String, Vec<WordEntry>>()? {
                    // Duplicate ids: the later list wins.
                    levels.retain(|l| l.id != id);
                    levels.push(Level::new(id, words));
                }
                Ok(LevelCatalog { levels })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order_of_levels() {
        let json = r#"{
            "10": [{ "word": "gauge", "pos": "verb" }],
            "2": [],
            "1": [{ "word": "insight", "translation": "תובנה", "definition": "deep understanding", "pos": "noun" }]
        }"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["10", "2", "1"]);

        let insight = &catalog.level("1").unwrap().words[0];
        assert_eq!(insight.translation, "תובנה");
        assert_eq!(insight.part_of_speech, PartOfSpeech::Noun);
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{ "1": [{ "word": "notion" }, { "word": "gauge", "pos": null }] }"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        let level = catalog.level("1").unwrap();
        assert_eq!(level.len(), 2);
        assert_eq!(level.words[0].translation, "");
        assert_eq!(level.words[0].definition, "");
        assert_eq!(level.words[0].part_of_speech, PartOfSpeech::Other);
        assert_eq!(level.words[1].part_of_speech, PartOfSpeech::Other);
    }

    #[test]
    fn duplicate_level_ids_keep_the_last_list() {
        let json = r#"{ "1": [{ "word": "a" }], "1": [{ "word": "b" }] }"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.level("1").unwrap().words[0].word, "b");
    }

    #[test]
    fn repeated_words_keep_the_first_entry() {
        let json = r#"{ "1": [
            { "word": "gauge", "pos": "verb" },
            { "word": "notion" },
            { "word": "gauge", "pos": "noun" }
        ] }"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        let level = catalog.level("1").unwrap();
        assert_eq!(level.len(), 2);
        assert_eq!(level.words[0].part_of_speech, PartOfSpeech::Verb);
        assert_eq!(level.words[1].word, "notion");
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(LevelCatalog::from_json("[1, 2, 3]").is_err());
        assert!(LevelCatalog::from_json(r#"{ "1": [{ "translation": "x" }] }"#).is_err());
    }

    #[test]
    fn unknown_level_is_none() {
        let catalog = LevelCatalog::default();
        assert!(catalog.level("7").is_none());
        assert!(catalog.is_empty());
    }
}

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::api::config::StorageConfig;
use crate::api::types::WordStatus;
use crate::catalog::levels::Level;
use crate::progress::kv::{KeyValueStore, StoreError};

/// Per-level counts. `known + partial + unknown` only counts graded words
/// and never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelStats {
    pub known: usize,
    pub partial: usize,
    pub unknown: usize,
    pub total: usize,
}

impl LevelStats {
    pub fn empty(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn count(&self, status: WordStatus) -> usize {
        match status {
            WordStatus::Known => self.known,
            WordStatus::Partial => self.partial,
            WordStatus::Unknown => self.unknown,
        }
    }

    fn slot(&mut self, status: WordStatus) -> &mut usize {
        match status {
            WordStatus::Known => &mut self.known,
            WordStatus::Partial => &mut self.partial,
            WordStatus::Unknown => &mut self.unknown,
        }
    }

    /// Count a grade, replacing the word's previous grade if it had one.
    pub fn regrade(&mut self, previous: Option<WordStatus>, status: WordStatus) {
        if let Some(prev) = previous {
            let slot = self.slot(prev);
            *slot = slot.saturating_sub(1);
        }
        if self.graded() < self.total {
            *self.slot(status) += 1;
        }
    }

    pub fn graded(&self) -> usize {
        self.known + self.partial + self.unknown
    }

    pub fn is_complete(&self) -> bool {
        self.graded() >= self.total
    }

    /// Share of graded words, 0–100.
    pub fn graded_percent(&self) -> u32 {
        percent(self.graded(), self.total)
    }

    /// Share of known words, 0–100.
    pub fn known_percent(&self) -> u32 {
        percent(self.known, self.total)
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (part as f64 / total as f64 * 100.0).round() as u32
    }
}

fn escape(part: &str) -> Cow<'_, str> {
    if part.contains(['%', '/']) {
        Cow::Owned(part.replace('%', "%25").replace('/', "%2F"))
    } else {
        Cow::Borrowed(part)
    }
}

/// Word grades and level summaries on top of a key-value store.
///
/// Key layout: `<prefix><level>` holds the summary record (JSON),
/// `<prefix><level>/<word>` holds one grade (`known`/`partial`/`unknown`).
/// Level ids and words are escaped (`%` and `/` percent-encoded), so the only
/// raw `/` after the prefix is the separator of a word key.
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            prefix: config.prefix.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn summary_key(&self, level: &str) -> String {
        format!("{}{}", self.prefix, escape(level))
    }

    fn word_key(&self, level: &str, word: &str) -> String {
        format!("{}{}/{}", self.prefix, escape(level), escape(word))
    }

    /// The stored grade, or None if the word was never graded.
    /// Unreadable values count as never graded.
    pub fn graded(&self, level: &str, word: &str) -> Option<WordStatus> {
        let key = self.word_key(level, word);
        let raw = self.store.get(&key)?;
        match raw.parse() {
            Ok(status) => Some(status),
            Err(e) => {
                log::debug!("progress: ignoring {key}: {e}");
                None
            }
        }
    }

    pub fn get_status(&self, level: &str, word: &str) -> WordStatus {
        self.graded(level, word).unwrap_or_default()
    }

    /// Overwrite the word's grade.
    pub fn set_status(&self, level: &str, word: &str, status: WordStatus) -> Result<(), StoreError> {
        self.store.set(&self.word_key(level, word), status.as_str())
    }

    /// Forget every grade in the level and its summary record.
    /// Keeps going past failures and reports the first one.
    pub fn reset_level(&self, level: &Level) -> Result<(), StoreError> {
        let mut first_err = None;
        let keys = level
            .iter()
            .map(|w| self.word_key(&level.id, &w.word))
            .chain(std::iter::once(self.summary_key(&level.id)));
        for key in keys {
            if let Err(e) = self.store.remove(&key) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Recount the level from the individual grades.
    pub fn aggregate(&self, level: &Level) -> LevelStats {
        let mut stats = LevelStats::empty(level.len());
        for entry in level.iter() {
            if let Some(status) = self.graded(&level.id, &entry.word) {
                stats.regrade(None, status);
            }
        }
        stats
    }

    pub fn save_summary(&self, level: &str, stats: &LevelStats) -> Result<(), StoreError> {
        let json = serde_json::to_string(stats)?;
        self.store.set(&self.summary_key(level), &json)
    }

    /// The last saved summary; zeroed when missing or unreadable.
    pub fn load_summary(&self, level: &str) -> LevelStats {
        let key = self.summary_key(level);
        self.store
            .get(&key)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(stats) => Some(stats),
                Err(e) => {
                    log::debug!("progress: ignoring {key}: {e}");
                    None
                }
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PartOfSpeech;
    use crate::catalog::levels::WordEntry;
    use crate::progress::kv::MemoryStore;

    fn level(words: &[&str]) -> Level {
        Level::new(
            "1",
            words
                .iter()
                .map(|w| WordEntry::new(w, "", "", PartOfSpeech::Verb))
                .collect(),
        )
    }

    fn progress() -> ProgressStore<MemoryStore> {
        ProgressStore::new(MemoryStore::new(), &StorageConfig::default())
    }

    #[test]
    fn absent_status_defaults_to_unknown() {
        let p = progress();
        assert_eq!(p.get_status("1", "gauge"), WordStatus::Unknown);
        assert_eq!(p.graded("1", "gauge"), None);
    }

    #[test]
    fn set_status_overwrites_and_is_idempotent() {
        let p = progress();
        p.set_status("1", "gauge", WordStatus::Partial).unwrap();
        p.set_status("1", "gauge", WordStatus::Partial).unwrap();
        assert_eq!(p.get_status("1", "gauge"), WordStatus::Partial);

        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        assert_eq!(p.get_status("1", "gauge"), WordStatus::Known);
        assert_eq!(p.store().get("vocab-lv-1/gauge").as_deref(), Some("known"));
        assert_eq!(p.store().len(), 1);
    }

    #[test]
    fn corrupt_status_reads_as_ungraded() {
        let p = progress();
        p.store().set("vocab-lv-1/gauge", "half").unwrap();
        assert_eq!(p.graded("1", "gauge"), None);
        assert_eq!(p.get_status("1", "gauge"), WordStatus::Unknown);
    }

    #[test]
    fn grades_are_scoped_per_level() {
        let p = progress();
        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        assert_eq!(p.graded("2", "gauge"), None);
    }

    #[test]
    fn aggregate_counts_only_graded_words() {
        let lvl = level(&["gauge", "notion", "insight", "refine"]);
        let p = progress();
        assert_eq!(p.aggregate(&lvl), LevelStats::empty(4));

        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        p.set_status("1", "notion", WordStatus::Unknown).unwrap();
        p.set_status("1", "insight", WordStatus::Partial).unwrap();
        // A grade for a word outside the level is not counted.
        p.set_status("1", "stray", WordStatus::Known).unwrap();

        let stats = p.aggregate(&lvl);
        assert_eq!(
            stats,
            LevelStats { known: 1, partial: 1, unknown: 1, total: 4 }
        );
        assert!(stats.graded() <= stats.total);
        assert!(!stats.is_complete());
    }

    #[test]
    fn reset_level_clears_grades_and_summary() {
        let lvl = level(&["gauge", "notion"]);
        let p = progress();
        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        p.set_status("1", "notion", WordStatus::Partial).unwrap();
        p.save_summary("1", &p.aggregate(&lvl)).unwrap();
        p.set_status("2", "gauge", WordStatus::Known).unwrap();

        p.reset_level(&lvl).unwrap();
        assert_eq!(p.aggregate(&lvl), LevelStats::empty(2));
        assert_eq!(p.load_summary("1"), LevelStats::default());
        assert_eq!(p.get_status("2", "gauge"), WordStatus::Known);
    }

    #[test]
    fn slash_in_level_id_does_not_collide_with_word_keys() {
        let p = progress();
        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        let stats = LevelStats { known: 0, partial: 0, unknown: 0, total: 4 };
        p.save_summary("1/gauge", &stats).unwrap();

        assert_eq!(p.get_status("1", "gauge"), WordStatus::Known);
        assert_eq!(p.load_summary("1/gauge"), stats);
        assert_eq!(
            p.store().get("vocab-lv-1%2Fgauge").as_deref(),
            Some(r#"{"known":0,"partial":0,"unknown":0,"total":4}"#)
        );

        p.set_status("a/b", "c", WordStatus::Partial).unwrap();
        p.set_status("a", "b/c", WordStatus::Unknown).unwrap();
        assert_eq!(p.get_status("a/b", "c"), WordStatus::Partial);
        assert_eq!(p.get_status("a", "b/c"), WordStatus::Unknown);
        assert_eq!(p.store().get("vocab-lv-a%2Fb/c").as_deref(), Some("partial"));
        assert_eq!(p.store().get("vocab-lv-a/b%2Fc").as_deref(), Some("unknown"));
    }

    #[test]
    fn repeated_word_is_counted_once() {
        let lvl = level(&["gauge", "notion", "gauge"]);
        let p = progress();
        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        assert_eq!(
            p.aggregate(&lvl),
            LevelStats { known: 1, partial: 0, unknown: 0, total: 2 }
        );
    }

    #[test]
    fn reset_level_reports_write_failure() {
        let lvl = level(&["gauge"]);
        let p = progress();
        p.set_status("1", "gauge", WordStatus::Known).unwrap();
        p.store().set_reject_writes(true);
        assert!(p.reset_level(&lvl).is_err());
    }

    #[test]
    fn summary_round_trips_and_tolerates_garbage() {
        let p = progress();
        let stats = LevelStats { known: 2, partial: 1, unknown: 0, total: 3 };
        p.save_summary("1", &stats).unwrap();
        assert_eq!(p.load_summary("1"), stats);
        assert_eq!(
            p.store().get("vocab-lv-1").as_deref(),
            Some(r#"{"known":2,"partial":1,"unknown":0,"total":3}"#)
        );

        p.store().set("vocab-lv-1", "not json").unwrap();
        assert_eq!(p.load_summary("1"), LevelStats::default());
        p.store().set("vocab-lv-1", r#"{"known":5}"#).unwrap();
        assert_eq!(p.load_summary("1").known, 5);
    }

    #[test]
    fn regrade_moves_a_word_between_buckets() {
        let mut stats = LevelStats::empty(2);
        stats.regrade(None, WordStatus::Unknown);
        stats.regrade(Some(WordStatus::Unknown), WordStatus::Known);
        assert_eq!(stats, LevelStats { known: 1, partial: 0, unknown: 0, total: 2 });

        stats.regrade(None, WordStatus::Partial);
        stats.regrade(None, WordStatus::Partial);
        assert_eq!(stats.graded(), 2, "never exceeds total");
    }

    #[test]
    fn percentages_round_and_handle_empty_levels() {
        let stats = LevelStats { known: 1, partial: 1, unknown: 0, total: 3 };
        assert_eq!(stats.known_percent(), 33);
        assert_eq!(stats.graded_percent(), 67);
        assert_eq!(LevelStats::default().known_percent(), 0);
    }
}

pub mod kv;
pub mod prefs;
pub mod store;

pub use kv::{KeyValueStore, MemoryStore, StoreError};
pub use prefs::{Theme, ThemePrefs};
pub use store::{LevelStats, ProgressStore};

pub mod api;
pub mod catalog;
pub mod input;
pub mod progress;
pub mod session;
pub mod speech;

// Re-export key types at crate root for convenience
pub use api::config::{GestureConfig, SpeechConfig, StorageConfig, TrainerConfig};
pub use api::types::{event_kind, PartOfSpeech, SpeechRequest, TrainerEvent, WordStatus};
pub use catalog::{default_catalog, CatalogError, CatalogSource, Level, LevelCatalog, WordEntry};
pub use input::gesture::{classify, Gesture, GestureTracker, SwipeDirection};
pub use input::queue::{custom_kind, key_code, InputEvent, InputQueue};
pub use progress::{KeyValueStore, LevelStats, MemoryStore, ProgressStore, StoreError, Theme, ThemePrefs};
pub use session::{
    level_cards, render, CardView, LevelCardView, Phase, PracticeView, SessionController,
    SessionState, SummaryView,
};
pub use speech::{Pronouncer, SpeechBackend, SpeechError, Spoken};

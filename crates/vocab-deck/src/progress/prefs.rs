use crate::api::config::StorageConfig;
use crate::progress::kv::{KeyValueStore, StoreError};

/// Page colour scheme, applied as a class on `<body>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Abstract,
    Dark,
    Light,
    Code,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Abstract, Theme::Dark, Theme::Light, Theme::Code];

    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Abstract => "theme-abstract",
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
            Theme::Code => "theme-code",
        }
    }

    pub fn from_css_class(class: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.css_class() == class)
    }
}

/// The persisted theme choice.
pub struct ThemePrefs<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ThemePrefs<S> {
    pub fn new(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            key: config.theme_key.clone(),
        }
    }

    /// Stored theme, or the default when absent or unrecognised.
    pub fn load(&self) -> Theme {
        self.store
            .get(&self.key)
            .and_then(|raw| Theme::from_css_class(&raw))
            .unwrap_or_default()
    }

    pub fn save(&self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(&self.key, theme.css_class())
    }
}

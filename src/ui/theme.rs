//! The light/dark theme flag, persisted across visits.

use parking_lot::Mutex;
use std::{collections::HashMap, fmt::Display, sync::Arc};

/// Key the theme is stored under.
pub const THEME_KEY: &str = "theme";

/// Persistent string storage, like a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing what was there.
    fn set(&self, key: &str, value: &str);
}

/// A [`KeyValueStore`] that lives as long as the process. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<Mutex<HashMap<String, String>>>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.lock().insert(key.to_owned(), value.to_owned());
    }
}

/// Represents a page theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// The default.
    #[default]
    Light,
    /// Applied through the `dark-theme` body class.
    Dark,
}

impl Theme {
    /// Returns the stored value for this theme.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the class to put on `<body>`, if any.
    #[must_use]
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-theme"),
        }
    }

    #[must_use]
    fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme toggle button and the theme it controls.
#[derive(Debug, Clone)]
pub struct ThemeToggle<S> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeToggle<S> {
    /// Reads the saved theme from `store`.
    ///
    /// Only an exact `"dark"` turns the dark theme on; anything else, including
    /// nothing, is light.
    pub fn load(store: S) -> Self {
        let theme = match store.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };

        Self { store, theme }
    }

    /// Returns the theme currently applied.
    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches to the other theme and saves it.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        self.store.set(THEME_KEY, self.theme.as_str());

        tracing::debug!(theme = %self.theme, "theme toggled");

        self.theme
    }

    /// Returns the store the theme is saved in.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }
}

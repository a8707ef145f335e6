//! Light / dark theme preference.
//!
//! The controller owns the current [`ThemePreference`] and talks to the page
//! through two small seams: a [`PreferenceStore`] (localStorage in the
//! browser) and a [`ThemeSurface`] (the body's class list). In-memory
//! implementations of both ship alongside so the controller can be driven
//! without a document.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::config::ThemeConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Parse a stored value. Anything that is not exactly "light" is dark.
    pub fn from_stored(raw: &str) -> Self {
        if raw == "light" { Self::Light } else { Self::Dark }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value persistence for the preference flag.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns `false` when the write was rejected (quota, private mode...).
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// Where the mode class lives.
pub trait ThemeSurface {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn has_class(&self, class: &str) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls seen so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// A class list without a DOM behind it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassSet(BTreeSet<String>);

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl ThemeSurface for ClassSet {
    fn add_class(&mut self, class: &str) {
        self.0.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.0.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.contains(class)
    }
}

pub struct ThemeController<S, B> {
    config: ThemeConfig,
    store: S,
    surface: B,
}

impl<S: PreferenceStore, B: ThemeSurface> ThemeController<S, B> {
    pub fn new(config: ThemeConfig, store: S, surface: B) -> Self {
        Self { config, store, surface }
    }

    /// Preference saved by a previous visit, light when nothing is stored.
    pub fn saved(&self) -> ThemePreference {
        self.store
            .get(&self.config.storage_key)
            .map(|raw| ThemePreference::from_stored(&raw))
            .unwrap_or_default()
    }

    /// Apply the saved preference. Called once at startup.
    pub fn restore(&mut self) -> ThemePreference {
        let mode = self.saved();
        self.apply_theme(mode);
        mode
    }

    /// Make `mode` the only mode class on the surface and persist it.
    /// Returns `false` if the store rejected the write; the class is set regardless.
    pub fn apply_theme(&mut self, mode: ThemePreference) -> bool {
        let ThemeConfig { storage_key, light_class, dark_class } = &self.config;
        self.surface.remove_class(light_class);
        self.surface.remove_class(dark_class);
        self.surface.add_class(match mode {
            ThemePreference::Light => light_class,
            ThemePreference::Dark => dark_class,
        });
        self.store.set(storage_key, mode.as_str())
    }

    /// Flip the mode currently shown on the surface. Returns the new mode.
    pub fn toggle_theme(&mut self) -> ThemePreference {
        let next = self.current().opposite();
        self.apply_theme(next);
        next
    }

    /// Mode read back from the surface: light only while the light class is present.
    pub fn current(&self) -> ThemePreference {
        if self.surface.has_class(&self.config.light_class) {
            ThemePreference::Light
        } else {
            ThemePreference::Dark
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &B {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(store: MemoryStore) -> ThemeController<MemoryStore, ClassSet> {
        ThemeController::new(ThemeConfig::default(), store, ClassSet::new())
    }

    #[test]
    fn test_empty_store_restores_light() {
        let mut theme = controller(MemoryStore::new());
        assert_eq!(theme.restore(), ThemePreference::Light);
        assert!(theme.surface().has_class("light-theme"));
        assert_eq!(theme.store().get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_unknown_stored_value_is_dark() {
        let mut theme = controller(MemoryStore::with_entry("theme", "purple"));
        assert_eq!(theme.restore(), ThemePreference::Dark);
        assert!(theme.surface().has_class("dark-theme"));
        assert!(!theme.surface().has_class("light-theme"));
    }

    #[test]
    fn test_toggle_flips_and_persists_every_call() {
        let mut theme = controller(MemoryStore::new());
        theme.restore();
        assert_eq!(theme.toggle_theme(), ThemePreference::Dark);
        assert_eq!(theme.toggle_theme(), ThemePreference::Light);
        assert_eq!(theme.store().writes(), 3);
        assert_eq!(theme.store().get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_apply_same_mode_twice_is_idempotent() {
        let mut theme = controller(MemoryStore::new());
        theme.apply_theme(ThemePreference::Dark);
        let once = theme.surface().clone();
        theme.apply_theme(ThemePreference::Dark);
        assert_eq!(theme.surface(), &once);
        assert_eq!(once.iter().collect::<Vec<_>>(), vec!["dark-theme"]);
    }

    #[test]
    fn test_bare_surface_reads_as_dark() {
        // No class at all: toggling lands on light.
        let mut theme = controller(MemoryStore::new());
        assert_eq!(theme.current(), ThemePreference::Dark);
        assert_eq!(theme.toggle_theme(), ThemePreference::Light);
    }
}

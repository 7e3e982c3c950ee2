use crate::prefs::{PreferenceStore, StoreError};

pub const LIGHT_CLASS: &str = "light";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == Theme::Light
    }

    /// Accessible label for the toggle control; it names the action a press
    /// would perform, not the current state.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark theme",
            Theme::Dark => "Switch to light theme",
        }
    }
}

/// Owns the current theme and its persisted preference.
pub struct ThemeController<S> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Reads the stored preference once. Absent or unknown values mean dark.
    pub fn load(store: S, key: &str) -> Self {
        let current = store
            .get(key)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default();
        Self {
            store,
            key: key.to_string(),
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and persists it. The in-memory theme changes even when
    /// the write fails, so the page still reacts to the click.
    pub fn toggle(&mut self) -> (Theme, Result<(), StoreError>) {
        self.current = self.current.toggled();
        let saved = self.store.set(&self.key, self.current.as_str());
        (self.current, saved)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    #[test]
    fn defaults_to_dark_without_preference() {
        let controller = ThemeController::load(MemoryStore::new(), "theme");
        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(controller.current().toggle_label(), "Switch to light theme");
    }

    #[test]
    fn unknown_value_falls_back_to_dark() {
        let controller = ThemeController::load(MemoryStore::with_value("theme", "sepia"), "theme");
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn toggle_persists_next_theme() {
        let mut controller = ThemeController::load(MemoryStore::new(), "theme");
        let (next, saved) = controller.toggle();
        assert!(saved.is_ok());
        assert_eq!(next, Theme::Light);
        assert_eq!(controller.store().get("theme").as_deref(), Some("light"));
        assert_eq!(next.toggle_label(), "Switch to dark theme");

        let (next, _) = controller.toggle();
        assert_eq!(next, Theme::Dark);
        assert_eq!(controller.store().get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn stored_light_is_restored() {
        let controller = ThemeController::load(MemoryStore::with_value("theme", "light"), "theme");
        assert!(controller.current().is_light());
    }
}

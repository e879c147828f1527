use std::collections::HashMap;

/// Chiave della preferenza del tema, valori "true"/"false".
pub const THEME_KEY: &str = "darkTheme";

/// Storage chiave-valore (nel browser è `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Classe da applicare al contenitore della pagina.
    pub fn body_class(self) -> Option<&'static str> {
        self.is_dark().then_some("dark-theme")
    }

    /// Icona del selettore: la luna porta al tema scuro, il sole a quello chiaro.
    pub fn switcher_icon(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }

    fn from_stored(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("true") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    fn stored_value(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }
}

/// Stato della sessione UI, al posto delle variabili globali della pagina.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub theme: Theme,
    pub menu_open: bool,
    pub scrolled: bool,
    pub filter: crate::ui::ProjectFilter,
}

impl Session {
    /// Legge la preferenza del tema all'avvio.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            theme: Theme::from_stored(store.get(THEME_KEY)),
            ..Self::default()
        }
    }

    pub(crate) fn persist_theme(&self, store: &mut impl KeyValueStore) {
        store.set(THEME_KEY, self.theme.stored_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_unknown_preference_means_light() {
        assert_eq!(Session::load(&MemoryStore::default()).theme, Theme::Light);
        assert_eq!(Session::load(&MemoryStore::with(THEME_KEY, "yes")).theme, Theme::Light);
        assert_eq!(Session::load(&MemoryStore::with(THEME_KEY, "true")).theme, Theme::Dark);
    }

    #[test]
    fn theme_helpers() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.body_class(), Some("dark-theme"));
        assert_eq!(Theme::Light.body_class(), None);
        assert_eq!(Theme::Dark.switcher_icon(), "fas fa-sun");
    }
}

use crate::session::{KeyValueStore, Session, Theme};

/// Oltre questa posizione verticale la navbar prende la classe `scrolled`.
pub const SCROLL_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    /// Dal valore dell'attributo `data-filter`.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "all" => ProjectFilter::All,
            other => ProjectFilter::Category(other.to_string()),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(c) => c == category,
        }
    }
}

/// Handler degli eventi della pagina (tema, menu, scroll, filtri), collegati una volta all'avvio.
pub struct UiController<S> {
    session: Session,
    store: S,
}

impl<S: KeyValueStore> UiController<S> {
    pub fn init(store: S) -> Self {
        let session = Session::load(&store);
        Self { session, store }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn on_theme_toggle(&mut self) -> Theme {
        self.session.theme = self.session.theme.toggled();
        self.session.persist_theme(&mut self.store);
        self.session.theme
    }

    pub fn on_menu_toggle(&mut self) -> bool {
        self.session.menu_open = !self.session.menu_open;
        self.session.menu_open
    }

    /// Click su un link del menu: il menu mobile si chiude.
    pub fn on_nav_link(&mut self) {
        self.session.menu_open = false;
    }

    /// Restituisce true se lo stato `scrolled` è cambiato.
    pub fn on_scroll(&mut self, y: f64) -> bool {
        let scrolled = y > SCROLL_THRESHOLD;
        let changed = scrolled != self.session.scrolled;
        self.session.scrolled = scrolled;
        changed
    }

    pub fn on_filter(&mut self, filter: ProjectFilter) {
        self.session.filter = filter;
    }

    pub fn is_visible(&self, category: &str) -> bool {
        self.session.filter.matches(category)
    }
}

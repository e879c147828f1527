//! Notifiche transitorie: visibili per 3 secondi (o fino al click), poi 300 ms di dissolvenza
//! e rimozione. Il tempo arriva dall'esterno in millisecondi, così la logica non dipende dal browser.

pub const DISPLAY_MS: u64 = 3_000;
pub const FADE_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NoticeKind::Info => "fas fa-info-circle",
            NoticeKind::Success => "fas fa-check-circle",
            NoticeKind::Warning => "fas fa-exclamation-triangle",
            NoticeKind::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading { since: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: u64,
    pub phase: Phase,
}

impl Notice {
    /// Corrisponde alla classe CSS `show`.
    pub fn is_shown(&self) -> bool {
        self.phase == Phase::Visible
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: NoticeKind, text: impl Into<String>, now: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice { id, kind, text: text.into(), shown_at: now, phase: Phase::Visible });
        id
    }

    /// Click sulla notifica. Restituisce false se era già in dissolvenza o non esiste più.
    pub fn dismiss(&mut self, id: u64, now: u64) -> bool {
        match self.notices.iter_mut().find(|n| n.id == id) {
            Some(n) if n.phase == Phase::Visible => {
                n.phase = Phase::Fading { since: now };
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, now: u64) {
        for n in &mut self.notices {
            let expires = n.shown_at + DISPLAY_MS;
            if n.phase == Phase::Visible && now >= expires {
                n.phase = Phase::Fading { since: expires };
            }
        }
        self.notices.retain(|n| match n.phase {
            Phase::Visible => true,
            Phase::Fading { since } => now < since + FADE_MS,
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

use std::time::Duration;

/// Intervallo tra un carattere e il successivo.
pub const STEP: Duration = Duration::from_millis(100);

/// Effetto macchina da scrivere per il titolo: il frame `n` mostra i primi `n` caratteri.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    len: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self { text, len }
    }

    /// Numero di frame oltre quello vuoto.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn frame(&self, n: usize) -> &str {
        match self.text.char_indices().nth(n) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_done(&self, n: usize) -> bool {
        n >= self.len
    }
}

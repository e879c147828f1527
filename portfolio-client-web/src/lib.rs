//! portfolio-client-web: front end del portfolio.
//!
//! La logica (form di contatto, tema, menu, filtri, notifiche, effetto macchina da scrivere)
//! vive in controller che ricevono le loro capacità come trait, così si testano senza un DOM.
//! Il modulo `web` collega questi controller al browser con yew ed è compilato solo per wasm32.

pub mod contact;
pub mod notification;
pub mod session;
pub mod typewriter;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use contact::{
    ContactController, ContactFields, ContactTransport, HttpReply, Notifier, Sleeper, SubmitControl,
    SubmitError, SubmitOutcome, TransportError,
};
pub use notification::{Notice, NoticeKind, NotificationCenter};
pub use session::{KeyValueStore, MemoryStore, Session, Theme};
pub use typewriter::Typewriter;
pub use ui::{ProjectFilter, UiController};

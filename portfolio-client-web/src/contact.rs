//! Invio del form di contatto.
//!
//! Il flusso: validazione locale, una sola POST con timeout, una notifica per tentativo.
//! Il pulsante di invio viene sempre ripristinato, anche se il future viene cancellato.

use std::pin::pin;
use std::time::Duration;

use futures_util::future::{select, Either};
use portfolio_core::{validate_for_submit, ContactRequest, Envelope, ValidationError};
use thiserror::Error;
use tracing::warn;

use crate::notification::NoticeKind;

pub const CONTACT_PATH: &str = "/api/contact";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const LOADING_LABEL: &str = "Sending...";

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_THANKS: &str = "Thank you for your message! I will get back to you soon.";
pub const MSG_SEND_FAILED: &str = "Error sending message. Please try again later.";

/// Risposta HTTP grezza: status e body testuale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("server rejected the message")]
    Rejected(Option<String>),

    #[error("malformed response body")]
    MalformedResponse,

    #[error("network error: {0}")]
    Transport(#[from] TransportError),

    #[error("no response within {0:?}")]
    TimedOut(Duration),
}

impl SubmitError {
    /// Testo mostrato all'utente: quello del server se c'è, altrimenti un messaggio generico.
    pub fn user_message(&self) -> &str {
        match self {
            SubmitError::Status { message: Some(m), .. } | SubmitError::Rejected(Some(m)) => m.as_str(),
            _ => MSG_SEND_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validazione locale fallita, nessuna richiesta inviata.
    Invalid(ValidationError),
    Sent,
    Failed(SubmitError),
}

/// POST JSON verso il servizio (`Content-Type: application/json`).
#[allow(async_fn_in_trait)]
pub trait ContactTransport {
    async fn post_contact(&self, body: &ContactRequest) -> Result<HttpReply, TransportError>;
}

#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// I tre campi del form.
pub trait ContactFields {
    fn read(&self) -> ContactRequest;
    fn reset(&self);
}

/// Il pulsante di invio.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

pub trait Notifier {
    fn notify(&self, kind: NoticeKind, text: &str);
}

// disabilita il pulsante finché vive, lo ripristina nel drop
struct BusyGuard<'a, C: SubmitControl + ?Sized> {
    control: &'a C,
    original_label: String,
}

impl<'a, C: SubmitControl + ?Sized> BusyGuard<'a, C> {
    fn engage(control: &'a C) -> Self {
        let original_label = control.label();
        control.set_disabled(true);
        control.set_label(LOADING_LABEL);
        Self { control, original_label }
    }
}

impl<C: SubmitControl + ?Sized> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_label(&self.original_label);
        self.control.set_disabled(false);
    }
}

pub struct ContactController<T, S> {
    transport: T,
    sleeper: S,
    timeout: Duration,
}

impl<T: ContactTransport, S: Sleeper> ContactController<T, S> {
    pub fn new(transport: T, sleeper: S) -> Self {
        Self { transport, sleeper, timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Handler del submit. Mostra esattamente una notifica per chiamata.
    pub async fn submit<F, C, N>(&self, fields: &F, control: &C, notifier: &N) -> SubmitOutcome
    where
        F: ContactFields + ?Sized,
        C: SubmitControl + ?Sized,
        N: Notifier + ?Sized,
    {
        let req = fields.read();
        if let Err(e) = validate_for_submit(&req) {
            notifier.notify(NoticeKind::Warning, warning_text(e));
            return SubmitOutcome::Invalid(e);
        }

        let _busy = BusyGuard::engage(control);
        match self.send(&req).await {
            Ok(()) => {
                notifier.notify(NoticeKind::Success, MSG_THANKS);
                fields.reset();
                SubmitOutcome::Sent
            }
            Err(e) => {
                warn!(error = %e, "form submission failed");
                notifier.notify(NoticeKind::Error, e.user_message());
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn send(&self, req: &ContactRequest) -> Result<(), SubmitError> {
        let request = pin!(self.transport.post_contact(req));
        let timer = pin!(self.sleeper.sleep(self.timeout));

        // se vince il timer la richiesta viene droppata, cioè cancellata
        let reply = match select(request, timer).await {
            Either::Left((reply, _)) => reply?,
            Either::Right(((), _)) => return Err(SubmitError::TimedOut(self.timeout)),
        };
        interpret(reply)
    }
}

fn warning_text(e: ValidationError) -> &'static str {
    match e {
        ValidationError::MissingField(_) => MSG_FILL_ALL_FIELDS,
        ValidationError::InvalidEmail => MSG_INVALID_EMAIL,
    }
}

fn interpret(reply: HttpReply) -> Result<(), SubmitError> {
    let envelope = serde_json::from_str::<Envelope>(&reply.body).ok();

    if !(200..300).contains(&reply.status) {
        return Err(SubmitError::Status {
            status: reply.status,
            message: envelope.and_then(|e| e.message),
        });
    }

    match envelope {
        Some(Envelope { success: true, .. }) => Ok(()),
        Some(Envelope { success: false, message }) => Err(SubmitError::Rejected(message)),
        None => Err(SubmitError::MalformedResponse),
    }
}

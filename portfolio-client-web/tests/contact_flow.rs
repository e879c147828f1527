use std::cell::{Cell, RefCell};
use std::time::Duration;

use portfolio_client_web::contact::{LOADING_LABEL, MSG_FILL_ALL_FIELDS, MSG_INVALID_EMAIL, MSG_SEND_FAILED, MSG_THANKS};
use portfolio_client_web::*;
use portfolio_core::{ContactRequest, Field, ValidationError};

const LABEL: &str = "Send Message";

/* capacità finte: nessun DOM, nessuna rete */

struct FakeFields {
    values: RefCell<ContactRequest>,
    resets: Cell<u32>,
}

impl FakeFields {
    fn new(name: &str, email: &str, message: &str) -> Self {
        Self { values: RefCell::new(ContactRequest::new(name, email, message)), resets: Cell::new(0) }
    }
}

impl ContactFields for FakeFields {
    fn read(&self) -> ContactRequest {
        self.values.borrow().clone()
    }

    fn reset(&self) {
        *self.values.borrow_mut() = ContactRequest::default();
        self.resets.set(self.resets.get() + 1);
    }
}

struct FakeButton {
    label: RefCell<String>,
    disabled: Cell<bool>,
}

impl FakeButton {
    fn new() -> Self {
        Self { label: RefCell::new(LABEL.to_string()), disabled: Cell::new(false) }
    }

    fn assert_restored(&self) {
        assert_eq!(*self.label.borrow(), LABEL);
        assert!(!self.disabled.get());
    }
}

impl SubmitControl for FakeButton {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

#[derive(Default)]
struct Notices(RefCell<Vec<(NoticeKind, String)>>);

impl Notifier for Notices {
    fn notify(&self, kind: NoticeKind, text: &str) {
        self.0.borrow_mut().push((kind, text.to_string()));
    }
}

impl Notices {
    fn single(&self) -> (NoticeKind, String) {
        let all = self.0.borrow();
        assert_eq!(all.len(), 1, "exactly one notification per attempt, got {:?}", *all);
        all[0].clone()
    }
}

enum Behaviour {
    Reply(u16, &'static str),
    Fail(&'static str),
    Hang,
}

struct FakeTransport<'a> {
    behaviour: Behaviour,
    calls: Cell<u32>,
    sent: RefCell<Vec<ContactRequest>>,
    // stato del pulsante visto durante la richiesta
    button: Option<&'a FakeButton>,
    seen: RefCell<Option<(String, bool)>>,
}

impl<'a> FakeTransport<'a> {
    fn new(behaviour: Behaviour) -> Self {
        Self { behaviour, calls: Cell::new(0), sent: RefCell::new(Vec::new()), button: None, seen: RefCell::new(None) }
    }

    fn watching(mut self, button: &'a FakeButton) -> Self {
        self.button = Some(button);
        self
    }
}

impl ContactTransport for &FakeTransport<'_> {
    async fn post_contact(&self, body: &ContactRequest) -> Result<HttpReply, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.sent.borrow_mut().push(body.clone());
        if let Some(button) = self.button {
            *self.seen.borrow_mut() = Some((button.label(), button.disabled.get()));
        }
        match self.behaviour {
            Behaviour::Reply(status, body) => Ok(HttpReply { status, body: body.to_string() }),
            Behaviour::Fail(reason) => Err(TransportError(reason.to_string())),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

fn controller<'t, 'b>(transport: &'t FakeTransport<'b>) -> ContactController<&'t FakeTransport<'b>, TokioSleeper> {
    ContactController::new(transport, TokioSleeper)
}

#[tokio::test]
async fn valid_submission_posts_once_and_clears_form() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Reply(201, r#"{"success":true,"message":"Message sent successfully!"}"#))
        .watching(&button);

    let outcome = controller(&transport).submit(&fields, &button, &notices).await;

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(transport.sent.borrow()[0], ContactRequest::new("Ann", "ann@x.com", "hi"));
    assert_eq!(notices.single(), (NoticeKind::Success, MSG_THANKS.to_string()));
    assert_eq!(fields.resets.get(), 1);
    assert_eq!(fields.read(), ContactRequest::default());
    button.assert_restored();
}

// mentre la richiesta è in corso il pulsante è disabilitato e mostra l'indicatore di caricamento
#[tokio::test]
async fn control_is_busy_while_request_is_in_flight() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Reply(201, r#"{"success":true}"#)).watching(&button);

    controller(&transport).submit(&fields, &button, &notices).await;

    assert_eq!(*transport.seen.borrow(), Some((LOADING_LABEL.to_string(), true)));
    button.assert_restored();
}

#[tokio::test]
async fn empty_field_warns_without_network_call() {
    let fields = FakeFields::new("", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Reply(201, r#"{"success":true}"#));

    let outcome = controller(&transport).submit(&fields, &button, &notices).await;

    assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MissingField(Field::Name)));
    assert_eq!(transport.calls.get(), 0);
    assert_eq!(notices.single(), (NoticeKind::Warning, MSG_FILL_ALL_FIELDS.to_string()));
    assert_eq!(fields.resets.get(), 0);
    button.assert_restored();
}

#[tokio::test]
async fn malformed_email_warns_without_network_call() {
    for email in ["not-an-email", "ann@xcom", "ann x@y.com"] {
        let fields = FakeFields::new("Ann", email, "hi");
        let button = FakeButton::new();
        let notices = Notices::default();
        let transport = FakeTransport::new(Behaviour::Reply(201, r#"{"success":true}"#));

        let outcome = controller(&transport).submit(&fields, &button, &notices).await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::InvalidEmail), "{email}");
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(notices.single(), (NoticeKind::Warning, MSG_INVALID_EMAIL.to_string()));
    }
}

#[tokio::test]
async fn server_error_shows_server_message_and_keeps_fields() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport =
        FakeTransport::new(Behaviour::Reply(500, r#"{"success":false,"message":"Error sending message. Please try again."}"#));

    let outcome = controller(&transport).submit(&fields, &button, &notices).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(SubmitError::Status { status: 500, .. })));
    assert_eq!(notices.single(), (NoticeKind::Error, "Error sending message. Please try again.".to_string()));
    assert_eq!(fields.resets.get(), 0);
    assert_eq!(fields.read().name, "Ann");
    button.assert_restored();
}

#[tokio::test]
async fn success_status_with_false_flag_is_an_error() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Reply(200, r#"{"success":false}"#));

    let outcome = controller(&transport).submit(&fields, &button, &notices).await;

    assert_eq!(outcome, SubmitOutcome::Failed(SubmitError::Rejected(None)));
    assert_eq!(notices.single(), (NoticeKind::Error, MSG_SEND_FAILED.to_string()));
    assert_eq!(fields.resets.get(), 0);
}

#[tokio::test]
async fn network_failure_shows_fallback_error() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Fail("connection refused"));

    let outcome = controller(&transport).submit(&fields, &button, &notices).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(SubmitError::Transport(TransportError("connection refused".into())))
    );
    assert_eq!(notices.single(), (NoticeKind::Error, MSG_SEND_FAILED.to_string()));
    button.assert_restored();
}

// una richiesta che non termina non lascia il pulsante disabilitato
#[tokio::test]
async fn hung_request_times_out_and_restores_control() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Hang);
    let timeout = Duration::from_millis(20);

    let outcome = controller(&transport).with_timeout(timeout).submit(&fields, &button, &notices).await;

    assert_eq!(outcome, SubmitOutcome::Failed(SubmitError::TimedOut(timeout)));
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(notices.single(), (NoticeKind::Error, MSG_SEND_FAILED.to_string()));
    assert_eq!(fields.resets.get(), 0);
    button.assert_restored();
}

// se chi chiama abbandona il submit a metà, il pulsante viene comunque ripristinato
#[tokio::test]
async fn dropping_submit_future_restores_control() {
    let fields = FakeFields::new("Ann", "ann@x.com", "hi");
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Hang);
    let ctrl = controller(&transport).with_timeout(Duration::from_secs(3600));

    let abandoned = tokio::time::timeout(Duration::from_millis(20), ctrl.submit(&fields, &button, &notices)).await;

    assert!(abandoned.is_err());
    button.assert_restored();
    assert!(notices.0.borrow().is_empty());
}

#[tokio::test]
async fn identical_submissions_are_sent_twice() {
    let button = FakeButton::new();
    let notices = Notices::default();
    let transport = FakeTransport::new(Behaviour::Reply(201, r#"{"success":true}"#));
    let ctrl = controller(&transport);

    for _ in 0..2 {
        let fields = FakeFields::new("Ann", "ann@x.com", "hi");
        assert_eq!(ctrl.submit(&fields, &button, &notices).await, SubmitOutcome::Sent);
    }
    assert_eq!(transport.calls.get(), 2);
    assert_eq!(transport.sent.borrow()[0], transport.sent.borrow()[1]);
}

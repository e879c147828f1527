//! Regole di validazione del form di contatto.
//!
//! Il client applica entrambe le regole prima di inviare la richiesta; il server applica
//! soltanto la presenza dei campi (nessun controllo di formato lato server).

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Field, ValidationError};
use crate::protocol::http::ContactRequest;

// local@domain.tld, niente RFC 5322
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Controlla che nome, email e messaggio siano tutti non vuoti, in quest'ordine.
pub fn validate_required(req: &ContactRequest) -> Result<(), ValidationError> {
    let fields = [
        (Field::Name, &req.name),
        (Field::Email, &req.email),
        (Field::Message, &req.message),
    ];
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

/// Validazione completa lato client: presenza e poi formato dell'email.
pub fn validate_for_submit(req: &ContactRequest) -> Result<(), ValidationError> {
    validate_required(req)?;
    if !is_valid_email(&req.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

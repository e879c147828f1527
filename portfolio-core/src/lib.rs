//! portfolio-core: tipi condivisi tra client e server (messaggi di contatto, DTO HTTP, validazione).
//! Niente I/O o dipendenze non compatibili con WASM.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;
pub mod validation;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use error::{Field, ValidationError};
pub use models::message::Message;
pub use protocol::http::{ContactRequest, Envelope};
pub use utils::{format_timestamp, new_message_id, now_millis, parse_timestamp};
pub use validation::{is_valid_email, validate_for_submit, validate_required};

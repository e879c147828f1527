use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portfolio_core::{Envelope, ValidationError};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

pub const SEND_FAILED: &str = "Error sending message. Please try again.";
pub const FETCH_FAILED: &str = "Error fetching messages";
pub const MALFORMED_BODY: &str = "Invalid request body";

/// Errori del servizio. La validazione e lo storage restano due varianti distinte per chi
/// chiama in Rust; sul wire un campo obbligatorio mancante è un errore di salvataggio (500).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// `public` è il testo mostrato al client, `source` finisce solo nei log.
    #[error("{public}: {source}")]
    Storage {
        public: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn storage(public: &'static str, source: StoreError) -> Self {
        ServiceError::Storage { public, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ServiceError::Validation(_) | ServiceError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ServiceError::Validation(e) => {
                error!(error = %e, "{SEND_FAILED}");
                Envelope::failure(SEND_FAILED)
            }
            ServiceError::MalformedBody(_) => Envelope::failure(MALFORMED_BODY),
            ServiceError::Storage { public, source } => {
                error!(error = %source, "{public}");
                Envelope::failure(*public)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::Field;

    #[test]
    fn validation_and_storage_share_status_but_not_variant() {
        let validation = ServiceError::from(ValidationError::MissingField(Field::Name));
        let storage = ServiceError::storage(SEND_FAILED, StoreError::Database(sqlx::Error::PoolClosed));

        assert!(matches!(validation, ServiceError::Validation(ValidationError::MissingField(Field::Name))));
        assert!(matches!(storage, ServiceError::Storage { .. }));
        assert_eq!(validation.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(validation.to_string(), "name is required");
    }

    #[test]
    fn malformed_body_stays_a_client_error() {
        assert_eq!(ServiceError::MalformedBody("eof".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_response_is_a_server_error() {
        let resp = ServiceError::from(ValidationError::MissingField(Field::Message)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

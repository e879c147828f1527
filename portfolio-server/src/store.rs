//! Collezione `messages`: solo inserimento e scansione completa ordinata.
//! I messaggi sono immutabili, nessun update o delete.

use portfolio_core::{format_timestamp, new_message_id, now_millis, ContactRequest, Message};
use sqlx::{Row, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("db error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("timestamp error: {0}")]
    Timestamp(#[from] time::Error),
}

// createdAt = max(ora, massimo già salvato): non decresce mai con l'ordine di inserimento
const INSERT_MESSAGE: &str = r#"
    INSERT INTO messages (message_id, name, email, message, created_at)
    SELECT ?, ?, ?, ?, MAX(?, COALESCE((SELECT MAX(created_at) FROM messages), 0))
    RETURNING created_at"#;

const SELECT_NEWEST_FIRST: &str = r#"
    SELECT message_id, name, email, message, created_at
    FROM messages
    ORDER BY created_at DESC, rowid DESC"#;

#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserisce un nuovo messaggio con id e timestamp assegnati dal server.
    /// Un solo INSERT per chiamata, nessuna deduplicazione.
    pub async fn insert(&self, req: &ContactRequest) -> Result<Message, StoreError> {
        let id = new_message_id();
        let created_at: i64 = sqlx::query_scalar(INSERT_MESSAGE)
            .bind(&id)
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.message)
            .bind(now_millis())
            .fetch_one(&self.pool)
            .await?;

        Ok(Message {
            id,
            name: req.name.clone(),
            email: req.email.clone(),
            message: req.message.clone(),
            created_at: format_timestamp(created_at)?,
        })
    }

    /// Tutti i messaggi, dal più recente. A parità di timestamp vince l'ultimo inserito.
    pub async fn list_newest_first(&self) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(SELECT_NEWEST_FIRST).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> Result<Message, StoreError> {
                let created_at: i64 = row.try_get("created_at")?;
                Ok(Message {
                    id: row.try_get("message_id")?,
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                    message: row.try_get("message")?,
                    created_at: format_timestamp(created_at)?,
                })
            })
            .collect()
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let n = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

use serde::{Deserialize, Serialize};

/// Messaggio di contatto persistito dal server e restituito da GET /api/messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Identità assegnata dallo storage, esposta come `_id`
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String, // RFC3339 UTC, millisecondi
}

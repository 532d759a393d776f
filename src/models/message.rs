// src/models/message.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub team_id: String,
    pub message: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Message {
    pub const COLLECTION: &'static str = "messages";

    pub fn new(team_id: &str, request: SendMessageRequest) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            team_id: team_id.to_string(),
            message: request.message.trim().to_string(),
            sender_id: request.sender_id,
            sender_name: request.sender_name,
            sender_email: request.sender_email,
            created_at: Utc::now(),
            edited: false,
            edited_at: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_email: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageRequest {
    pub user_id: String,
    pub new_message: String,
}

// Caller identity for reads (query string) and deletes (body)
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdentity {
    pub user_id: String,
}

// src/models/invitations.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{normalize_email, CascadeFailure};

// Only `Pending` is actionable; the other two are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: String,
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    pub inviter_id: String,
    #[serde(default)]
    pub inviter_name: String,
    pub invitee_id: String,
    pub invitee_email: String,
    #[serde(default)]
    pub invitee_name: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationRequest {
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    pub inviter_id: String,
    #[serde(default)]
    pub inviter_name: String,
    pub invitee_id: String,
    pub invitee_email: String,
    #[serde(default)]
    pub invitee_name: String,
}

impl Invitation {
    pub const COLLECTION: &'static str = "invitations";

    pub fn new(request: CreateInvitationRequest) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            team_id: request.team_id,
            team_name: request.team_name,
            inviter_id: request.inviter_id,
            inviter_name: request.inviter_name,
            invitee_id: request.invitee_id,
            invitee_email: normalize_email(&request.invitee_email),
            invitee_name: request.invitee_name,
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    // Falls back to the email when the client did not send a display name
    pub fn invitee_display_name(&self) -> &str {
        if self.invitee_name.trim().is_empty() {
            &self.invitee_email
        } else {
            &self.invitee_name
        }
    }
}

// Response when answering an invitation
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub id: String,
    pub status: InvitationStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_added: Option<bool>,
    pub notification_sent: bool,
    pub secondary_failures: Vec<CascadeFailure>,
}

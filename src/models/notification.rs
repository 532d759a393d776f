// src/models/notification.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Invitation, InvitationStatus};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    InvitationAccepted,
    InvitationDeclined,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub const COLLECTION: &'static str = "notifications";

    /// Notice to the inviter that their invitation was answered.
    /// `None` while the invitation is still pending.
    pub fn invitation_response(invitation: &Invitation) -> Option<Self> {
        let (kind, verb) = match invitation.status {
            InvitationStatus::Pending => return None,
            InvitationStatus::Accepted => (NotificationType::InvitationAccepted, "accepted"),
            InvitationStatus::Declined => (NotificationType::InvitationDeclined, "declined"),
        };

        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            recipient_id: invitation.inviter_id.clone(),
            kind,
            message: format!(
                "{} {} your team invitation",
                invitation.invitee_display_name(),
                verb
            ),
            team_name: invitation.team_name.clone(),
            read: false,
            created_at: Utc::now(),
        })
    }
}

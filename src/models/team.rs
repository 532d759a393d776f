// src/models/team.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CascadeFailure;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub leader: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub project: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub const COLLECTION: &'static str = "teams";

    pub fn new(request: CreateTeamRequest) -> Self {
        let mut members: Vec<String> = Vec::new();
        for member in request.members {
            let member = member.trim().to_string();
            if !member.is_empty() && !members.contains(&member) {
                members.push(member);
            }
        }

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            leader: request.leader.trim().to_string(),
            members,
            project: request.project,
            created_at: Utc::now(),
        }
    }

    /// Leader or listed member.
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.leader == user_id || self.members.iter().any(|member| member == user_id)
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    pub leader: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub project: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub project: Option<String>,
}

// Result of deleting a team; the team itself is always gone when this exists
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamDeletionOutcome {
    pub team_id: String,
    pub deleted: bool,
    pub messages_deleted: bool,
    pub deleted_message_count: u64,
    pub leader_role_reverted: bool,
    pub secondary_failures: Vec<CascadeFailure>,
    pub message: String,
}

impl TeamDeletionOutcome {
    pub fn is_clean(&self) -> bool {
        self.secondary_failures.is_empty()
    }
}

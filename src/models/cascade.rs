// src/models/cascade.rs
use serde::{Deserialize, Serialize};

// Secondary steps of the invitation and team-deletion workflows
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CascadeStep {
    DeleteMessages,
    RevertLeaderRole,
    AddMember,
    SendNotification,
}

/// A secondary step that failed after the primary write already succeeded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CascadeFailure {
    pub step: CascadeStep,
    pub detail: String,
}

impl CascadeFailure {
    pub fn new(step: CascadeStep, detail: impl Into<String>) -> Self {
        Self {
            step,
            detail: detail.into(),
        }
    }
}

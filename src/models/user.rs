// src/models/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Leader,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Leader => "leader",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Emails compare case-insensitively everywhere: users are keyed on this form
/// and pending invitations are matched against it.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl User {
    pub const COLLECTION: &'static str = "users";

    pub fn new(request: CreateUserRequest) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: normalize_email(&request.email),
            name: request.name,
            role: request.role.unwrap_or_default(),
            photo_url: request.photo_url,
            created_at: Utc::now(),
        }
    }
}

// Sent by the client after every sign-in with the identity provider
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

// src/models/task.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Fields the service owns; everything else on a task is client-defined
const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Task {
    pub const COLLECTION: &'static str = "tasks";

    pub fn new(fields: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            fields: Self::client_fields(fields),
        }
    }

    /// Drops the fields a client may not set.
    pub fn client_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
        for reserved in RESERVED_FIELDS {
            fields.remove(reserved);
        }
        fields
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub project: Option<String>,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        let wanted = [
            ("status", &self.status),
            ("assignedTo", &self.assigned_to),
            ("project", &self.project),
        ];
        wanted.iter().all(|(field, value)| match value {
            Some(value) => task.field_str(field) == Some(value.as_str()),
            None => true,
        })
    }
}

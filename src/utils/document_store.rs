// src/utils/document_store.rs
//! Collections of schemaless JSON documents keyed by a string `id`.
//!
//! The primitives mirror what the service needs from a document database:
//! equality filters, `$set`/`$addToSet` updates and bulk deletes. A filter
//! passed to `update_one` acts as a precondition, so an update guarded by
//! `status == "pending"` is a compare-and-swap.
use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::Display;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "id";

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "I/O failure on {}: {}", _0, _1)]
    Io(String, std::io::Error),
    #[display(fmt = "Malformed document in {}: {}", _0, _1)]
    Malformed(String, String),
    #[display(fmt = "Document has no string id field")]
    MissingId,
    #[display(fmt = "Invalid document id: {}", _0)]
    InvalidId(String),
    #[display(fmt = "Duplicate document id {} in {}", _1, _0)]
    DuplicateId(String, String),
    #[display(fmt = "Store lock poisoned")]
    Poisoned,
    #[display(fmt = "Store unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for StoreError {}

// Equality filter over top-level fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((field.to_string(), value.into()));
        self
    }

    /// The id this filter pins, if any. Lets stores skip a full scan.
    pub fn id(&self) -> Option<&str> {
        self.clauses
            .iter()
            .find(|(field, _)| field == ID_FIELD)
            .and_then(|(_, value)| value.as_str())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Document,
    add_to_set: Vec<(String, Value)>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set.insert(field.to_string(), value.into());
        self
    }

    pub fn set_all(mut self, fields: Document) -> Self {
        self.set.extend(fields);
        self
    }

    /// Append `value` to the array at `field` unless it is already present.
    pub fn add_to_set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.add_to_set.push((field.to_string(), value.into()));
        self
    }

    /// Applies the update in place and reports whether the document changed.
    /// The `id` field is never rewritten.
    pub fn apply(&self, doc: &mut Document) -> bool {
        let mut modified = false;

        for (field, value) in &self.set {
            if field == ID_FIELD {
                continue;
            }
            if doc.get(field) != Some(value) {
                doc.insert(field.clone(), value.clone());
                modified = true;
            }
        }

        for (field, value) in &self.add_to_set {
            let entry = doc
                .entry(field.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if !entry.is_array() {
                *entry = Value::Array(Vec::new());
            }
            if let Value::Array(items) = entry {
                if !items.contains(value) {
                    items.push(value.clone());
                    modified = true;
                }
            }
        }

        modified
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub inserted_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Backing store for every collection the service owns.
///
/// Implementations must make each call atomic with respect to the others on
/// the same store, which is what turns a filtered `update_one` into a
/// conditional write.
pub trait DocumentStore: Send + Sync {
    fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, StoreError>;

    /// Inserts `doc` unless a document matching `filter` exists. The check and
    /// the write happen under one lock. `None` when the insert was skipped.
    fn insert_if_none(
        &self,
        collection: &str,
        filter: &Filter,
        doc: Document,
    ) -> Result<Option<InsertResult>, StoreError>;

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateResult, StoreError>;

    fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateResult, StoreError>;

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError>;

    fn delete_many(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError>;
}

/// Same encoding serde uses for `DateTime<Utc>`, so typed reads keep working
/// after a field-level update.
pub fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn document_id(doc: &Document) -> Result<String, StoreError> {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(StoreError::MissingId)
}

pub fn to_document<T: Serialize>(collection: &str, value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(other) => Err(StoreError::Malformed(
            collection.to_string(),
            format!("expected an object, got {}", other),
        )),
        Err(e) => Err(StoreError::Malformed(collection.to_string(), e.to_string())),
    }
}

pub fn from_document<T: DeserializeOwned>(collection: &str, doc: Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| StoreError::Malformed(collection.to_string(), e.to_string()))
}

/// Decodes a listing. Documents that no longer fit `T` are logged and skipped.
pub fn from_documents<T: DeserializeOwned>(collection: &str, docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match from_document(collection, doc) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping document: {}", e);
                None
            }
        })
        .collect()
}

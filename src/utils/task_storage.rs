// src/utils/task_storage.rs
use crate::models::{Task, TaskQuery};
use crate::utils::document_store::{
    from_document, from_documents, timestamp, to_document, DeleteResult, DocumentStore, Filter,
    StoreError, Update,
};
use chrono::Utc;
use serde_json::{Map, Value};

const COLLECTION: &str = Task::COLLECTION;

pub fn save_task(store: &dyn DocumentStore, task: &Task) -> Result<(), StoreError> {
    store.insert_one(COLLECTION, to_document(COLLECTION, task)?)?;
    Ok(())
}

pub fn find_task_by_id(store: &dyn DocumentStore, task_id: &str) -> Result<Option<Task>, StoreError> {
    store
        .find_by_id(COLLECTION, task_id)?
        .map(|doc| from_document(COLLECTION, doc))
        .transpose()
}

// Newest first
pub fn list_tasks(store: &dyn DocumentStore, query: &TaskQuery) -> Result<Vec<Task>, StoreError> {
    let docs = store.find(COLLECTION, &Filter::new())?;
    let mut tasks: Vec<Task> = from_documents(COLLECTION, docs);
    tasks.retain(|task| query.matches(task));
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(tasks)
}

/// Merges `fields` into the task and bumps `updatedAt`.
/// Returns the stored task, or `None` if it does not exist.
pub fn update_task(
    store: &dyn DocumentStore,
    task_id: &str,
    fields: Map<String, Value>,
) -> Result<Option<Task>, StoreError> {
    let update = Update::new()
        .set_all(Task::client_fields(fields))
        .set("updatedAt", timestamp(Utc::now()));

    let result = store.update_one(COLLECTION, &Filter::by_id(task_id), &update)?;
    if result.matched_count == 0 {
        return Ok(None);
    }
    find_task_by_id(store, task_id)
}

pub fn delete_task(store: &dyn DocumentStore, task_id: &str) -> Result<DeleteResult, StoreError> {
    store.delete_one(COLLECTION, &Filter::by_id(task_id))
}

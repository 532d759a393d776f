// src/utils/memory_store.rs
use crate::utils::document_store::{
    document_id, DeleteResult, Document, DocumentStore, Filter, InsertResult, StoreError, Update,
    UpdateResult,
};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// Documents kept in insertion order per collection
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Document>>>, StoreError> {
        self.collections.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn insert_into(docs: &mut Vec<Document>, collection: &str, doc: Document) -> Result<InsertResult, StoreError> {
    let id = document_id(&doc)?;
    if docs.iter().any(|existing| document_id(existing).ok().as_deref() == Some(id.as_str())) {
        return Err(StoreError::DuplicateId(collection.to_string(), id));
    }

    docs.push(doc);
    debug!("Inserted {} into {}", id, collection);
    Ok(InsertResult {
        inserted_id: Some(id),
    })
}

impl DocumentStore for MemoryStore {
    fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, StoreError> {
        let mut collections = self.lock()?;
        let docs = collections.entry(collection.to_string()).or_default();
        insert_into(docs, collection, doc)
    }

    fn insert_if_none(
        &self,
        collection: &str,
        filter: &Filter,
        doc: Document,
    ) -> Result<Option<InsertResult>, StoreError> {
        let mut collections = self.lock()?;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|existing| filter.matches(existing)) {
            debug!("Insert into {} skipped, a match exists", collection);
            return Ok(None);
        }

        insert_into(docs, collection, doc).map(Some)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.find(collection, &Filter::by_id(id))
            .map(|mut docs| if docs.is_empty() { None } else { Some(docs.remove(0)) })
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }

    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateResult, StoreError> {
        let mut collections = self.lock()?;
        let mut result = UpdateResult::default();

        if let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)))
        {
            result.matched_count = 1;
            if update.apply(doc) {
                result.modified_count = 1;
            }
        }

        Ok(result)
    }

    fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateResult, StoreError> {
        let mut collections = self.lock()?;
        let mut result = UpdateResult::default();

        if let Some(docs) = collections.get_mut(collection) {
            for doc in docs.iter_mut().filter(|doc| filter.matches(doc)) {
                result.matched_count += 1;
                if update.apply(doc) {
                    result.modified_count += 1;
                }
            }
        }

        Ok(result)
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        let mut collections = self.lock()?;
        let mut result = DeleteResult::default();

        if let Some(docs) = collections.get_mut(collection) {
            if let Some(position) = docs.iter().position(|doc| filter.matches(doc)) {
                docs.remove(position);
                result.deleted_count = 1;
            }
        }

        Ok(result)
    }

    fn delete_many(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        let mut collections = self.lock()?;
        let mut result = DeleteResult::default();

        if let Some(docs) = collections.get_mut(collection) {
            let before = docs.len();
            docs.retain(|doc| !filter.matches(doc));
            result.deleted_count = (before - docs.len()) as u64;
        }

        Ok(result)
    }
}

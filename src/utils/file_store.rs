// src/utils/file_store.rs
// One directory per collection, one pretty-printed `<id>.json` per document.
use crate::utils::document_store::{
    document_id, DeleteResult, Document, DocumentStore, Filter, InsertResult, StoreError, Update,
    UpdateResult,
};
use lazy_static::lazy_static;
use log::{debug, error, info, warn};
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

lazy_static! {
    static ref SAFE_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap();
    static ref SAFE_COLLECTION: Regex = Regex::new(r"^[a-z_]{1,64}$").unwrap();
}

#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
    // Serializes every call so a filtered update is read-check-write atomic
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.exists() {
            info!("Creating storage directory: {}", root.display());
            fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        }

        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, StoreError> {
        if !SAFE_COLLECTION.is_match(collection) {
            return Err(StoreError::InvalidId(collection.to_string()));
        }
        Ok(self.root.join(collection))
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf, StoreError> {
        if !SAFE_ID.is_match(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.collection_dir(collection)?.join(format!("{}.json", id)))
    }

    fn ensure_collection(&self, collection: &str) -> Result<PathBuf, StoreError> {
        let dir = self.collection_dir(collection)?;
        if !dir.exists() {
            info!("Creating {} collection directory", collection);
            fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }
        Ok(dir)
    }

    fn read_document(&self, collection: &str, path: &Path) -> Result<Document, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(doc)) => Ok(doc),
            Ok(_) => Err(StoreError::Malformed(
                collection.to_string(),
                format!("{} is not a JSON object", path.display()),
            )),
            Err(e) => Err(StoreError::Malformed(collection.to_string(), e.to_string())),
        }
    }

    fn write_document(&self, collection: &str, doc: &Document) -> Result<(), StoreError> {
        let id = document_id(doc)?;
        self.ensure_collection(collection)?;
        let path = self.document_path(collection, &id)?;

        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| StoreError::Malformed(collection.to_string(), e.to_string()))?;

        // Write then rename so a crash never leaves a truncated document
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| io_error(&path, e))?;

        debug!("Saved {}/{}", collection, id);
        Ok(())
    }

    // Every parseable document in the collection, paired with its path
    fn scan(&self, collection: &str) -> Result<Vec<(PathBuf, Document)>, StoreError> {
        let dir = self.collection_dir(collection)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        for entry_result in fs::read_dir(&dir).map_err(|e| io_error(&dir, e))? {
            let entry = entry_result.map_err(|e| io_error(&dir, e))?;
            let path = entry.path();

            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                match self.read_document(collection, &path) {
                    Ok(doc) => docs.push((path, doc)),
                    Err(e) => {
                        warn!("Skipping unreadable document {}: {}", path.display(), e);
                        continue;
                    }
                }
            }
        }

        Ok(docs)
    }

    fn matching(&self, collection: &str, filter: &Filter) -> Result<Vec<(PathBuf, Document)>, StoreError> {
        if let Some(id) = filter.id() {
            if !SAFE_ID.is_match(id) {
                return Ok(Vec::new());
            }
            let path = self.document_path(collection, id)?;
            if !path.exists() {
                return Ok(Vec::new());
            }
            let doc = self.read_document(collection, &path)?;
            return Ok(if filter.matches(&doc) { vec![(path, doc)] } else { Vec::new() });
        }

        Ok(self
            .scan(collection)?
            .into_iter()
            .filter(|(_, doc)| filter.matches(doc))
            .collect())
    }

    // Caller holds the write lock
    fn insert_locked(&self, collection: &str, doc: Document) -> Result<InsertResult, StoreError> {
        let id = document_id(&doc)?;
        if self.document_path(collection, &id)?.exists() {
            return Err(StoreError::DuplicateId(collection.to_string(), id));
        }

        self.write_document(collection, &doc)?;
        Ok(InsertResult {
            inserted_id: Some(id),
        })
    }

    fn remove(&self, path: &Path) -> Result<(), StoreError> {
        fs::remove_file(path).map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    error!("Storage I/O failure at {}: {:?}", path.display(), e);
    StoreError::Io(path.display().to_string(), e)
}

impl DocumentStore for FileStore {
    fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, StoreError> {
        let _guard = self.lock()?;
        self.insert_locked(collection, doc)
    }

    fn insert_if_none(
        &self,
        collection: &str,
        filter: &Filter,
        doc: Document,
    ) -> Result<Option<InsertResult>, StoreError> {
        let _guard = self.lock()?;

        if !self.matching(collection, filter)?.is_empty() {
            debug!("Insert into {} skipped, a match exists", collection);
            return Ok(None);
        }

        self.insert_locked(collection, doc).map(Some)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let _guard = self.lock()?;
        Ok(self
            .matching(collection, &Filter::by_id(id))?
            .into_iter()
            .next()
            .map(|(_, doc)| doc))
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let _guard = self.lock()?;
        Ok(self
            .matching(collection, filter)?
            .into_iter()
            .map(|(_, doc)| doc)
            .collect())
    }

    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateResult, StoreError> {
        let _guard = self.lock()?;
        let mut result = UpdateResult::default();

        if let Some((_, mut doc)) = self.matching(collection, filter)?.into_iter().next() {
            result.matched_count = 1;
            if update.apply(&mut doc) {
                self.write_document(collection, &doc)?;
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
        let _guard = self.lock()?;
        let mut result = UpdateResult::default();

        for (_, mut doc) in self.matching(collection, filter)? {
            result.matched_count += 1;
            if update.apply(&mut doc) {
                self.write_document(collection, &doc)?;
                result.modified_count += 1;
            }
        }

        Ok(result)
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        let _guard = self.lock()?;
        let mut result = DeleteResult::default();

        if let Some((path, _)) = self.matching(collection, filter)?.into_iter().next() {
            self.remove(&path)?;
            result.deleted_count = 1;
        }

        Ok(result)
    }

    fn delete_many(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        let _guard = self.lock()?;
        let mut result = DeleteResult::default();

        for (path, _) in self.matching(collection, filter)? {
            self.remove(&path)?;
            result.deleted_count += 1;
        }

        if result.deleted_count > 0 {
            info!("✅ Deleted {} documents from {}", result.deleted_count, collection);
        }
        Ok(result)
    }
}

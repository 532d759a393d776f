// src/utils/mod.rs
use std::sync::Arc;

use crate::utils::document_store::DocumentStore;

pub mod document_store;
pub mod file_store;
pub mod invitation_storage;
pub mod memory_store;
pub mod message_storage;
pub mod notification_storage;
pub mod task_storage;
pub mod team_storage;
pub mod user_storage;

// Shared across actix workers through `web::Data`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

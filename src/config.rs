// src/config.rs
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use derive_more::Display;
use log::info;

use crate::utils::document_store::{DocumentStore, StoreError};
use crate::utils::file_store::FileStore;
use crate::utils::memory_store::MemoryStore;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STORAGE_PATH: &str = "./storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Display, PartialEq)]
pub enum ConfigError {
    #[display(fmt = "Invalid PORT value '{}'", _0)]
    InvalidPort(String),
    #[display(fmt = "Unknown STORAGE_BACKEND '{}': expected 'file' or 'memory'", _0)]
    UnknownBackend(String),
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub storage_path: PathBuf,
}

impl AppConfig {
    // Call after `dotenv::dotenv()` so a local .env file is honoured
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "file" => StorageBackend::File,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::UnknownBackend(raw)),
            },
            None => StorageBackend::File,
        };

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            storage_backend,
            storage_path: lookup("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH)),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn build_store(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        match self.storage_backend {
            StorageBackend::File => {
                info!("Using file storage at {}", self.storage_path.display());
                Ok(Arc::new(FileStore::open(&self.storage_path)?))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage, data is lost on restart");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

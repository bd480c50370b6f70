use std::path::PathBuf;
use std::sync::Arc;

use hn_core::{KeyValueStore, Result};

pub mod backends;
pub mod cache;

pub use backends::{FileStore, MemoryStore};
pub use cache::ArticleCache;

const DEFAULT_DATA_DIR: &str = ".hnsync";

/// Build a raw store from a backend name, as selected on the CLI.
pub fn create_store(kind: &str, data_dir: Option<PathBuf>) -> Result<Arc<dyn KeyValueStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "file" => {
            let dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
            Ok(Arc::new(FileStore::new(dir)))
        }
        other => Err(hn_core::Error::Storage(format!(
            "Unknown storage backend: {}",
            other
        ))),
    }
}

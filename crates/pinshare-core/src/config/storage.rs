//! File record storage configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-process file record store.
///
/// The durable database is an external collaborator; this store only
/// keeps the records uploaded through this process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Maximum number of file records kept in memory.
    #[serde(default = "default_max_records")]
    pub max_records: u64,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_max_records() -> u64 {
    10_000
}

fn default_max_upload() -> u64 {
    100 * 1024 * 1024
}

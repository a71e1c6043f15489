//! Storage seam for uploaded-file records.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::file::{FileOwner, FileRecord};
use crate::types::id::FileId;

/// Persistence of uploaded-file records (content id, name, size, owner).
///
/// The durable database lives outside this workspace; implementations
/// range from an in-process cache to a remote table client.
#[async_trait]
pub trait FileRecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store a new record.
    async fn save(&self, record: &FileRecord) -> AppResult<()>;

    /// Look a record up by id.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileRecord>>;

    /// The owner's record for `content_id`, if they already have one.
    async fn find_by_content_id(
        &self,
        owner: &FileOwner,
        content_id: &str,
    ) -> AppResult<Option<FileRecord>>;

    /// All records matching the owner's user id *or* wallet address,
    /// newest first.
    async fn list_for_owner(&self, owner: &FileOwner) -> AppResult<Vec<FileRecord>>;

    /// Delete a record. Returns `true` if something was removed.
    async fn delete(&self, id: FileId) -> AppResult<bool>;
}

//! Upload flow: pin the bytes, then record the file against its owner.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use pinshare_core::error::AppError;
use pinshare_core::result::AppResult;
use pinshare_core::traits::clock::Clock;
use pinshare_core::traits::file_store::FileRecordStore;
use pinshare_core::types::file::{FileOwner, FileRecord};
use pinshare_core::types::id::FileId;

use crate::client::PinningClient;

/// Pins uploads and manages the owner's file records.
#[derive(Debug, Clone)]
pub struct UploadService {
    client: PinningClient,
    store: Arc<dyn FileRecordStore>,
    clock: Arc<dyn Clock>,
    max_upload_size_bytes: u64,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        client: PinningClient,
        store: Arc<dyn FileRecordStore>,
        clock: Arc<dyn Clock>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            client,
            store,
            clock,
            max_upload_size_bytes,
        }
    }

    /// The pinning client.
    pub fn client(&self) -> &PinningClient {
        &self.client
    }

    /// Pin `body` and record it for `owner`.
    ///
    /// `content_type` overrides the type guessed from the file name. Pinning
    /// the same bytes again returns the owner's existing record.
    pub async fn upload(
        &self,
        owner: &FileOwner,
        file_name: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> AppResult<FileRecord> {
        if owner.is_anonymous() {
            return Err(AppError::authentication(
                "Sign in or connect a wallet to upload files",
            ));
        }
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }
        if body.is_empty() {
            return Err(AppError::validation("File is empty"));
        }
        if body.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the {} byte upload limit",
                self.max_upload_size_bytes
            )));
        }

        let mime_type = content_type
            .filter(|t| !t.is_empty() && *t != "application/octet-stream")
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(file_name)
                    .first_or_octet_stream()
                    .to_string()
            });

        let size_bytes = body.len() as u64;
        let pinned = self.client.pin_file(file_name, &mime_type, body).await?;

        if let Some(existing) = self
            .store
            .find_by_content_id(owner, &pinned.content_id)
            .await?
        {
            info!(id = %existing.id, content_id = %existing.content_id, "Content already recorded");
            return Ok(existing);
        }

        let record = FileRecord {
            id: FileId::new(),
            name: file_name.to_string(),
            mime_type,
            size_bytes,
            content_id: pinned.content_id,
            uploaded_at: self.clock.now(),
            user_id: owner.user_id.clone(),
            wallet_address: owner.wallet_address.clone(),
        };

        self.store.save(&record).await?;
        info!(
            id = %record.id,
            content_id = %record.content_id,
            size = record.size_bytes,
            "Upload recorded"
        );
        Ok(record)
    }

    /// The owner's files, newest first.
    pub async fn list(&self, owner: &FileOwner) -> AppResult<Vec<FileRecord>> {
        if owner.is_anonymous() {
            return Err(AppError::authentication(
                "Sign in or connect a wallet to list files",
            ));
        }
        self.store.list_for_owner(owner).await
    }

    /// One of the owner's files.
    pub async fn get(&self, owner: &FileOwner, id: FileId) -> AppResult<FileRecord> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        if !owner.owns(&record) {
            warn!(%id, "File access by non-owner refused");
            return Err(AppError::authorization("File belongs to another owner"));
        }
        Ok(record)
    }

    /// Remove the record of one of the owner's files.
    ///
    /// The pinned content itself stays on the network.
    pub async fn delete(&self, owner: &FileOwner, id: FileId) -> AppResult<()> {
        self.get(owner, id).await?;
        self.store.delete(id).await?;
        info!(%id, "File record deleted");
        Ok(())
    }
}

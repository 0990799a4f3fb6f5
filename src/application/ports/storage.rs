// src/application/ports/storage.rs
use crate::application::ApplicationResult;
use crate::domain::story::PhotoFileName;
use async_trait::async_trait;

/// File storage for story covers.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Stores `bytes` under a fresh unique name derived from `original_name`'s
    /// extension and returns that name.
    async fn store(&self, original_name: &str, bytes: Vec<u8>) -> ApplicationResult<PhotoFileName>;

    /// Removes a stored file. Missing files are not an error.
    async fn delete(&self, file_name: &PhotoFileName) -> ApplicationResult<()>;
}

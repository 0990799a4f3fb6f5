// src/infrastructure/storage/disk.rs
use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::storage::PhotoStorage,
    },
    domain::story::PhotoFileName,
};

/// Keeps story covers as flat files under one upload directory.
#[derive(Clone)]
pub struct DiskPhotoStorage {
    root: PathBuf,
}

impl DiskPhotoStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, file_name: &PhotoFileName) -> PathBuf {
        self.root.join(file_name.as_str())
    }

    fn fresh_name(original_name: &str) -> ApplicationResult<PhotoFileName> {
        let extension = std::path::Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let stem = Uuid::new_v4().simple().to_string();
        let name = if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{extension}")
        };
        Ok(PhotoFileName::new(name)?)
    }
}

#[async_trait]
impl PhotoStorage for DiskPhotoStorage {
    async fn store(&self, original_name: &str, bytes: Vec<u8>) -> ApplicationResult<PhotoFileName> {
        fs::create_dir_all(&self.root).await.map_err(|err| {
            ApplicationError::infrastructure(format!("failed to create upload directory: {err}"))
        })?;

        let file_name = Self::fresh_name(original_name)?;
        fs::write(self.path_for(&file_name), bytes)
            .await
            .map_err(|err| {
                ApplicationError::infrastructure(format!("failed to write photo {file_name}: {err}"))
            })?;

        tracing::debug!(file = %file_name, "stored story photo");
        Ok(file_name)
    }

    async fn delete(&self, file_name: &PhotoFileName) -> ApplicationResult<()> {
        match fs::remove_file(self.path_for(file_name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApplicationError::infrastructure(format!(
                "failed to delete photo {file_name}: {err}"
            ))),
        }
    }
}

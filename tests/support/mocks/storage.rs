// tests/support/mocks/storage.rs
use async_trait::async_trait;
use std::path::Path;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use story_desk::application::{
    ApplicationResult, error::ApplicationError, ports::storage::PhotoStorage,
};
use story_desk::domain::story::PhotoFileName;

/// Photo storage that keeps nothing on disk and remembers every call.
#[derive(Default)]
pub struct RecordingPhotoStorage {
    counter: AtomicUsize,
    stored: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl RecordingPhotoStorage {
    pub fn stored(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoStorage for RecordingPhotoStorage {
    async fn store(&self, original_name: &str, _bytes: Vec<u8>) -> ApplicationResult<PhotoFileName> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let name = format!("photo-{n}.{ext}");
        self.stored.lock().unwrap().push(name.clone());
        PhotoFileName::new(name).map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }

    async fn delete(&self, file_name: &PhotoFileName) -> ApplicationResult<()> {
        self.deleted
            .lock()
            .unwrap()
            .push(file_name.as_str().to_string());
        Ok(())
    }
}

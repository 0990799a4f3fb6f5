// tests/support/builders.rs
use std::sync::Arc;

use story_desk::application::services::{ApplicationServices, PageSizes, ServiceDependencies};

use super::mocks::{DummyClock, DummyTokenManager, InMemoryCatalog, RecordingPhotoStorage, TestSlug};

/// Services wired to one shared in-memory catalogue, with handles kept for
/// inspecting what the services did.
pub struct TestBackend {
    pub catalog: Arc<InMemoryCatalog>,
    pub photos: Arc<RecordingPhotoStorage>,
    pub services: Arc<ApplicationServices>,
}

pub struct TestBackendBuilder {
    catalog: InMemoryCatalog,
    page_sizes: PageSizes,
}

impl Default for TestBackendBuilder {
    fn default() -> Self {
        Self {
            catalog: InMemoryCatalog::with_categories(&["Tiên Hiệp", "Kiếm Hiệp", "Ngôn Tình"]),
            page_sizes: PageSizes {
                authors: 10,
                stories: 10,
            },
        }
    }
}

impl TestBackendBuilder {
    pub fn catalog(mut self, catalog: InMemoryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn page_sizes(mut self, authors: u32, stories: u32) -> Self {
        self.page_sizes = PageSizes { authors, stories };
        self
    }

    pub fn build(self) -> TestBackend {
        let catalog = Arc::new(self.catalog);
        let photos = Arc::new(RecordingPhotoStorage::default());
        let services = Arc::new(ApplicationServices::new(ServiceDependencies {
            author_write_repo: catalog.clone(),
            author_read_repo: catalog.clone(),
            story_write_repo: catalog.clone(),
            story_read_repo: catalog.clone(),
            category_repo: catalog.clone(),
            photo_storage: photos.clone(),
            token_manager: Arc::new(DummyTokenManager),
            clock: Arc::new(DummyClock),
            slugger: Arc::new(TestSlug),
            page_sizes: self.page_sizes,
        }));
        TestBackend {
            catalog,
            photos,
            services,
        }
    }
}

pub fn backend() -> TestBackend {
    TestBackendBuilder::default().build()
}

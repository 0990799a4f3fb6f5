use std::sync::Arc;

use crate::{application::ports::util::SlugGenerator, domain::author::AuthorReadRepository};

pub struct AuthorQueryService {
    pub(super) read_repo: Arc<dyn AuthorReadRepository>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
    pub(super) per_page: u32,
}

impl AuthorQueryService {
    pub fn new(
        read_repo: Arc<dyn AuthorReadRepository>,
        slugger: Arc<dyn SlugGenerator>,
        per_page: u32,
    ) -> Self {
        Self {
            read_repo,
            slugger,
            per_page,
        }
    }

    /// Search input is compared against slugs, so it is slugged first.
    pub(super) fn search_key(&self, search: Option<&str>) -> Option<String> {
        search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| self.slugger.slugify(s))
            .filter(|s| !s.is_empty())
    }
}

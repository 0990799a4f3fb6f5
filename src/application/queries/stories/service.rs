use std::sync::Arc;

use crate::{application::ports::util::SlugGenerator, domain::story::StoryReadRepository};

pub struct StoryQueryService {
    pub(super) read_repo: Arc<dyn StoryReadRepository>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
    pub(super) per_page: u32,
}

impl StoryQueryService {
    pub fn new(
        read_repo: Arc<dyn StoryReadRepository>,
        slugger: Arc<dyn SlugGenerator>,
        per_page: u32,
    ) -> Self {
        Self {
            read_repo,
            slugger,
            per_page,
        }
    }
}

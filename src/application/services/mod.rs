// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{authors::AuthorCommandService, stories::StoryCommandService},
        dto::AuthenticatedUser,
        ports::{security::TokenManager, storage::PhotoStorage, time::Clock, util::SlugGenerator},
        queries::{
            authors::AuthorQueryService, categories::CategoryQueryService,
            stories::StoryQueryService,
        },
        ApplicationResult,
    },
    domain::{
        author::{AuthorReadRepository, AuthorSlugService, AuthorWriteRepository},
        category::CategoryRepository,
        story::{StoryReadRepository, StorySlugService, StoryWriteRepository},
    },
};

/// Listing page sizes, read from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PageSizes {
    pub authors: u32,
    pub stories: u32,
}

/// Repositories and adapters the services are wired from.
pub struct ServiceDependencies {
    pub author_write_repo: Arc<dyn AuthorWriteRepository>,
    pub author_read_repo: Arc<dyn AuthorReadRepository>,
    pub story_write_repo: Arc<dyn StoryWriteRepository>,
    pub story_read_repo: Arc<dyn StoryReadRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub photo_storage: Arc<dyn PhotoStorage>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub page_sizes: PageSizes,
}

pub struct ApplicationServices {
    pub author_commands: Arc<AuthorCommandService>,
    pub author_queries: Arc<AuthorQueryService>,
    pub story_commands: Arc<StoryCommandService>,
    pub story_queries: Arc<StoryQueryService>,
    pub category_queries: Arc<CategoryQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(deps: ServiceDependencies) -> Self {
        let ServiceDependencies {
            author_write_repo,
            author_read_repo,
            story_write_repo,
            story_read_repo,
            category_repo,
            photo_storage,
            token_manager,
            clock,
            slugger,
            page_sizes,
        } = deps;

        let author_slugs = Arc::new(AuthorSlugService::new(
            Arc::clone(&author_read_repo),
            Arc::clone(&slugger),
        ));
        let story_slugs = Arc::new(StorySlugService::new(
            Arc::clone(&story_read_repo),
            Arc::clone(&slugger),
        ));

        let author_commands = Arc::new(AuthorCommandService::new(
            author_write_repo,
            Arc::clone(&author_read_repo),
            author_slugs,
            Arc::clone(&clock),
        ));
        let author_queries = Arc::new(AuthorQueryService::new(
            Arc::clone(&author_read_repo),
            Arc::clone(&slugger),
            page_sizes.authors,
        ));

        let story_commands = Arc::new(StoryCommandService::new(
            story_write_repo,
            Arc::clone(&story_read_repo),
            author_read_repo,
            Arc::clone(&category_repo),
            photo_storage,
            story_slugs,
            clock,
        ));
        let story_queries = Arc::new(StoryQueryService::new(
            story_read_repo,
            slugger,
            page_sizes.stories,
        ));
        let category_queries = Arc::new(CategoryQueryService::new(category_repo));

        Self {
            author_commands,
            author_queries,
            story_commands,
            story_queries,
            category_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Resolve a raw bearer token into the acting user.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}

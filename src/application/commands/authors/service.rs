// src/application/commands/authors/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::author::{AuthorReadRepository, AuthorSlugService, AuthorWriteRepository},
};

pub struct AuthorCommandService {
    pub(super) write_repo: Arc<dyn AuthorWriteRepository>,
    pub(super) read_repo: Arc<dyn AuthorReadRepository>,
    pub(super) slug_service: Arc<AuthorSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AuthorCommandService {
    pub fn new(
        write_repo: Arc<dyn AuthorWriteRepository>,
        read_repo: Arc<dyn AuthorReadRepository>,
        slug_service: Arc<AuthorSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            clock,
        }
    }
}

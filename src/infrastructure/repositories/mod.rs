// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_author;
mod postgres_category;
mod postgres_story;

pub use error::map_sqlx;
pub use postgres_author::{PostgresAuthorReadRepository, PostgresAuthorWriteRepository};
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_story::{PostgresStoryReadRepository, PostgresStoryWriteRepository};

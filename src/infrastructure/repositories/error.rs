use crate::domain::errors::DomainError;

const CNT_AUTHOR_SLUG: &str = "authors_slug_key";
const CNT_STORY_SLUG: &str = "stories_slug_key";
const CNT_STORY_AUTHOR: &str = "stories_author_id_fkey";
const CNT_CHAPTER_STORY: &str = "chapters_story_id_fkey";
const CNT_STORY_CATEGORY: &str = "story_categories_category_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            map_database_error(db_err.constraint(), db_err.code().as_deref(), db_err.message())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

fn map_database_error(constraint: Option<&str>, code: Option<&str>, message: &str) -> DomainError {
    if let Some(constraint) = constraint {
        match constraint {
            CNT_AUTHOR_SLUG => return DomainError::DuplicateSlug("author slug already exists".into()),
            CNT_STORY_SLUG => return DomainError::DuplicateSlug("story slug already exists".into()),
            CNT_STORY_AUTHOR => {
                return DomainError::Referenced("author is still referenced by stories".into());
            }
            CNT_CHAPTER_STORY => {
                return DomainError::Referenced("story still has chapters".into());
            }
            CNT_STORY_CATEGORY => {
                return DomainError::Validation("category does not exist".into());
            }
            _ => {}
        }
    }

    match code {
        Some("23505") => DomainError::Conflict("unique constraint violated".into()),
        Some("23503") => DomainError::Referenced("foreign key constraint violated".into()),
        Some("23514") => DomainError::Validation("check constraint violated".into()),
        _ => match constraint {
            Some(other) => DomainError::Persistence(format!("database constraint violation: {other}")),
            None => DomainError::Persistence(message.to_string()),
        },
    }
}

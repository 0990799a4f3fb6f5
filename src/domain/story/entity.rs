// src/domain/story/entity.rs
use crate::domain::author::AuthorId;
use crate::domain::category::CategoryId;
use crate::domain::slug::Slug;
use crate::domain::story::value_objects::{PhotoFileName, PhotoId, StoryId, StoryName};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPhoto {
    pub id: PhotoId,
    pub file_name: PhotoFileName,
}

/// A story together with the associations it owns.
#[derive(Debug, Clone)]
pub struct Story {
    pub id: StoryId,
    pub name: StoryName,
    pub slug: Slug,
    pub description: String,
    pub source: String,
    pub author_id: AuthorId,
    /// Set once the story is finished.
    pub completed: bool,
    pub published: bool,
    pub view_count: i64,
    pub latest_chapter_order: i32,
    pub photo: Option<StoryPhoto>,
    pub category_ids: Vec<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    pub fn category_changes(&self, requested: &[CategoryId]) -> CategoryChanges {
        CategoryChanges::between(&self.category_ids, requested)
    }
}

/// Link rows to drop and to create when a story's categories are edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub add: Vec<CategoryId>,
    pub remove: Vec<CategoryId>,
}

impl CategoryChanges {
    pub fn between(current: &[CategoryId], requested: &[CategoryId]) -> Self {
        let remove = current
            .iter()
            .filter(|id| !requested.contains(id))
            .copied()
            .collect();

        let mut add: Vec<CategoryId> = Vec::new();
        for id in requested {
            if !current.contains(id) && !add.contains(id) {
                add.push(*id);
            }
        }

        Self { add, remove }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct NewStory {
    pub name: StoryName,
    pub slug: Slug,
    pub description: String,
    pub source: String,
    pub author_id: AuthorId,
    pub photo_file_name: PhotoFileName,
    pub category_ids: Vec<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StoryUpdate {
    pub id: StoryId,
    pub name: StoryName,
    pub slug: Slug,
    pub description: String,
    pub source: String,
    pub author_id: AuthorId,
    pub completed: bool,
    /// New cover row to insert and attach.
    pub new_photo: Option<PhotoFileName>,
    /// Cover row detached by `new_photo`, removed in the same transaction.
    pub replaced_photo: Option<PhotoId>,
    pub categories: CategoryChanges,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything the delete guard needs to decide.
#[derive(Debug, Clone)]
pub struct StoryDependents {
    pub story: Story,
    pub chapter_count: u64,
}

/// Rows removed by the story delete transaction, in order: category links,
/// the story, then its photo row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRemovalPlan {
    pub id: StoryId,
    pub photo_id: Option<PhotoId>,
}

impl StoryRemovalPlan {
    pub fn for_story(story: &Story) -> Self {
        Self {
            id: story.id,
            photo_id: story.photo.as_ref().map(|photo| photo.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoryDetails {
    pub story: Story,
    pub author_name: String,
}

/// Row of the admin story listing.
#[derive(Debug, Clone)]
pub struct StorySummary {
    pub id: StoryId,
    pub photo_file_name: Option<String>,
    pub author_name: String,
    pub name: String,
    pub slug: String,
    pub completed: bool,
    pub view_count: i64,
    pub latest_chapter_order: i32,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<CategoryId> {
        values.iter().map(|v| CategoryId::new(*v).unwrap()).collect()
    }

    #[test]
    fn changes_split_into_add_and_remove() {
        let changes = CategoryChanges::between(&ids(&[1, 2, 3]), &ids(&[2, 3, 4]));
        assert_eq!(changes.add, ids(&[4]));
        assert_eq!(changes.remove, ids(&[1]));
    }

    #[test]
    fn unchanged_set_is_empty() {
        let changes = CategoryChanges::between(&ids(&[1, 2]), &ids(&[2, 1]));
        assert!(changes.is_empty());
    }

    #[test]
    fn duplicate_requested_ids_are_added_once() {
        let changes = CategoryChanges::between(&[], &ids(&[5, 5, 6]));
        assert_eq!(changes.add, ids(&[5, 6]));
    }

    #[test]
    fn removal_plan_carries_photo_row() {
        let now = Utc::now();
        let story = Story {
            id: StoryId::new(9).unwrap(),
            name: StoryName::new("Story").unwrap(),
            slug: Slug::new("story").unwrap(),
            description: String::new(),
            source: String::new(),
            author_id: AuthorId::new(1).unwrap(),
            completed: false,
            published: false,
            view_count: 0,
            latest_chapter_order: 0,
            photo: Some(StoryPhoto {
                id: PhotoId::new(3).unwrap(),
                file_name: PhotoFileName::placeholder(),
            }),
            category_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let plan = StoryRemovalPlan::for_story(&story);
        assert_eq!(plan.photo_id, Some(PhotoId::new(3).unwrap()));
    }
}

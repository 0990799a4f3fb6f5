// tests/support/mocks/catalog.rs
//! One in-memory catalogue behind every repository port, so authors, stories
//! and categories see each other the way the Postgres tables do.
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use story_desk::domain::{
    author::{
        Author, AuthorId, AuthorReadRepository, AuthorRemoval, AuthorUpdate,
        AuthorWriteRepository, NewAuthor,
    },
    category::{Category, CategoryId, CategoryRepository},
    errors::{DomainError, DomainResult},
    pagination::PageRequest,
    slug::Slug,
    story::{
        NewStory, PhotoFileName, PhotoId, Story, StoryDependents, StoryDetails, StoryId,
        StoryPhoto, StoryReadRepository, StoryRemoval, StoryRemovalPlan, StorySummary,
        StoryUpdate, StoryWriteRepository,
    },
};

#[derive(Default)]
struct State {
    authors: BTreeMap<i64, Author>,
    stories: BTreeMap<i64, Story>,
    categories: BTreeMap<i64, Category>,
    photos: BTreeMap<i64, PhotoFileName>,
    chapters: HashMap<i64, u64>,
    next_author: i64,
    next_story: i64,
    next_photo: i64,
}

#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<State>,
    /// Number of upcoming writes rejected as if another writer took the slug.
    slug_races: AtomicUsize,
    fail_removals: AtomicBool,
    story_attached_during_delete: AtomicBool,
    chapters_added_during_delete: Mutex<Option<u64>>,
    writes: AtomicUsize,
}

fn page_slice<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(names: &[&str]) -> Self {
        let catalog = Self::new();
        for (idx, name) in names.iter().enumerate() {
            catalog.add_category(idx as i64 + 1, name);
        }
        catalog
    }

    pub fn add_category(&self, id: i64, name: &str) {
        let category = Category {
            id: CategoryId(id),
            name: name.to_string(),
            slug: Slug::new(slug::slugify(name)).unwrap(),
        };
        self.state.lock().unwrap().categories.insert(id, category);
    }

    pub fn set_chapter_count(&self, story_id: i64, count: u64) {
        self.state.lock().unwrap().chapters.insert(story_id, count);
    }

    pub fn race_slugs(&self, times: usize) {
        self.slug_races.store(times, Ordering::SeqCst);
    }

    pub fn fail_removals(&self) {
        self.fail_removals.store(true, Ordering::SeqCst);
    }

    pub fn attach_story_during_delete(&self) {
        self.story_attached_during_delete
            .store(true, Ordering::SeqCst);
    }

    pub fn add_chapters_during_delete(&self, count: u64) {
        *self.chapters_added_during_delete.lock().unwrap() = Some(count);
    }

    /// Successful and rejected writes that reached the repository.
    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn author(&self, id: i64) -> Option<Author> {
        self.state.lock().unwrap().authors.get(&id).cloned()
    }

    pub fn story(&self, id: i64) -> Option<Story> {
        self.state.lock().unwrap().stories.get(&id).cloned()
    }

    pub fn photo_rows(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .photos
            .values()
            .map(|photo| photo.as_str().to_string())
            .collect()
    }

    fn take_slug_race(&self) -> bool {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.slug_races
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

impl State {
    fn author_slug_taken(&self, slug: &Slug, exclude: Option<i64>) -> bool {
        self.authors
            .values()
            .any(|a| a.slug == *slug && Some(a.id.0) != exclude)
    }

    fn story_slug_taken(&self, slug: &Slug, exclude: Option<i64>) -> bool {
        self.stories
            .values()
            .any(|s| s.slug == *slug && Some(s.id.0) != exclude)
    }

    fn author_name(&self, id: AuthorId) -> String {
        self.authors
            .get(&id.0)
            .map(|a| a.name.to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuthorWriteRepository for InMemoryCatalog {
    async fn insert(&self, author: NewAuthor) -> DomainResult<Author> {
        if self.take_slug_race() {
            return Err(DomainError::DuplicateSlug("authors_slug_key".into()));
        }
        let mut state = self.state.lock().unwrap();
        if state.author_slug_taken(&author.slug, None) {
            return Err(DomainError::DuplicateSlug("authors_slug_key".into()));
        }
        state.next_author += 1;
        let created = Author {
            id: AuthorId(state.next_author),
            name: author.name,
            slug: author.slug,
            created_at: author.created_at,
            updated_at: author.updated_at,
        };
        state.authors.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn update(&self, update: AuthorUpdate) -> DomainResult<Author> {
        if self.take_slug_race() {
            return Err(DomainError::DuplicateSlug("authors_slug_key".into()));
        }
        let mut state = self.state.lock().unwrap();
        if state.author_slug_taken(&update.slug, Some(update.id.0)) {
            return Err(DomainError::DuplicateSlug("authors_slug_key".into()));
        }
        let current = state
            .authors
            .get_mut(&update.id.0)
            .filter(|a| a.updated_at == update.original_updated_at)
            .ok_or_else(|| DomainError::Conflict("author was modified concurrently".into()))?;
        current.name = update.name;
        current.slug = update.slug;
        current.updated_at = update.updated_at;
        Ok(current.clone())
    }

    async fn remove_unreferenced(&self, id: AuthorId) -> DomainResult<AuthorRemoval> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection reset".into()));
        }
        if self.story_attached_during_delete.load(Ordering::SeqCst) {
            return Ok(AuthorRemoval::StillReferenced);
        }
        let mut state = self.state.lock().unwrap();
        if !state.authors.contains_key(&id.0) {
            return Ok(AuthorRemoval::Missing);
        }
        if state.stories.values().any(|s| s.author_id == id) {
            return Ok(AuthorRemoval::StillReferenced);
        }
        state.authors.remove(&id.0);
        Ok(AuthorRemoval::Removed)
    }
}

#[async_trait]
impl AuthorReadRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>> {
        Ok(self.author(id.0))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<AuthorId>) -> DomainResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.author_slug_taken(slug, exclude.map(|id| id.0)))
    }

    async fn has_stories(&self, id: AuthorId) -> DomainResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.stories.values().any(|s| s.author_id == id))
    }

    async fn list_page(
        &self,
        slug_filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<(Vec<Author>, u64)> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<Author> = state
            .authors
            .values()
            .filter(|a| slug_filter.is_none_or(|f| a.slug.as_str().contains(f)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        let total = matching.len() as u64;
        Ok((page_slice(matching, page), total))
    }

    async fn search_by_slug(&self, slug_filter: &str, limit: u32) -> DomainResult<Vec<Author>> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<Author> = state
            .authors
            .values()
            .filter(|a| a.slug.as_str().contains(slug_filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        matching.truncate(limit as usize);
        Ok(matching)
    }
}

#[async_trait]
impl StoryWriteRepository for InMemoryCatalog {
    async fn insert(&self, story: NewStory) -> DomainResult<Story> {
        if self.take_slug_race() {
            return Err(DomainError::DuplicateSlug("stories_slug_key".into()));
        }
        let mut state = self.state.lock().unwrap();
        if state.story_slug_taken(&story.slug, None) {
            return Err(DomainError::DuplicateSlug("stories_slug_key".into()));
        }
        if !state.authors.contains_key(&story.author_id.0) {
            return Err(DomainError::Referenced("stories_author_id_fkey".into()));
        }
        state.next_photo += 1;
        let photo_id = state.next_photo;
        state.photos.insert(photo_id, story.photo_file_name.clone());
        state.next_story += 1;
        let created = Story {
            id: StoryId(state.next_story),
            name: story.name,
            slug: story.slug,
            description: story.description,
            source: story.source,
            author_id: story.author_id,
            completed: false,
            published: false,
            view_count: 0,
            latest_chapter_order: 0,
            photo: Some(StoryPhoto {
                id: PhotoId(photo_id),
                file_name: story.photo_file_name,
            }),
            category_ids: story.category_ids,
            created_at: story.created_at,
            updated_at: story.updated_at,
        };
        state.stories.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn update(&self, update: StoryUpdate) -> DomainResult<Story> {
        if self.take_slug_race() {
            return Err(DomainError::DuplicateSlug("stories_slug_key".into()));
        }
        let mut state = self.state.lock().unwrap();
        if state.story_slug_taken(&update.slug, Some(update.id.0)) {
            return Err(DomainError::DuplicateSlug("stories_slug_key".into()));
        }
        let fresh = state
            .stories
            .get(&update.id.0)
            .is_some_and(|s| s.updated_at == update.original_updated_at);
        if !fresh {
            return Err(DomainError::Conflict("story was modified concurrently".into()));
        }
        let new_photo = update.new_photo.map(|file_name| {
            state.next_photo += 1;
            let photo_id = state.next_photo;
            state.photos.insert(photo_id, file_name.clone());
            StoryPhoto {
                id: PhotoId(photo_id),
                file_name,
            }
        });
        if let Some(old) = update.replaced_photo {
            state.photos.remove(&old.0);
        }
        let story = state
            .stories
            .get_mut(&update.id.0)
            .ok_or_else(|| DomainError::NotFound("story not found".into()))?;
        story.name = update.name;
        story.slug = update.slug;
        story.description = update.description;
        story.source = update.source;
        story.author_id = update.author_id;
        story.completed = update.completed;
        story.updated_at = update.updated_at;
        if new_photo.is_some() {
            story.photo = new_photo;
        }
        story
            .category_ids
            .retain(|id| !update.categories.remove.contains(id));
        story.category_ids.extend(update.categories.add);
        Ok(story.clone())
    }

    async fn set_published(&self, id: StoryId, published: bool) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(match state.stories.get_mut(&id.0) {
            Some(story) => {
                story.published = published;
                true
            }
            None => false,
        })
    }

    async fn remove_with_dependents(&self, plan: StoryRemovalPlan) -> DomainResult<StoryRemoval> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection reset".into()));
        }
        if let Some(count) = *self.chapters_added_during_delete.lock().unwrap() {
            return Ok(StoryRemoval::HasChapters(count));
        }
        let mut state = self.state.lock().unwrap();
        let Some(story) = state.stories.get(&plan.id.0) else {
            return Ok(StoryRemoval::Missing);
        };
        if story.photo.as_ref().map(|p| p.id) != plan.photo_id {
            return Err(DomainError::Conflict("story photo changed during delete".into()));
        }
        let chapters = state.chapters.get(&plan.id.0).copied().unwrap_or(0);
        if chapters > 0 {
            return Ok(StoryRemoval::HasChapters(chapters));
        }
        state.stories.remove(&plan.id.0);
        if let Some(photo_id) = plan.photo_id {
            state.photos.remove(&photo_id.0);
        }
        Ok(StoryRemoval::Removed)
    }
}

#[async_trait]
impl StoryReadRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: StoryId) -> DomainResult<Option<Story>> {
        Ok(self.story(id.0))
    }

    async fn find_details(&self, id: StoryId) -> DomainResult<Option<StoryDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state.stories.get(&id.0).map(|story| StoryDetails {
            author_name: state.author_name(story.author_id),
            story: story.clone(),
        }))
    }

    async fn find_with_dependents(&self, id: StoryId) -> DomainResult<Option<StoryDependents>> {
        let state = self.state.lock().unwrap();
        Ok(state.stories.get(&id.0).map(|story| StoryDependents {
            story: story.clone(),
            chapter_count: state.chapters.get(&id.0).copied().unwrap_or(0),
        }))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<StoryId>) -> DomainResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.story_slug_taken(slug, exclude.map(|id| id.0)))
    }

    async fn list_page(
        &self,
        slug_filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<(Vec<StorySummary>, u64)> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<&Story> = state
            .stories
            .values()
            .filter(|s| slug_filter.is_none_or(|f| s.slug.as_str().contains(f)))
            .collect();
        matching.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        let total = matching.len() as u64;
        let summaries = matching
            .into_iter()
            .map(|s| StorySummary {
                id: s.id,
                photo_file_name: s.photo.as_ref().map(|p| p.file_name.as_str().to_string()),
                author_name: state.author_name(s.author_id),
                name: s.name.to_string(),
                slug: s.slug.to_string(),
                completed: s.completed,
                view_count: s.view_count,
                latest_chapter_order: s.latest_chapter_order,
                updated_at: s.updated_at,
                published: s.published,
            })
            .collect();
        Ok((page_slice(summaries, page), total))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn list_all(&self) -> DomainResult<Vec<Category>> {
        let state = self.state.lock().unwrap();
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn existing_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>> {
        let state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.categories.contains_key(&id.0))
            .collect())
    }
}

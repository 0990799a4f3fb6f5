mod get_by_id;
mod list;
mod service;

pub use get_by_id::GetStoryQuery;
pub use list::ListStoriesQuery;
pub use service::StoryQueryService;

pub mod auth;
pub mod authors;
pub mod categories;
pub mod deletion;
pub mod pagination;
pub mod stories;

pub use auth::AuthenticatedUser;
pub use authors::{AuthorDto, AuthorOptionDto};
pub use categories::CategoryDto;
pub use deletion::DeletionOutcome;
pub use pagination::Page;
pub use stories::{PhotoUploadDto, StoryDetailDto, StoryDto, StorySummaryDto};

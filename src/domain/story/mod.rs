pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{
    CategoryChanges, NewStory, Story, StoryDependents, StoryDetails, StoryPhoto,
    StoryRemovalPlan, StorySummary, StoryUpdate,
};
pub use repository::{StoryReadRepository, StoryRemoval, StoryWriteRepository};
pub use services::StorySlugService;
pub use value_objects::{NO_IMAGE_FILE_NAME, PhotoFileName, PhotoId, StoryId, StoryName};

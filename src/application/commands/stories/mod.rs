// src/application/commands/stories/mod.rs
mod create;
mod delete;
mod photo;
mod publish;
mod service;
mod update;

pub use create::{CreateStoryCommand, CreateStoryCommandBuilder};
pub use delete::DeleteStoryCommand;
pub use photo::{MAX_PHOTO_BYTES, PhotoUpload};
pub use publish::SetPublishedCommand;
pub use service::StoryCommandService;
pub use update::UpdateStoryCommand;

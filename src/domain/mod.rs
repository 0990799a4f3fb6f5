pub mod author;
pub mod category;
pub mod errors;
pub mod pagination;
pub mod slug;
pub mod story;
pub mod user;

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Author, AuthorUpdate, NewAuthor};
pub use repository::{AuthorReadRepository, AuthorRemoval, AuthorWriteRepository};
pub use services::AuthorSlugService;
pub use value_objects::{AuthorId, AuthorName};

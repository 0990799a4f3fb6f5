mod get_by_id;
mod list;
mod service;
mod suggest;

pub use get_by_id::GetAuthorQuery;
pub use list::ListAuthorsQuery;
pub use service::AuthorQueryService;
pub use suggest::SuggestAuthorsQuery;

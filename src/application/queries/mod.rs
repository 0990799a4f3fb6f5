pub mod authors;
pub mod categories;
pub mod stories;

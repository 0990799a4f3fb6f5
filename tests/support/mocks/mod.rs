// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod catalog;
pub mod security;
pub mod storage;
pub mod time;
pub mod util;

pub use catalog::InMemoryCatalog;
pub use security::{
    ADMIN_TOKEN, DummyTokenManager, EDITOR_TOKEN, EXPIRED_TOKEN, READER_TOKEN, admin_user,
    editor_user, reader_user,
};
pub use storage::RecordingPhotoStorage;
pub use time::fixed_now;
pub use util::{DummyClock, TestSlug};

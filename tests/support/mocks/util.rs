// tests/support/mocks/util.rs
use chrono::{DateTime, Utc};
use story_desk::application::ports::{time::Clock, util::SlugGenerator};

#[derive(Clone)]
pub struct DummyClock;

impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        super::time::fixed_now()
    }
}

/// Same transliteration as production, so slug expectations read naturally.
#[derive(Clone)]
pub struct TestSlug;

impl SlugGenerator for TestSlug {
    fn slugify(&self, input: &str) -> String {
        slug::slugify(input)
    }
}

// src/domain/slug.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, future::Future};

/// URL-safe identifier derived from a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "slug cannot contain whitespace".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Finds the first free variant of `base`: `base`, then `base-1`, `base-2`, ...
///
/// `exists` answers whether some record other than `exclude_id` already holds
/// the candidate. Passing the record's own id on edit lets an unchanged name
/// keep its slug.
pub async fn resolve_unique_slug<I, F, Fut>(
    base: &str,
    exclude_id: Option<I>,
    mut exists: F,
) -> DomainResult<Slug>
where
    I: Copy,
    F: FnMut(Slug, Option<I>) -> Fut,
    Fut: Future<Output = DomainResult<bool>>,
{
    let mut candidate = Slug::new(base)?;
    let mut counter = 1u64;

    while exists(candidate.clone(), exclude_id).await? {
        candidate = Slug::new(format!("{base}-{counter}"))?;
        counter += 1;
    }

    Ok(candidate)
}

/// Longest base slug kept, in bytes. The slug columns hold 300, which leaves
/// room for a `-N` suffix.
pub const MAX_BASE_SLUG_LEN: usize = 290;

/// Use `fallback` when slugifying produced nothing (e.g. a name made only of
/// punctuation). Long bases are cut back to a word boundary so they fit
/// [`MAX_BASE_SLUG_LEN`].
pub fn base_or_fallback(base: String, fallback: &str) -> String {
    let base = truncate_base(base);
    if base.is_empty() {
        fallback.to_string()
    } else {
        base
    }
}

fn truncate_base(mut base: String) -> String {
    if base.len() <= MAX_BASE_SLUG_LEN {
        return base;
    }
    let mut end = MAX_BASE_SLUG_LEN;
    while !base.is_char_boundary(end) {
        end -= 1;
    }
    // Only cut back to a hyphen when the limit split a word.
    if !base[end..].starts_with('-') {
        if let Some(hyphen) = base[..end].rfind('-') {
            end = hyphen;
        }
    }
    base.truncate(end);
    let trimmed = base.trim_end_matches('-').len();
    base.truncate(trimmed);
    base
}

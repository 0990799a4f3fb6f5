// src/domain/story/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// Placeholder cover shipped with the site. Stories without an upload point
/// at it and it must never be removed from storage.
pub const NO_IMAGE_FILE_NAME: &str = "no-image.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoryId(pub i64);

impl StoryId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("story id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<StoryId> for i64 {
    fn from(value: StoryId) -> Self {
        value.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryName(String);

impl StoryName {
    pub const MAX_LEN: usize = 255;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("story name cannot be empty".into()));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "story name must be at most {} characters",
                Self::MAX_LEN
            )));
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

impl fmt::Display for StoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhotoId(pub i64);

impl PhotoId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("photo id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PhotoId> for i64 {
    fn from(value: PhotoId) -> Self {
        value.0
    }
}

/// Stored file name of a story cover, relative to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFileName(String);

impl PhotoFileName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "photo file name cannot be empty".into(),
            ));
        }
        if value.contains(['/', '\\']) || value.contains("..") {
            return Err(DomainError::Validation(
                "photo file name cannot contain path separators".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn placeholder() -> Self {
        Self(NO_IMAGE_FILE_NAME.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == NO_IMAGE_FILE_NAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhotoFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

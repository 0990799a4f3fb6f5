// src/application/commands/stories/photo.rs
use crate::application::{
    dto::PhotoUploadDto,
    error::{ApplicationError, ApplicationResult},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Decoded, validated cover upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> ApplicationResult<Self> {
        let original_name = original_name.into();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ApplicationError::validation("photo file name needs an extension"))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ApplicationError::validation(format!(
                "unsupported photo type '.{extension}'"
            )));
        }
        if bytes.is_empty() {
            return Err(ApplicationError::validation("photo file is empty"));
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(ApplicationError::validation("photo exceeds 5 MiB"));
        }

        Ok(Self {
            original_name,
            bytes,
        })
    }

    pub fn decode(dto: PhotoUploadDto) -> ApplicationResult<Self> {
        let bytes = STANDARD
            .decode(dto.content_base64.trim())
            .map_err(|err| ApplicationError::validation(format!("invalid photo encoding: {err}")))?;
        Self::new(dto.file_name, bytes)
    }
}

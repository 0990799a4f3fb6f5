// src/application/ports/util.rs

/// Maps display text to a lowercase, ASCII, hyphen-separated token.
/// Implementations must be deterministic and idempotent.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

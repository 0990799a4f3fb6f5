// src/application/commands/mod.rs
pub mod authors;
pub mod stories;

/// Attempts at a write whose slug may be taken concurrently. The unique
/// constraint decides; the pre-check only keeps collisions rare.
pub(crate) const SLUG_WRITE_ATTEMPTS: usize = 3;

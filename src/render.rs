//! Description rendering seam.
//!
//! Free-text spans (the top-level description, `@copyright` and `@todo`
//! bodies) are handed to a [`Renderer`] exactly once and stored as opaque
//! [`Block`]s. The parser never inspects a block and never re-renders one,
//! so a markup renderer (Markdown, HTML, ...) can be plugged in here without
//! the core knowing about it.

use crate::structure::Block;

/// Converts a free-text span into a presentational block.
pub trait Renderer {
    fn render(&self, text: &str) -> Block;
}

/// A renderer that passes text through unchanged.
///
/// Useful as a default and in tests; `render("")` yields the same value as
/// `Block::default()`, which keeps the canonical empty doc block consistent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, text: &str) -> Block {
        Block::new(text)
    }
}

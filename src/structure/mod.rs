//! Structured representation of a parsed doc block.
//!
//! A [`DocBlock`] is the result of running raw `/** ... */` text through the
//! parser: a one-line (or multi-line) summary, a rendered description and an
//! ordered list of typed tags. All values here are plain owned trees with no
//! back-references; once built they are never mutated.

pub mod tag;
pub mod types;

use serde::Serialize;

pub use tag::Tag;
pub use types::Type;

/// An opaque block of rendered description markup.
///
/// Blocks are produced by a [`Renderer`](crate::render::Renderer) and only
/// ever stored by the parser, which never inspects or re-renders one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block(String);

impl Block {
    pub fn new(markup: impl Into<String>) -> Self {
        Block(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A parsed doc block: summary, description and tags in source order.
///
/// Parsing always yields a `DocBlock`, even for empty or malformed input;
/// the caller can rely on a consistent shape across the whole generation
/// process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocBlock {
    pub summary: String,
    pub description: Block,
    pub tags: Vec<Tag>,
}

impl DocBlock {
    pub fn new(summary: impl Into<String>, description: Block, tags: Vec<Tag>) -> Self {
        DocBlock {
            summary: summary.into(),
            description,
            tags,
        }
    }

    /// The canonical empty doc block: empty summary and description, no
    /// tags. A pure value, cheap to construct.
    pub fn empty() -> Self {
        DocBlock {
            summary: String::new(),
            description: Block::default(),
            tags: Vec::new(),
        }
    }
}

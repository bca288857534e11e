//! Doc block parsing.
//!
//! [`DocBlockParser`] drives the whole pipeline: normalize the raw comment
//! text, split it into summary / description / tags-source regions, scan the
//! tags source into raw occurrences, and dispatch each occurrence to its
//! registered interpreter (or an `Unknown*` fallback). Even an empty or
//! malformed doc block yields a [`DocBlock`], which keeps behavior
//! consistent across the entire generation process.

pub mod normalize;
pub mod scan;
pub mod split;
pub mod tags;
pub mod type_expression;

use tracing::debug;

use crate::render::Renderer;
use crate::structure::{DocBlock, Tag};

use normalize::normalize;
use scan::{BodyKind, RawTag, scan_tags};
use split::split;

pub use scan::BodyKind as TagBodyKind;
pub use tags::{TagParser, TagRegistry};
pub use type_expression::TypeExpressionParser;

/// Parses raw doc block text into a [`DocBlock`].
pub struct DocBlockParser<R: Renderer> {
    renderer: R,
    registry: TagRegistry,
}

impl<R: Renderer> DocBlockParser<R> {
    /// A parser with the given renderer and tag registry. The registry is
    /// fixed for the parser's lifetime; build it up front.
    pub fn new(renderer: R, registry: TagRegistry) -> Self {
        DocBlockParser { renderer, registry }
    }

    /// Parse one doc block.
    ///
    /// Malformed input never fails: if the region grammar cannot match at
    /// all, the canonical empty doc block is returned instead.
    pub fn parse(&self, raw: &str) -> DocBlock {
        let normalized = normalize(raw);
        let Some(regions) = split(&normalized) else {
            return self.empty_document();
        };
        debug!(
            summary_len = regions.summary.len(),
            description_len = regions.description.len(),
            tags_source_len = regions.tags_source.len(),
            "split doc block regions"
        );

        let tags = scan_tags(regions.tags_source)
            .into_iter()
            .filter_map(|occurrence| self.dispatch(occurrence))
            .collect();

        DocBlock::new(
            regions.summary,
            self.renderer.render(regions.description),
            tags,
        )
    }

    /// Route one occurrence to its interpreter, or synthesize an unknown
    /// tag chosen purely by body kind. There is no unknown variant for the
    /// signature kind: it degrades to `UnknownDescription` carrying the
    /// parenthesized text verbatim.
    fn dispatch(&self, occurrence: RawTag<'_>) -> Option<Tag> {
        if let Some(parser) = self.registry.get(occurrence.name) {
            return parser.parse(
                occurrence.body,
                occurrence.specialization,
                occurrence.kind,
                &self.renderer,
            );
        }

        let name = occurrence.name.to_string();
        let specialization = occurrence.specialization.map(str::to_string);
        Some(match occurrence.kind {
            BodyKind::None => Tag::UnknownEmpty {
                name,
                specialization,
            },
            BodyKind::Description | BodyKind::Signature => Tag::UnknownDescription {
                name,
                specialization,
                text: occurrence.body.to_string(),
            },
            BodyKind::InlinePhpdoc => Tag::UnknownInlinePhpdoc {
                name,
                specialization,
                nested: occurrence.body.to_string(),
            },
        })
    }

    fn empty_document(&self) -> DocBlock {
        DocBlock::new(String::new(), self.renderer.render(""), Vec::new())
    }
}

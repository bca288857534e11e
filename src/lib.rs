//! PHPDoc block parsing.
//!
//! This crate turns the raw text of a `/** ... */` doc block into a
//! structured [`DocBlock`](structure::DocBlock): a summary, a rendered
//! description and an ordered list of typed tags. It follows the PSR-5
//! specification as far as practical, and it is deliberately forgiving:
//! malformed input always yields *some* document rather than an error.
//!
//! Type expressions found inside tag bodies (`int[]`,
//! `ArrayObject<string, int>`, `(int|\Foo\Bar)[]`) are handled by a
//! separate recursive-descent parser,
//! [`TypeExpressionParser`](parser::TypeExpressionParser).
//!
//! ```
//! use phpapidoc::parser::{DocBlockParser, TagRegistry};
//! use phpapidoc::render::PlainRenderer;
//!
//! let parser = DocBlockParser::new(PlainRenderer, TagRegistry::with_builtins());
//! let doc = parser.parse("/** Makes widgets.\n * @api\n */");
//! assert_eq!(doc.summary, "Makes widgets.");
//! assert_eq!(doc.tags.len(), 1);
//! ```

pub mod parser;
pub mod render;
pub mod source;
pub mod structure;

pub use parser::{DocBlockParser, TagRegistry, TypeExpressionParser};
pub use render::{PlainRenderer, Renderer};
pub use structure::{Block, DocBlock, Tag, Type};

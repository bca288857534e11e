//! The closed set of tag shapes a doc block can carry.
//!
//! Structural tags (`@api`, `@deprecated`, ...) get their own variants;
//! anything without a registered interpreter is preserved through one of the
//! `Unknown*` variants so no information is dropped. Tags keep the order in
//! which they occurred in the doc block.

use serde::Serialize;

use super::Block;

/// A single typed tag.
///
/// `Deprecated`, `Todo` and `Version` each have a canonical "empty" value
/// (see [`Tag::empty_deprecated`] and friends) used when the tag was written
/// without a usable payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Tag {
    Api,
    /// The reference behavior discards author name/email entirely; the
    /// fields exist for interpreters that want to extract them.
    Author {
        name: Option<String>,
        email: Option<String>,
    },
    Copyright {
        description: Block,
    },
    Deprecated {
        starting_version: Option<String>,
        ending_version: Option<String>,
        description: Option<String>,
    },
    InheritDoc,
    Internal,
    Todo {
        description: Option<Block>,
    },
    Version {
        version: Option<String>,
        description: Option<String>,
    },
    /// A bare `@name` with no registered interpreter.
    UnknownEmpty {
        name: String,
        specialization: Option<String>,
    },
    /// An unregistered tag with free-text (or raw signature) detail.
    UnknownDescription {
        name: String,
        specialization: Option<String>,
        text: String,
    },
    /// An unregistered tag carrying a nested `{@...}` occurrence, verbatim
    /// including the braces.
    UnknownInlinePhpdoc {
        name: String,
        specialization: Option<String>,
        nested: String,
    },
}

impl Tag {
    /// `@deprecated` with no version range or explanation.
    pub fn empty_deprecated() -> Self {
        Tag::Deprecated {
            starting_version: None,
            ending_version: None,
            description: None,
        }
    }

    /// `@todo` with no description.
    pub fn empty_todo() -> Self {
        Tag::Todo { description: None }
    }

    /// `@version` with no version or description.
    pub fn empty_version() -> Self {
        Tag::Version {
            version: None,
            description: None,
        }
    }
}

//! Tag interpreters and their registry.
//!
//! Each structural tag (`@api`, `@deprecated`, ...) has an interpreter that
//! turns a raw occurrence into a typed [`Tag`], or rejects it when the body
//! kind does not fit. The [`TagRegistry`] maps tag names to interpreters;
//! it is built once at startup and passed into the parser; occurrences
//! with no registered name fall back to the `Unknown*` variants there.

use std::collections::HashMap;

use crate::render::Renderer;
use crate::structure::Tag;

use super::scan::BodyKind;

/// Interprets one raw occurrence of a specific tag name.
///
/// Returning `None` rejects the occurrence: it matched syntactically but
/// carries a body kind this tag cannot accept, and is dropped from the
/// document. Tags with a canonical empty value substitute it instead of
/// rejecting wherever the spec calls for it.
pub trait TagParser {
    fn parse(
        &self,
        body: &str,
        specialization: Option<&str>,
        kind: BodyKind,
        renderer: &dyn Renderer,
    ) -> Option<Tag>;
}

/// Name → interpreter mapping, case-sensitive, exact match.
///
/// Specializations never take part in routing.
#[derive(Default)]
pub struct TagRegistry {
    parsers: HashMap<String, Box<dyn TagParser>>,
}

impl TagRegistry {
    /// An empty registry: every occurrence becomes an `Unknown*` tag.
    pub fn new() -> Self {
        TagRegistry::default()
    }

    /// A registry with all built-in structural tag interpreters.
    pub fn with_builtins() -> Self {
        let mut registry = TagRegistry::new();
        registry.register("api", ApiTagParser);
        registry.register("author", AuthorTagParser);
        registry.register("copyright", CopyrightTagParser);
        registry.register("deprecated", DeprecatedTagParser);
        registry.register("inheritDoc", InheritDocTagParser);
        registry.register("internal", InternalTagParser);
        registry.register("todo", TodoTagParser);
        registry.register("version", VersionTagParser);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, parser: impl TagParser + 'static) {
        self.parsers.insert(name.into(), Box::new(parser));
    }

    pub fn get(&self, name: &str) -> Option<&dyn TagParser> {
        self.parsers.get(name).map(|p| p.as_ref())
    }
}

// ─── Built-in interpreters ──────────────────────────────────────────────────

/// `@api`: marks public API. The body is ignored entirely.
pub struct ApiTagParser;

impl TagParser for ApiTagParser {
    fn parse(&self, _: &str, _: Option<&str>, _: BodyKind, _: &dyn Renderer) -> Option<Tag> {
        Some(Tag::Api)
    }
}

/// `@author`: the reference behavior discards the name/email payload.
pub struct AuthorTagParser;

impl TagParser for AuthorTagParser {
    fn parse(&self, _: &str, _: Option<&str>, _: BodyKind, _: &dyn Renderer) -> Option<Tag> {
        Some(Tag::Author {
            name: None,
            email: None,
        })
    }
}

/// `@inheritDoc`: body ignored.
pub struct InheritDocTagParser;

impl TagParser for InheritDocTagParser {
    fn parse(&self, _: &str, _: Option<&str>, _: BodyKind, _: &dyn Renderer) -> Option<Tag> {
        Some(Tag::InheritDoc)
    }
}

/// `@internal`: body ignored.
pub struct InternalTagParser;

impl TagParser for InternalTagParser {
    fn parse(&self, _: &str, _: Option<&str>, _: BodyKind, _: &dyn Renderer) -> Option<Tag> {
        Some(Tag::Internal)
    }
}

/// `@copyright`: only a description body is acceptable; it is rendered.
pub struct CopyrightTagParser;

impl TagParser for CopyrightTagParser {
    fn parse(
        &self,
        body: &str,
        _: Option<&str>,
        kind: BodyKind,
        renderer: &dyn Renderer,
    ) -> Option<Tag> {
        if kind != BodyKind::Description {
            return None;
        }
        Some(Tag::Copyright {
            description: renderer.render(body),
        })
    }
}

/// `@todo`: a rendered description, or the canonical empty value when
/// written bare. Signature and inline bodies are rejected.
pub struct TodoTagParser;

impl TagParser for TodoTagParser {
    fn parse(
        &self,
        body: &str,
        _: Option<&str>,
        kind: BodyKind,
        renderer: &dyn Renderer,
    ) -> Option<Tag> {
        match kind {
            BodyKind::None => Some(Tag::empty_todo()),
            BodyKind::Description => Some(Tag::Todo {
                description: Some(renderer.render(body)),
            }),
            _ => None,
        }
    }
}

/// `@deprecated [startingVersion[:endingVersion]] [description]`.
///
/// A body the secondary grammar cannot match empties the tag rather than
/// dropping it.
pub struct DeprecatedTagParser;

impl TagParser for DeprecatedTagParser {
    fn parse(
        &self,
        body: &str,
        _: Option<&str>,
        kind: BodyKind,
        _: &dyn Renderer,
    ) -> Option<Tag> {
        match kind {
            BodyKind::None => Some(Tag::empty_deprecated()),
            BodyKind::Description => Some(parse_deprecated_body(body)),
            _ => None,
        }
    }
}

/// `@version [version] [description]`, same fallback rule as `@deprecated`.
pub struct VersionTagParser;

impl TagParser for VersionTagParser {
    fn parse(
        &self,
        body: &str,
        _: Option<&str>,
        kind: BodyKind,
        _: &dyn Renderer,
    ) -> Option<Tag> {
        match kind {
            BodyKind::None => Some(Tag::empty_version()),
            BodyKind::Description => Some(parse_version_body(body)),
            _ => None,
        }
    }
}

// ─── Secondary grammar ──────────────────────────────────────────────────────

fn parse_deprecated_body(body: &str) -> Tag {
    // The secondary grammar is single-line; a multi-line body empties the
    // tag wholesale, discarding anything partially extracted.
    if body.contains('\n') {
        return Tag::empty_deprecated();
    }

    let mut rest = body;
    let starting_version = take_semantic_version(&mut rest);

    let mut ending_version = None;
    if let Some(after_colon) = rest.strip_prefix(':') {
        let mut candidate = after_colon;
        ending_version = take_semantic_version(&mut candidate);
        if ending_version.is_some() {
            rest = candidate;
        }
    }

    let rest = rest.trim_start_matches([' ', '\t']);
    Tag::Deprecated {
        starting_version,
        ending_version,
        description: if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        },
    }
}

fn parse_version_body(body: &str) -> Tag {
    if body.contains('\n') {
        return Tag::empty_version();
    }

    let mut rest = body;
    let version = take_semantic_version(&mut rest);
    let rest = rest.trim_start_matches([' ', '\t']);

    Tag::Version {
        version,
        description: if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        },
    }
}

/// Match a semantic version token at the start of `rest`, advancing past it
/// on success: three dot-separated numeric groups (`0` or no leading zero)
/// with an optional `-pre.release` suffix.
fn take_semantic_version<'a>(rest: &mut &'a str) -> Option<String> {
    let mut pos = match_numeric_group(rest, 0)?;
    for _ in 0..2 {
        if rest.as_bytes().get(pos) != Some(&b'.') {
            return None;
        }
        pos = match_numeric_group(rest, pos + 1)?;
    }

    // A malformed pre-release suffix backtracks to the bare version.
    if rest.as_bytes().get(pos) == Some(&b'-') {
        if let Some(end) = match_prerelease(rest, pos + 1) {
            pos = end;
        }
    }

    let version = rest[..pos].to_string();
    *rest = &rest[pos..];
    Some(version)
}

/// `0` or a digit run without a leading zero; returns the end position.
fn match_numeric_group(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let first = *bytes.get(start)?;
    if !first.is_ascii_digit() {
        return None;
    }
    if first == b'0' {
        return Some(start + 1);
    }
    let mut pos = start + 1;
    while pos < s.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    Some(pos)
}

/// Dot-separated alphanumeric/hyphen identifiers after the `-`. A dot not
/// followed by an identifier ends the suffix before the dot.
fn match_prerelease(s: &str, start: usize) -> Option<usize> {
    let mut pos = match_prerelease_ident(s, start)?;
    while s.as_bytes().get(pos) == Some(&b'.') {
        match match_prerelease_ident(s, pos + 1) {
            Some(end) => pos = end,
            None => break,
        }
    }
    Some(pos)
}

fn match_prerelease_ident(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = start;
    while pos < s.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'-') {
        pos += 1;
    }
    (pos > start).then_some(pos)
}

//! Tag scanning: turning the tags-source region into raw occurrences.
//!
//! An occurrence is `@name[:specialization]` followed by at most one of
//! three detail forms, tried in this order:
//!
//! 1. a free-text description extending across single newlines, stopped by
//!    a newline run that leads straight into another `@` or by the end of
//!    the region
//! 2. a signature: one parenthesized group without nested parentheses and
//!    with at most one comma-delimited trailing fragment
//! 3. an inline nested occurrence, `{@name ...}`, recursive
//!
//! A tag whose detail grammar fails is still emitted as a bare occurrence;
//! scanning then resumes on the next line. Occurrences are only recognized
//! at the start of a line (or straight after a prior tag's consumed body).

use memchr::memchr;

/// How the detail portion of an occurrence matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Description,
    Signature,
    InlinePhpdoc,
}

/// One raw tag occurrence, borrowing from the tags-source region.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawTag<'a> {
    pub name: &'a str,
    pub specialization: Option<&'a str>,
    pub kind: BodyKind,
    pub body: &'a str,
}

/// Inline occurrences nest; input deeper than this fails the innermost
/// match instead of growing the stack without bound.
const MAX_INLINE_DEPTH: usize = 32;

/// Scan the tags-source region for all tag occurrences, in order.
pub(crate) fn scan_tags(src: &str) -> Vec<RawTag<'_>> {
    let bytes = src.as_bytes();
    let mut tags = Vec::new();
    let mut pos = 0;
    let mut at_line_start = true;

    while pos < src.len() {
        if at_line_start && bytes[pos] == b'@' {
            if let Some((tag, end)) = match_tag(src, pos, 0) {
                // A consumed description body ends right past its newline
                // run, which puts us at the `@` of the next occurrence.
                at_line_start = end > 0 && bytes[end - 1] == b'\n';
                tags.push(tag);
                pos = end;
                continue;
            }
        }
        pos = match memchr(b'\n', &bytes[pos..]) {
            Some(i) => pos + i + 1,
            None => src.len(),
        };
        at_line_start = true;
    }

    tags
}

/// Match one occurrence starting at the `@` at `start`.
///
/// Returns the occurrence and the position right after everything it
/// consumed. The name and optional specialization are required; the detail
/// is not; any detail failure degrades to a bare occurrence.
fn match_tag(src: &str, start: usize, depth: usize) -> Option<(RawTag<'_>, usize)> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes[start], b'@');

    let name_start = start + 1;
    let name_end = match_name(src, name_start)?;
    let name = &src[name_start..name_end];

    let mut pos = name_end;
    let mut specialization = None;
    if pos < src.len() && bytes[pos] == b':' {
        let spec_end = match_specialization(src, pos + 1);
        if spec_end > pos + 1 {
            specialization = Some(&src[pos + 1..spec_end]);
            pos = spec_end;
        }
    }

    let bare = RawTag {
        name,
        specialization,
        kind: BodyKind::None,
        body: "",
    };

    let mut detail_start = pos;
    while detail_start < src.len()
        && (bytes[detail_start] == b' ' || bytes[detail_start] == b'\t')
    {
        detail_start += 1;
    }
    let had_space = detail_start > pos;
    let next = bytes.get(detail_start).copied();

    // Description: needs at least one space/tab and then ordinary text.
    if had_space && !matches!(next, None | Some(b'(') | Some(b'{') | Some(b'\n')) {
        if let Some((body_end, end)) = match_description_body(src, detail_start) {
            let tag = RawTag {
                name,
                specialization,
                kind: BodyKind::Description,
                body: src[detail_start..body_end].trim(),
            };
            return Some((tag, end));
        }
        return Some((bare, pos));
    }

    if next == Some(b'(') {
        if let Some(end) = match_signature(src, detail_start) {
            let tag = RawTag {
                name,
                specialization,
                kind: BodyKind::Signature,
                body: &src[detail_start..end],
            };
            return Some((tag, end));
        }
        return Some((bare, pos));
    }

    if next == Some(b'{') {
        if depth < MAX_INLINE_DEPTH {
            if let Some(end) = match_inline(src, detail_start, depth) {
                let tag = RawTag {
                    name,
                    specialization,
                    kind: BodyKind::InlinePhpdoc,
                    body: &src[detail_start..end],
                };
                return Some((tag, end));
            }
        }
        return Some((bare, pos));
    }

    Some((bare, pos))
}

/// Tag names start with a letter or backslash and continue with letters,
/// digits, backslash, underscore or hyphen (vendor and namespaced tags).
fn match_name(src: &str, start: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let first = *bytes.get(start)?;
    if !(first.is_ascii_alphabetic() || first == b'\\') {
        return None;
    }
    let mut pos = start + 1;
    while pos < src.len() {
        let b = bytes[pos];
        if b.is_ascii_alphanumeric() || b == b'\\' || b == b'_' || b == b'-' {
            pos += 1;
        } else {
            break;
        }
    }
    Some(pos)
}

/// Specializations are alphanumeric/hyphen runs after the colon.
fn match_specialization(src: &str, start: usize) -> usize {
    let bytes = src.as_bytes();
    let mut pos = start;
    while pos < src.len() {
        let b = bytes[pos];
        if b.is_ascii_alphanumeric() || b == b'-' {
            pos += 1;
        } else {
            break;
        }
    }
    pos
}

/// The multi-line description body, shared termination rule with the
/// region splitter: a newline run leading into `@`, or the end of input.
///
/// Returns `(body_end, match_end)`; `match_end` includes the newline run
/// that terminated the body. Unlike region text, every continuation line
/// must be non-empty; a blank line (not followed by `@`) fails the branch.
fn match_description_body(src: &str, start: usize) -> Option<(usize, usize)> {
    let bytes = src.as_bytes();
    if start >= src.len() || bytes[start] == b'\n' {
        return None;
    }

    let mut line_start = start;
    loop {
        let line_end = match memchr(b'\n', &bytes[line_start..]) {
            Some(i) => line_start + i,
            None => src.len(),
        };
        if line_end == src.len() {
            return Some((line_end, line_end));
        }

        let mut nl_end = line_end;
        while nl_end < src.len() && bytes[nl_end] == b'\n' {
            nl_end += 1;
        }
        let run = nl_end - line_end;

        if nl_end < src.len() && bytes[nl_end] == b'@' {
            return Some((line_end, nl_end));
        }
        if nl_end == src.len() && run == 1 {
            return Some((line_end, line_end));
        }
        if run >= 2 {
            // Blank line with ordinary text after it: not a valid
            // continuation, the whole description branch fails.
            return None;
        }

        line_start = nl_end;
    }
}

/// `( ... )` with no nested parentheses, no inner comma except an optional
/// trailing one before the closing parenthesis.
fn match_signature(src: &str, start: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes[start], b'(');

    let mut pos = start + 1;
    let content_start = pos;
    while pos < src.len() && !matches!(bytes[pos], b',' | b')') {
        pos += 1;
    }
    if pos == content_start {
        return None;
    }

    if bytes.get(pos) == Some(&b',') {
        pos += 1;
    }
    while pos < src.len() && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
        pos += 1;
    }
    if bytes.get(pos) == Some(&b')') {
        Some(pos + 1)
    } else {
        None
    }
}

/// `{` + nested occurrence + `}`.
fn match_inline(src: &str, start: usize, depth: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes[start], b'{');

    let inner = start + 1;
    if bytes.get(inner) != Some(&b'@') {
        return None;
    }
    let (_, end) = match_tag(src, inner, depth + 1)?;
    if bytes.get(end) == Some(&b'}') {
        Some(end + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(src: &str) -> RawTag<'_> {
        let mut tags = scan_tags(src);
        assert_eq!(tags.len(), 1, "expected one tag in {src:?}");
        tags.remove(0)
    }

    #[test]
    fn bare_tag() {
        let tag = one("@api");
        assert_eq!(tag.name, "api");
        assert_eq!(tag.specialization, None);
        assert_eq!(tag.kind, BodyKind::None);
        assert_eq!(tag.body, "");
    }

    #[test]
    fn tag_with_description() {
        let tag = one("@todo fix the splitter");
        assert_eq!(tag.name, "todo");
        assert_eq!(tag.kind, BodyKind::Description);
        assert_eq!(tag.body, "fix the splitter");
    }

    #[test]
    fn description_spans_lines() {
        let tag = one("@todo first line\nsecond line");
        assert_eq!(tag.kind, BodyKind::Description);
        assert_eq!(tag.body, "first line\nsecond line");
    }

    #[test]
    fn description_stops_before_next_tag() {
        let tags = scan_tags("@todo a\n@todo b");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].body, "a");
        assert_eq!(tags[1].body, "b");
    }

    #[test]
    fn blank_line_before_tag_terminates_description() {
        let tags = scan_tags("@todo a\n\n\n@api");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].body, "a");
        assert_eq!(tags[1].name, "api");
    }

    #[test]
    fn blank_line_before_plain_text_fails_the_description() {
        // The text after the gap is unreachable; the tag degrades to a
        // bare occurrence, matching the reference grammar.
        let tag = one("@todo a\n\nstray text");
        assert_eq!(tag.kind, BodyKind::None);
    }

    #[test]
    fn specialization_is_captured() {
        let tag = one("@method:static make()");
        assert_eq!(tag.name, "method");
        assert_eq!(tag.specialization, Some("static"));
    }

    #[test]
    fn colon_without_token_is_not_a_specialization() {
        let tag = one("@foo:");
        assert_eq!(tag.name, "foo");
        assert_eq!(tag.specialization, None);
        assert_eq!(tag.kind, BodyKind::None);
    }

    #[test]
    fn signature_detail() {
        let tag = one("@param (int $x)");
        assert_eq!(tag.kind, BodyKind::Signature);
        assert_eq!(tag.body, "(int $x)");
    }

    #[test]
    fn signature_without_space() {
        let tag = one("@param(int $x)");
        assert_eq!(tag.kind, BodyKind::Signature);
        assert_eq!(tag.body, "(int $x)");
    }

    #[test]
    fn signature_with_trailing_comma() {
        let tag = one("@param(int $x,)");
        assert_eq!(tag.kind, BodyKind::Signature);
        assert_eq!(tag.body, "(int $x,)");
    }

    #[test]
    fn two_argument_signature_is_rejected() {
        let tag = one("@param (int $x, int $y)");
        assert_eq!(tag.kind, BodyKind::None);
    }

    #[test]
    fn inline_phpdoc_detail() {
        let tag = one("@see {@link}");
        assert_eq!(tag.kind, BodyKind::InlinePhpdoc);
        assert_eq!(tag.body, "{@link}");
    }

    #[test]
    fn inline_with_inner_signature() {
        let tag = one("@see {@link(http://example.com)}");
        assert_eq!(tag.kind, BodyKind::InlinePhpdoc);
        assert_eq!(tag.body, "{@link(http://example.com)}");
    }

    #[test]
    fn inline_whose_inner_body_swallows_the_brace_fails() {
        // The inner description runs to the end of the line, so the closing
        // brace can never match; the outer tag is bare.
        let tag = one("@see {@link some text}");
        assert_eq!(tag.kind, BodyKind::None);
    }

    #[test]
    fn vendor_tag_names() {
        let tag = one("@phpstan-assert-if-true");
        assert_eq!(tag.name, "phpstan-assert-if-true");
    }

    #[test]
    fn namespaced_tag_names() {
        let tag = one("@\\Vendor\\Tool\\expects value");
        assert_eq!(tag.name, "\\Vendor\\Tool\\expects");
        assert_eq!(tag.body, "value");
    }

    #[test]
    fn tags_must_start_a_line() {
        let tags = scan_tags("some text @api more\n@internal");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "internal");
    }

    #[test]
    fn at_sign_without_name_is_skipped() {
        let tags = scan_tags("@ loose\n@api");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "api");
    }

    #[test]
    fn text_after_signature_on_the_same_line_is_skipped() {
        let tags = scan_tags("@param (int $x) @notatag\n@api");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].kind, BodyKind::Signature);
        assert_eq!(tags[1].name, "api");
    }

    #[test]
    fn empty_source_has_no_tags() {
        assert!(scan_tags("").is_empty());
    }
}

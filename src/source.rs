//! Extraction of doc comments from PHP source text.
//!
//! A doc comment is a `/**`-opened block comment. The extractor is a small
//! lexical scanner, not a PHP parser: it walks the source once, skipping
//! string literals and ordinary comments so a `/**` inside either of those
//! is never mistaken for a doc block.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Returns every `/** ... */` doc comment in `php`, in source order.
///
/// Each returned slice includes the `/**` and `*/` markers. An unterminated
/// doc comment at the end of the file is ignored.
pub fn doc_comments(php: &str) -> Vec<&str> {
    let bytes = php.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\'' | b'"' => {
                pos = skip_quoted(bytes, pos);
            }
            b'#' => {
                pos = skip_line(bytes, pos);
            }
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                pos = skip_line(bytes, pos);
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                let is_doc = bytes.get(pos + 2) == Some(&b'*')
                    && bytes.get(pos + 3) != Some(&b'/');
                let Some(end) = find_comment_end(bytes, pos + 2) else {
                    break;
                };
                if is_doc {
                    found.push(&php[pos..end]);
                }
                pos = end;
            }
            _ => pos += 1,
        }
    }

    debug!(count = found.len(), "extracted doc comments");
    found
}

/// Reads `path` and extracts its doc comments as owned strings.
pub fn doc_comments_from_file(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(doc_comments(&text).into_iter().map(str::to_owned).collect())
}

/// Advances past a single- or double-quoted string starting at `pos`.
/// Backslash escapes are honoured in both quote styles, which is a safe
/// over-approximation for single quotes where PHP only escapes `\'` and `\\`.
fn skip_quoted(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Advances past a `//` or `#` comment, leaving `pos` at the newline.
fn skip_line(bytes: &[u8], pos: usize) -> usize {
    match memchr::memchr(b'\n', &bytes[pos..]) {
        Some(offset) => pos + offset,
        None => bytes.len(),
    }
}

/// Finds the position just past the `*/` that closes a block comment whose
/// body starts at `from`.
fn find_comment_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while let Some(offset) = memchr::memchr(b'*', &bytes[i..]) {
        let star = i + offset;
        if bytes.get(star + 1) == Some(&b'/') {
            return Some(star + 2);
        }
        i = star + 1;
    }
    None
}

// ─── Tests ───

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_doc_comment() {
        let php = "<?php\n/** Summary. */\nfunction foo() {}\n";
        assert_eq!(doc_comments(php), vec!["/** Summary. */"]);
    }

    #[test]
    fn finds_multiple_in_order() {
        let php = concat!(
            "<?php\n",
            "/** First. */\n",
            "class A {\n",
            "    /** Second. */\n",
            "    public function b() {}\n",
            "}\n",
        );
        assert_eq!(doc_comments(php), vec!["/** First. */", "/** Second. */"]);
    }

    #[test]
    fn multiline_doc_comment_is_returned_whole() {
        let php = "<?php\n/**\n * Summary.\n *\n * @api\n */\n";
        assert_eq!(doc_comments(php), vec!["/**\n * Summary.\n *\n * @api\n */"]);
    }

    #[test]
    fn plain_block_comment_is_not_a_doc_comment() {
        let php = "<?php\n/* not a doc block */\n";
        assert!(doc_comments(php).is_empty());
    }

    #[test]
    fn empty_block_comment_is_not_a_doc_comment() {
        // `/**/` opens and closes immediately; there is no doc body.
        let php = "<?php /**/ $x = 1;\n";
        assert!(doc_comments(php).is_empty());
    }

    #[test]
    fn marker_inside_double_quoted_string_is_skipped() {
        let php = "<?php\n$s = \"/** not a doc block */\";\n";
        assert!(doc_comments(php).is_empty());
    }

    #[test]
    fn marker_inside_single_quoted_string_is_skipped() {
        let php = "<?php\n$s = '/** not a doc block */';\n";
        assert!(doc_comments(php).is_empty());
    }

    #[test]
    fn escaped_quote_does_not_end_the_string() {
        let php = "<?php\n$s = \"a \\\" /** still a string */\";\n/** Real. */\n";
        assert_eq!(doc_comments(php), vec!["/** Real. */"]);
    }

    #[test]
    fn marker_inside_line_comments_is_skipped() {
        let php = "<?php\n// /** nope */\n# /** nope */\n/** Yes. */\n";
        assert_eq!(doc_comments(php), vec!["/** Yes. */"]);
    }

    #[test]
    fn marker_inside_block_comment_is_skipped() {
        let php = "<?php\n/* outer /** inner */\n/** Real. */\n";
        assert_eq!(doc_comments(php), vec!["/** Real. */"]);
    }

    #[test]
    fn unterminated_doc_comment_is_ignored() {
        let php = "<?php\n/** never closed\n";
        assert!(doc_comments(php).is_empty());
    }
}

//! Region splitting: summary / description / tags source.
//!
//! The original grammar here is an ordered, backtracking one: the summary is
//! a greedy run of lines that can only stop at a small set of boundaries,
//! the description is a second run with fewer boundaries, and everything
//! left over is tag source. This is expressed as an explicit recursive
//! descent over line boundaries rather than pattern recursion.

use memchr::memchr;

/// The three regions of a normalized doc block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Regions<'a> {
    pub summary: &'a str,
    pub description: &'a str,
    pub tags_source: &'a str,
}

/// Split normalized doc block text into its regions.
///
/// Each of summary and description may legitimately be empty. `None` is
/// only possible on pathological input; the caller substitutes the
/// canonical empty doc block.
pub(crate) fn split(text: &str) -> Option<Regions<'_>> {
    let (summary_end, description_start) = match_summary(text, 0);
    let (description_end, tags_start) = match_description(text, description_start);

    Some(Regions {
        summary: &text[..summary_end],
        description: text[description_start..description_end].trim_end_matches('\n'),
        tags_source: &text[tags_start..],
    })
}

/// Greedily extend the summary from `start` across line boundaries.
///
/// Returns `(region_end, next_region_start)`. The boundaries, earliest one
/// wins, checked in order at each end of line:
///
/// 1. a newline run followed by `@`
/// 2. the line ends with a period, followed by a newline run
/// 3. two or more consecutive newlines
/// 4. end of input (also matching just before a single trailing newline)
///
/// Lines inside the region never start with `@`; a region that would have
/// to start with `@` is empty instead.
fn match_summary(text: &str, start: usize) -> (usize, usize) {
    let bytes = text.as_bytes();
    if start >= text.len() || bytes[start] == b'@' {
        return (start, start);
    }

    let mut line_start = start;
    loop {
        let line_end = end_of_line(text, line_start);
        if line_end == text.len() {
            return (line_end, line_end);
        }

        let nl_end = end_of_newline_run(text, line_end);
        let run = nl_end - line_end;

        if nl_end < text.len() && bytes[nl_end] == b'@' {
            return (line_end, nl_end);
        }
        if line_end > line_start && bytes[line_end - 1] == b'.' {
            return (line_end, nl_end);
        }
        if run >= 2 {
            return (line_end, nl_end);
        }
        if nl_end == text.len() {
            // Like PCRE `$`, a single trailing newline counts as the end.
            return (line_end, line_end);
        }

        line_start = nl_end;
    }
}

/// Extend the description from `start`; it stops only at a newline run
/// followed by `@`, or at the end of input.
fn match_description(text: &str, start: usize) -> (usize, usize) {
    let bytes = text.as_bytes();
    if start >= text.len() || bytes[start] == b'@' {
        return (start, start);
    }

    let mut line_start = start;
    loop {
        let line_end = end_of_line(text, line_start);
        if line_end == text.len() {
            return (line_end, line_end);
        }

        let nl_end = end_of_newline_run(text, line_end);
        if nl_end < text.len() && bytes[nl_end] == b'@' {
            return (line_end, nl_end);
        }
        if nl_end == text.len() && nl_end - line_end == 1 {
            return (line_end, line_end);
        }

        // Blank lines are legal inside a description; advance one newline
        // at a time so every line gets its own boundary check.
        line_start = line_end + 1;
    }
}

fn end_of_line(text: &str, from: usize) -> usize {
    match memchr(b'\n', &text.as_bytes()[from..]) {
        Some(i) => from + i,
        None => text.len(),
    }
}

fn end_of_newline_run(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut pos = from;
    while pos < bytes.len() && bytes[pos] == b'\n' {
        pos += 1;
    }
    pos
}

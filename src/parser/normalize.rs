//! Doc block text normalization.
//!
//! Strips the comment decoration so the later grammars only ever see plain
//! text. The steps run in a fixed order:
//!
//! 1. all line-ending styles become `\n`
//! 2. the `/**` opening marker on the first line and the `*/` closing marker
//!    on the last line are removed (a line left blank by this disappears
//!    entirely)
//! 3. the leading `*` gutter is stripped from every continuation line
//! 4. horizontal whitespace is trimmed from both ends of every line
//!
//! Any input is accepted, decorated or not; the result has one line per line
//! of semantic content.

/// Normalize raw doc block text for region splitting.
pub(crate) fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let line_count = text.split('\n').count();
    let mut lines: Vec<&str> = Vec::with_capacity(line_count);

    for (i, mut line) in text.split('\n').enumerate() {
        let is_first = i == 0;
        let is_last = i + 1 == line_count;
        let mut stripped_marker = false;

        if is_first {
            let unindented = line.trim_start_matches([' ', '\t']);
            if let Some(rest) = unindented.strip_prefix("/**") {
                line = rest;
                stripped_marker = true;
            }
        }

        if is_last {
            let trimmed = line.trim_end_matches([' ', '\t']);
            if let Some(rest) = trimmed.strip_suffix("*/") {
                line = rest;
                stripped_marker = true;
            }
        }

        // The gutter only ever decorates lines that followed a newline in
        // the raw input; a first line like `*emphasis*` keeps its asterisk.
        if !is_first {
            let unindented = line.trim_start_matches([' ', '\t']);
            if let Some(rest) = unindented.strip_prefix('*') {
                line = rest;
            }
        }

        let line = line.trim_matches([' ', '\t']);

        // Lines that held nothing but a marker are decoration artifacts,
        // not blank content lines.
        if line.is_empty() && stripped_marker && line_count > 1 {
            continue;
        }

        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_docblock_loses_decoration() {
        let raw = concat!(
            "/**\n",
            " * Summary line.\n",
            " *\n",
            " * Description line.\n",
            " */",
        );
        assert_eq!(normalize(raw), "Summary line.\n\nDescription line.");
    }

    #[test]
    fn single_line_docblock() {
        assert_eq!(normalize("/** @var Foo */"), "@var Foo");
    }

    #[test]
    fn windows_and_classic_mac_line_endings() {
        assert_eq!(normalize("/**\r\n * Foo.\r * Bar.\r\n */"), "Foo.\nBar.");
    }

    #[test]
    fn undecorated_text_passes_through() {
        assert_eq!(normalize("Foo.\nBar."), "Foo.\nBar.");
    }

    #[test]
    fn indented_decoration_is_stripped() {
        let raw = "    /**\n     * Foo.\n     */";
        assert_eq!(normalize(raw), "Foo.");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn blank_content_lines_survive() {
        let raw = "/**\n * a\n *\n * b\n */";
        assert_eq!(normalize(raw), "a\n\nb");
    }

    #[test]
    fn per_line_trailing_whitespace_is_trimmed() {
        assert_eq!(normalize("Foo. \t\nBar.\t"), "Foo.\nBar.");
    }

    #[test]
    fn genuinely_blank_first_line_is_kept() {
        assert_eq!(normalize("\nFoo."), "\nFoo.");
    }
}

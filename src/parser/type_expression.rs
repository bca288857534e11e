//! PSR-5 type expression parsing.
//!
//! A cursor-based recursive-descent parser over a single string. Every
//! production saves the cursor on entry and restores it before reporting a
//! failure, so sibling productions can retry from the same offset. The
//! grammar is ambiguous and order-sensitive: arrays must be tried before
//! keywords and class names (an array's base type looks like either), and
//! within arrays the simple form, the parenthesized-union form and the
//! generic form must be tried in exactly that order.
//!
//! Instead of matching the whole expression with a single pattern, the
//! expression is parsed piece by piece, because the grammar extracts
//! information through recursion.

use crate::structure::Type;

/// The reserved type keywords, including the PSR-5 extras (`false`,
/// `mixed`, `static`, `true`, `$this`).
const KEYWORDS: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "mixed", "null", "object", "resource",
    "self", "static", "string", "true", "void", "$this",
];

/// Generic values and parenthesized unions nest; expressions deeper than
/// this fail the innermost production instead of exhausting the stack.
const MAX_NESTING_DEPTH: usize = 32;

/// Recursive-descent parser for type expressions like `int[]`,
/// `(int|\Foo\Bar)[][]` or `ArrayObject<string, int>`.
#[derive(Debug, Default)]
pub struct TypeExpressionParser {
    position: usize,
    depth: usize,
}

impl TypeExpressionParser {
    pub fn new() -> Self {
        TypeExpressionParser::default()
    }

    /// Parse a type expression, returning `None` when it does not match.
    ///
    /// Note that this entry point performs no explicit end-of-input check
    /// after the match; full consumption is only enforced indirectly by the
    /// union loop, which demands a `|` before any further input. Callers
    /// relying on partial matches keep working.
    pub fn parse(&mut self, expression: &str) -> Option<Type> {
        self.position = 0;
        self.depth = 0;
        self.match_type_expression(expression, None)
    }

    /// One or more types separated by `|`, stopped at end of input or once
    /// one of `stop_chars` follows a successfully matched type.
    fn match_type_expression(&mut self, expr: &str, stop_chars: Option<&str>) -> Option<Type> {
        let start = self.position;
        if self.depth >= MAX_NESTING_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = self.match_union_members(expr, stop_chars);
        self.depth -= 1;

        if result.is_none() {
            self.position = start;
        }
        result
    }

    fn match_union_members(&mut self, expr: &str, stop_chars: Option<&str>) -> Option<Type> {
        let start = self.position;
        let mut types = Vec::new();

        loop {
            if self.position > start && !self.eat(expr, "|") {
                return None;
            }

            types.push(self.match_type(expr)?);

            if self.position >= expr.len() {
                break;
            }
            if let Some(stop) = stop_chars {
                let next = expr[self.position..].chars().next()?;
                if stop.contains(next) {
                    break;
                }
            }
        }

        if types.len() > 1 {
            Some(Type::Union(types))
        } else {
            types.pop()
        }
    }

    /// A single type: array forms first (their base type would otherwise be
    /// swallowed by the simpler productions), then keyword, then class name.
    fn match_type(&mut self, expr: &str) -> Option<Type> {
        self.match_array(expr)
            .or_else(|| self.match_keyword(expr).map(Type::Keyword))
            .or_else(|| self.match_class_name(expr).map(Type::ClassName))
    }

    /// Any of the array forms, in an order that keeps a generic's `<...>`
    /// from being misread as levels and a parenthesized union from being
    /// misread as a bare base type.
    fn match_array(&mut self, expr: &str) -> Option<Type> {
        self.match_array_type(expr)
            .or_else(|| self.match_union_array_type(expr))
            .or_else(|| self.match_generic(expr))
    }

    /// A base type followed by one or more `[]` pairs. The base type order
    /// matters: a generic's head is itself a class-name-shaped token, so
    /// generics go before class names.
    fn match_array_type(&mut self, expr: &str) -> Option<Type> {
        let start = self.position;

        let base = self
            .match_keyword(expr)
            .map(Type::Keyword)
            .or_else(|| self.match_generic(expr))
            .or_else(|| self.match_class_name(expr).map(Type::ClassName))
            .or_else(|| self.match_union_array_type(expr));

        let Some(base) = base else {
            self.position = start;
            return None;
        };

        match self.match_levels(expr) {
            Some(levels) => Some(Type::array(base, levels)),
            None => {
                // No bracket pairs: not an array, let the caller try the
                // base type as an ordinary production.
                self.position = start;
                None
            }
        }
    }

    /// `(` expression `)` followed by one or more mandatory `[]` pairs.
    fn match_union_array_type(&mut self, expr: &str) -> Option<Type> {
        let start = self.position;

        let matched = (|this: &mut Self| {
            if !this.eat(expr, "(") {
                return None;
            }
            let base = this.match_type_expression(expr, Some(")"))?;
            if !this.eat(expr, ")") {
                return None;
            }
            let levels = this.match_levels(expr)?;
            Some(Type::array(base, levels))
        })(self);

        if matched.is_none() {
            self.position = start;
        }
        matched
    }

    /// `array<...>` (implicit collection) or `ClassName<...>`, with an
    /// optional key type before the value type.
    fn match_generic(&mut self, expr: &str) -> Option<Type> {
        let start = self.position;

        let matched = (|this: &mut Self| {
            let collection = match this.match_keyword(expr) {
                // Only the `array` keyword may head a generic.
                Some(keyword) if keyword == "array" => None,
                Some(_) => return None,
                None => Some(this.match_class_name(expr)?),
            };

            if !this.eat(expr, "<") {
                return None;
            }

            let mut value = this.match_type_expression(expr, Some(",>"))?;
            let mut key = None;

            if this.eat(expr, ",") {
                this.skip_horizontal_whitespace(expr);
                key = Some(Box::new(value));
                value = this.match_type_expression(expr, Some(">"))?;
            }

            if !this.eat(expr, ">") {
                return None;
            }

            Some(Type::Generic {
                collection,
                key,
                value: Box::new(value),
            })
        })(self);

        if matched.is_none() {
            self.position = start;
        }
        matched
    }

    /// One or more `[]` pairs; the level count.
    fn match_levels(&mut self, expr: &str) -> Option<usize> {
        let mut levels = 0;
        while expr[self.position..].starts_with("[]") {
            self.position += 2;
            levels += 1;
        }
        (levels > 0).then_some(levels)
    }

    /// The longest keyword from the fixed set at the cursor.
    fn match_keyword(&mut self, expr: &str) -> Option<String> {
        let rest = &expr[self.position..];
        let keyword = KEYWORDS.iter().find(|k| rest.starts_with(**k))?;
        self.position += keyword.len();
        Some((*keyword).to_string())
    }

    /// An optional leading `\`, then one or more `\`-separated labels. A
    /// label starts with a letter, underscore or any character past the
    /// ASCII range and continues with those plus digits.
    fn match_class_name(&mut self, expr: &str) -> Option<String> {
        let start = self.position;
        let rest = &expr[start..];
        let mut len = 0;

        if rest.starts_with('\\') {
            len += 1;
        }
        len += Self::match_label(&rest[len..])?;
        while rest[len..].starts_with('\\') {
            match Self::match_label(&rest[len + 1..]) {
                Some(label_len) => len += 1 + label_len,
                None => break,
            }
        }

        self.position += len;
        Some(rest[..len].to_string())
    }

    fn match_label(s: &str) -> Option<usize> {
        let mut chars = s.char_indices();
        let (_, first) = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_' || first as u32 >= 0x7f) {
            return None;
        }
        for (idx, c) in chars {
            if !(c.is_ascii_alphanumeric() || c == '_' || c as u32 >= 0x7f) {
                return Some(idx);
            }
        }
        Some(s.len())
    }

    fn eat(&mut self, expr: &str, token: &str) -> bool {
        if expr[self.position..].starts_with(token) {
            self.position += token.len();
            true
        } else {
            false
        }
    }

    fn skip_horizontal_whitespace(&mut self, expr: &str) {
        let bytes = expr.as_bytes();
        while self.position < expr.len()
            && (bytes[self.position] == b' ' || bytes[self.position] == b'\t')
        {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(expr: &str) -> Option<Type> {
        TypeExpressionParser::new().parse(expr)
    }

    #[test]
    fn keywords_match_whole_input() {
        for keyword in KEYWORDS {
            assert_eq!(
                parse(keyword),
                Some(Type::keyword(*keyword)),
                "keyword {keyword}"
            );
        }
    }

    #[test]
    fn class_names_match_as_written() {
        for name in ["Foo", "Foo_Bar123_baz", "Foo\\Bar123\\baz", "\\Foo\\Bar123\\baz"] {
            assert_eq!(parse(name), Some(Type::class_name(name)), "name {name}");
        }
    }

    #[test]
    fn extended_latin_labels_are_class_names() {
        assert_eq!(parse("Foo\\π\\baz"), Some(Type::class_name("Foo\\π\\baz")));
    }

    #[test]
    fn simple_arrays() {
        assert_eq!(parse("int[]"), Some(Type::array(Type::keyword("int"), 1)));
        assert_eq!(
            parse("int[][][]"),
            Some(Type::array(Type::keyword("int"), 3))
        );
        assert_eq!(
            parse("\\Foo\\Bar[][]"),
            Some(Type::array(Type::class_name("\\Foo\\Bar"), 2))
        );
    }

    #[test]
    fn parenthesized_single_type_array() {
        assert_eq!(
            parse("(array)[]"),
            Some(Type::array(Type::keyword("array"), 1))
        );
    }

    #[test]
    fn union_array() {
        assert_eq!(
            parse("(int|\\Foo\\Bar)[][]"),
            Some(Type::array(
                Type::Union(vec![Type::keyword("int"), Type::class_name("\\Foo\\Bar")]),
                2
            ))
        );
    }

    #[test]
    fn generic_array() {
        let expected = Type::array(
            Type::Generic {
                collection: Some("ArrayObject".into()),
                key: Some(Box::new(Type::keyword("int"))),
                value: Box::new(Type::keyword("string")),
            },
            1,
        );
        assert_eq!(parse("ArrayObject<int, string>[]"), Some(expected));
    }

    #[test]
    fn array_keyword_generic_collapses_the_collection() {
        assert_eq!(
            parse("array<int>"),
            Some(Type::Generic {
                collection: None,
                key: None,
                value: Box::new(Type::keyword("int")),
            })
        );
    }

    #[test]
    fn generic_with_key_and_value() {
        assert_eq!(
            parse("ArrayObject<int, string>"),
            Some(Type::Generic {
                collection: Some("ArrayObject".into()),
                key: Some(Box::new(Type::keyword("int"))),
                value: Box::new(Type::keyword("string")),
            })
        );
    }

    #[test]
    fn generic_with_class_key_and_array_value() {
        assert_eq!(
            parse("ArrayObject<SplObjectStorage, int[]>"),
            Some(Type::Generic {
                collection: Some("ArrayObject".into()),
                key: Some(Box::new(Type::class_name("SplObjectStorage"))),
                value: Box::new(Type::array(Type::keyword("int"), 1)),
            })
        );
    }

    #[test]
    fn generic_with_union_value() {
        assert_eq!(
            parse("ArrayObject<string, int|string>"),
            Some(Type::Generic {
                collection: Some("ArrayObject".into()),
                key: Some(Box::new(Type::keyword("string"))),
                value: Box::new(Type::Union(vec![
                    Type::keyword("int"),
                    Type::keyword("string")
                ])),
            })
        );
    }

    #[test]
    fn top_level_union_keeps_source_order() {
        assert_eq!(
            parse("string|int|null"),
            Some(Type::Union(vec![
                Type::keyword("string"),
                Type::keyword("int"),
                Type::keyword("null")
            ]))
        );
    }

    #[test]
    fn rejected_expressions() {
        for expr in [
            "foo[", "foo]", "1", "string<string>", "array<(string)>", "array<string",
            "arraystring>", "array()", "$that", "", "|int", "int|",
        ] {
            assert_eq!(parse(expr), None, "expression {expr:?}");
        }
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let mut expr = String::new();
        for _ in 0..100 {
            expr.push_str("array<");
        }
        expr.push_str("int");
        for _ in 0..100 {
            expr.push('>');
        }
        // Deeper than the bound: no match rather than a stack overflow.
        assert_eq!(parse(&expr), None);
    }
}

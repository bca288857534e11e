//! The type-expression AST.
//!
//! Produced by [`TypeExpressionParser`](crate::parser::TypeExpressionParser)
//! from strings like `int[]`, `(int|\Foo\Bar)[][]` or
//! `ArrayObject<string, int>`. Nodes are owned trees; children belong
//! exclusively to their parent.

use serde::Serialize;

/// A single parsed type.
///
/// Invariants maintained by the parser, never checked at runtime:
/// `Array.levels >= 1`, `Union` holds two or more members (a one-member
/// union collapses to that member and is never constructed).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Type {
    /// One of the reserved type keywords (`int`, `string`, `$this`, ...).
    Keyword(String),
    /// A class name, fully qualified or not, exactly as written
    /// (`\Foo\Bar`, `ArrayObject`).
    ClassName(String),
    /// `base[]`, `base[][]`, and so on; `levels` counts the bracket pairs.
    Array { base: Box<Type>, levels: usize },
    /// `array<V>`, `array<K, V>` or `Collection<K, V>`. A `collection` of
    /// `None` means the implicit `array` collection type.
    Generic {
        collection: Option<String>,
        key: Option<Box<Type>>,
        value: Box<Type>,
    },
    /// Two or more types joined by `|`, in source order.
    Union(Vec<Type>),
}

impl Type {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Type::Keyword(keyword.into())
    }

    pub fn class_name(name: impl Into<String>) -> Self {
        Type::ClassName(name.into())
    }

    pub fn array(base: Type, levels: usize) -> Self {
        Type::Array {
            base: Box::new(base),
            levels,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSONPath queries over `serde_json::Value`.
//!
//! Extraction is a pure function of a JSON value and a path expression that
//! returns every match in document order:
//!
//! ```
//! let body = serde_json::json!({"data": {"url": "https://img/1.png"}});
//! let matches = mintpic_jsonpath::query(&body, "$.data.url").unwrap();
//! assert_eq!(matches, vec![&serde_json::json!("https://img/1.png")]);
//! ```
//!
//! Supported syntax:
//! - `$` root (optional; `data.url` is read as `$.data.url`)
//! - `.name`, `['name']`, `["name"]` member access
//! - `[n]` array index, negative counts from the end
//! - `*`, `[*]` wildcard over members or elements
//! - `..name`, `..*`, `..[sel]` recursive descent
//! - `[start:end:step]` slices
//! - `[0,2]`, `['a','b']` unions
//!
//! Filter (`[?(...)]`) and script (`[(...)]`) expressions are rejected.

mod eval;
mod parser;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Errors produced while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPathError {
    #[error("path expression is empty")]
    Empty,

    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("{feature} are not supported (at position {position})")]
    Unsupported {
        position: usize,
        feature: &'static str,
    },
}

/// Picks children of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selector {
    Name(String),
    Wildcard,
    Index(i64),
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    Union(Vec<Selector>),
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Apply the selector to each current node.
    Child(Selector),
    /// Apply the selector to each current node and all of its descendants.
    Descendant(Selector),
}

/// A parsed path expression, reusable across many queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    source: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parses a path expression.
    pub fn parse(source: &str) -> Result<Self, JsonPathError> {
        let segments = parser::parse(source)?;
        Ok(Self {
            source: source.trim().to_string(),
            segments,
        })
    }

    /// The expression this path was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns every node matched by this path, in document order.
    pub fn query<'v>(&self, root: &'v Value) -> Vec<&'v Value> {
        eval::evaluate(&self.segments, root)
    }

    /// Returns the first node matched by this path, if any.
    ///
    /// "First" follows [`JsonPath::query`] order. A descendant segment
    /// visits nodes pre-order, so `$..cover` yields a match on the root
    /// object before any match nested deeper.
    pub fn first<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.query(root).into_iter().next()
    }
}

impl FromStr for JsonPath {
    type Err = JsonPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses `path` and evaluates it against `root` in one go.
pub fn query<'v>(root: &'v Value, path: &str) -> Result<Vec<&'v Value>, JsonPathError> {
    Ok(JsonPath::parse(path)?.query(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn store() -> Value {
        json!({
            "store": {
                "book": [
                    {"title": "Sayings", "price": 8.95, "cover": "https://img/a.png"},
                    {"title": "Sword", "price": 12.99, "cover": "https://img/b.png"},
                    {"title": "Moby", "price": 8.99}
                ],
                "bicycle": {"color": "red", "price": 19.95}
            },
            "cover": "https://img/root.png"
        })
    }

    #[test]
    fn sunset_example() {
        let body = json!({"data": {"url": "https://img/1.png"}});
        let matches = query(&body, "$.data.url").unwrap();
        assert_eq!(matches, vec![&json!("https://img/1.png")]);
    }

    #[test]
    fn missing_member_yields_no_matches() {
        let body = json!({"data": {}});
        assert!(query(&body, "$.data.url").unwrap().is_empty());
        assert!(query(&body, "$.data.url.deeper").unwrap().is_empty());
    }

    #[test]
    fn root_returns_whole_document() {
        let body = json!(["x"]);
        assert_eq!(query(&body, "$").unwrap(), vec![&body]);
    }

    #[test]
    fn index_and_negative_index() {
        let doc = store();
        let first = query(&doc, "$.store.book[0].title").unwrap();
        assert_eq!(first, vec![&json!("Sayings")]);
        let last = query(&doc, "$.store.book[-1].title").unwrap();
        assert_eq!(last, vec![&json!("Moby")]);
        assert!(query(&doc, "$.store.book[3]").unwrap().is_empty());
        assert!(query(&doc, "$.store.book[-4]").unwrap().is_empty());
    }

    #[test]
    fn wildcard_over_array_and_object() {
        let doc = store();
        let titles = query(&doc, "$.store.book[*].title").unwrap();
        assert_eq!(
            titles,
            vec![&json!("Sayings"), &json!("Sword"), &json!("Moby")]
        );
        let store_members = query(&doc, "$.store.*").unwrap();
        assert_eq!(store_members.len(), 2);
        assert!(store_members[0].is_array());
    }

    #[test]
    fn recursive_descent_in_document_order() {
        let doc = store();
        let covers = query(&doc, "$..cover").unwrap();
        assert_eq!(
            covers,
            vec![
                &json!("https://img/root.png"),
                &json!("https://img/a.png"),
                &json!("https://img/b.png"),
            ]
        );
        let prices = query(&doc, "$..price").unwrap();
        assert_eq!(prices.len(), 4);
    }

    #[test]
    fn recursive_descent_with_bracket() {
        let doc = json!({"a": [1, 2], "b": {"c": [3]}});
        let firsts = query(&doc, "$..[0]").unwrap();
        assert_eq!(firsts, vec![&json!(1), &json!(3)]);
    }

    #[test]
    fn slices() {
        let doc = json!([0, 1, 2, 3, 4, 5]);
        let got = |p: &str| -> Vec<i64> {
            query(&doc, p)
                .unwrap()
                .into_iter()
                .filter_map(Value::as_i64)
                .collect()
        };
        assert_eq!(got("$[1:3]"), vec![1, 2]);
        assert_eq!(got("$[:2]"), vec![0, 1]);
        assert_eq!(got("$[4:]"), vec![4, 5]);
        assert_eq!(got("$[-2:]"), vec![4, 5]);
        assert_eq!(got("$[::2]"), vec![0, 2, 4]);
        assert_eq!(got("$[::-1]"), vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(got("$[4:1:-2]"), vec![4, 2]);
        assert_eq!(got("$[0:100]"), vec![0, 1, 2, 3, 4, 5]);
        assert!(got("$[::0]").is_empty());
        assert!(got("$[3:1]").is_empty());
    }

    #[test]
    fn unions_keep_selector_order() {
        let doc = json!({"a": 1, "b": 2, "list": ["x", "y", "z"]});
        assert_eq!(
            query(&doc, "$['b','a']").unwrap(),
            vec![&json!(2), &json!(1)]
        );
        assert_eq!(
            query(&doc, "$.list[2,0]").unwrap(),
            vec![&json!("z"), &json!("x")]
        );
    }

    #[test]
    fn selectors_on_wrong_kind_match_nothing() {
        let doc = json!({"s": "text", "n": 3});
        assert!(query(&doc, "$.s[0]").unwrap().is_empty());
        assert!(query(&doc, "$.n.x").unwrap().is_empty());
        assert!(query(&doc, "$.s.*").unwrap().is_empty());
    }

    #[test]
    fn first_returns_first_match() {
        let doc = store();
        let path = JsonPath::parse("$.store..cover").unwrap();
        assert_eq!(path.first(&doc), Some(&json!("https://img/a.png")));
        let shallow_first = JsonPath::parse("$..cover").unwrap();
        assert_eq!(
            shallow_first.first(&doc),
            Some(&json!("https://img/root.png"))
        );
        let none = JsonPath::parse("$.nothing").unwrap();
        assert_eq!(none.first(&doc), None);
    }

    #[test]
    fn display_round_trips_source() {
        let path: JsonPath = " $.data.url ".parse().unwrap();
        assert_eq!(path.to_string(), "$.data.url");
        assert_eq!(path.as_str(), "$.data.url");
    }

    #[test]
    fn invalid_path_is_an_error() {
        let doc = json!({});
        assert!(query(&doc, "$[?(@.x)]").is_err());
        assert_eq!(query(&doc, "").unwrap_err(), JsonPathError::Empty);
    }

    proptest! {
        #[test]
        fn member_lookup_finds_inserted_value(key in "[a-zA-Z_][a-zA-Z0-9_]{0,12}", value in any::<i64>()) {
            let mut map = serde_json::Map::new();
            map.insert(key.clone(), json!(value));
            let doc = Value::Object(map);
            let expected = json!(value);

            let dotted = query(&doc, &format!("$.{key}")).unwrap();
            prop_assert_eq!(dotted, vec![&expected]);

            let bracketed = query(&doc, &format!("$['{key}']")).unwrap();
            prop_assert_eq!(bracketed, vec![&expected]);
        }
    }
}

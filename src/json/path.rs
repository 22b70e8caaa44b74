//! MySQL JSON path values.
//!
//! Only a coarse shape check is applied: a path must be non-empty and start
//! with the `$` root marker. The fluent builder methods always produce paths
//! in MySQL's syntax (`$.a`, `$."key with space"`, `$[0]`, `$[*]`, `$.*`,
//! `$**.a`, `$[last]`, `$[1 to 3]`).

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::core::{ExprError, Result};
use crate::expression::quote::quote_doubled;

lazy_static::lazy_static! {
    static ref PLAIN_MEMBER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Validated, immutable path into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPath(String);

impl JsonPath {
    pub const ROOT_MARKER: char = '$';

    /// Validating constructor.
    pub fn parse(path: &str) -> Result<Self> {
        let normalized = path.trim();
        if normalized.is_empty() {
            return Err(ExprError::InvalidPath(path.to_string(), "path is empty".into()));
        }
        if !normalized.starts_with(Self::ROOT_MARKER) {
            return Err(ExprError::InvalidPath(
                path.to_string(),
                format!("path must start with '{}'", Self::ROOT_MARKER),
            ));
        }
        Ok(Self(normalized.to_string()))
    }

    /// Builds a path from trusted input without validation.
    pub fn unchecked(path: impl Into<String>) -> Self {
        Self(path.into().trim().to_string())
    }

    pub fn root() -> Self {
        Self(Self::ROOT_MARKER.to_string())
    }

    /// `.name`, quoted when `name` is not a plain identifier.
    pub fn member(&self, name: &str) -> Self {
        self.append(&format!(".{}", member_key(name)))
    }

    /// `.*`
    pub fn any_member(&self) -> Self {
        self.append(".*")
    }

    /// `[index]`
    pub fn index(&self, index: usize) -> Self {
        self.append(&format!("[{}]", index))
    }

    /// `[last]`, or `[last-n]` for `offset > 0`.
    pub fn last(&self, offset: usize) -> Self {
        if offset == 0 {
            self.append("[last]")
        } else {
            self.append(&format!("[last-{}]", offset))
        }
    }

    /// `[from to to]`
    pub fn range(&self, from: usize, to: usize) -> Self {
        self.append(&format!("[{} to {}]", from, to))
    }

    /// `[*]`
    pub fn any_index(&self) -> Self {
        self.append("[*]")
    }

    /// `**.name`, matching `name` at any depth below the current position.
    pub fn descendant(&self, name: &str) -> Self {
        self.append(&format!("**.{}", member_key(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Whether the path may match more than one value.
    pub fn has_wildcard(&self) -> bool {
        self.0.contains('*')
    }

    /// Single-quoted SQL text with embedded quotes doubled.
    pub fn quoted(&self) -> String {
        quote_doubled(&self.0)
    }

    fn append(&self, suffix: &str) -> Self {
        let mut path = String::with_capacity(self.0.len() + suffix.len());
        path.push_str(&self.0);
        path.push_str(suffix);
        Self(path)
    }
}

fn member_key(name: &str) -> String {
    if PLAIN_MEMBER.is_match(name) {
        return name.to_string();
    }
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JsonPath {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for JsonPath {
    type Error = ExprError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for JsonPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_accepts_root_marker() {
        assert_eq!(JsonPath::parse("$").unwrap().as_str(), "$");
        assert_eq!(JsonPath::parse("  $.a.b  ").unwrap().as_str(), "$.a.b");
        assert!(JsonPath::parse("$").unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(matches!(JsonPath::parse(""), Err(ExprError::InvalidPath(..))));
        assert!(matches!(JsonPath::parse("   "), Err(ExprError::InvalidPath(..))));
        assert!(matches!(JsonPath::parse("a.b"), Err(ExprError::InvalidPath(..))));
        assert!(matches!(JsonPath::parse(".$"), Err(ExprError::InvalidPath(..))));
    }

    #[test]
    fn test_equality_by_normalized_text() {
        let a = JsonPath::parse("$.a").unwrap();
        let b = JsonPath::parse(" $.a\n").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert_eq!(JsonPath::unchecked(" $.a "), b);
    }

    #[test]
    fn test_builder() {
        let path = JsonPath::root()
            .member("orders")
            .index(0)
            .member("line items")
            .any_index()
            .member("sku");
        assert_eq!(path.as_str(), r#"$.orders[0]."line items"[*].sku"#);
        assert!(path.has_wildcard());

        assert_eq!(JsonPath::root().descendant("id").as_str(), "$**.id");
        assert_eq!(JsonPath::root().any_member().as_str(), "$.*");
        assert_eq!(JsonPath::root().last(0).as_str(), "$[last]");
        assert_eq!(JsonPath::root().last(2).as_str(), "$[last-2]");
        assert_eq!(JsonPath::root().range(1, 3).as_str(), "$[1 to 3]");
        assert_eq!(JsonPath::root().member(r#"say "hi""#).as_str(), r#"$."say \"hi\"""#);
    }

    #[test]
    fn test_quoted_doubles_single_quotes() {
        let path = JsonPath::root().member("o'clock");
        assert_eq!(path.quoted(), r#"'$."o''clock"'"#);
    }
}

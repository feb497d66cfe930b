//! Field paths addressing locations inside configuration documents
//!
//! Paths use the dotted/bracketed notation of the reference docs:
//!
//! - Dot-separated keys: `resources.builder.limits.cpu`
//! - Array indexing: `tlsCertificates[0].name`
//! - Schema notation, without indices: `tlsCertificates[].name`
//! - Quoted keys for names containing `.`, `[`, `]` or `"`:
//!   `metadata.labels["app.kubernetes.io/name"]`
//!
//! # Examples
//!
//! ```
//! use schema_core::path::{FieldPath, PathSegment};
//!
//! let path = FieldPath::parse("providers[0].namespace");
//! assert_eq!(path.segments(), &[
//!     PathSegment::Key("providers".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("namespace".to_string()),
//! ]);
//! assert_eq!(path.to_string(), "providers[0].namespace");
//! assert_eq!(path.schema_notation(), "providers[].namespace");
//! ```

use std::fmt::{self, Write as _};

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key in an object (e.g., "builder" in "resources.builder")
    Key(String),
    /// An index in an array (e.g., 0 in `tlsCertificates[0]`)
    Index(usize),
}

/// A location in a document, from the root down.
///
/// The empty path addresses the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path string into segments.
    ///
    /// Malformed indices (`items[x]`) are skipped rather than rejected, and
    /// `[]` is accepted so that schema notation parses to the same keys.
    /// `["..."]` is a quoted key, with `\"` and `\\` as escapes.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let mut current_key = String::new();
        let mut chars = path.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current_key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                    }
                }
                '[' => {
                    if !current_key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                    }
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        segments.push(PathSegment::Key(parse_quoted(&mut chars)));
                        continue;
                    }
                    let mut index_str = String::new();
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            break;
                        }
                        index_str.push(ch);
                    }
                    if let Ok(index) = index_str.trim().parse::<usize>() {
                        segments.push(PathSegment::Index(index));
                    }
                }
                _ => current_key.push(ch),
            }
        }

        if !current_key.is_empty() {
            segments.push(PathSegment::Key(current_key));
        }

        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the object key `key` below this path.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Path of array element `index` below this path.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// This path with the last segment removed, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Prefix `self` with `base`, e.g. to re-root a provider's paths under
    /// `providers[2]`.
    pub fn rebase(&self, base: &FieldPath) -> Self {
        let mut segments = base.0.clone();
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    /// Breadcrumb form with indices elided: `providers[].volumes[].name`.
    pub fn schema_notation(&self) -> String {
        render(&self.0, |_, f| f.write_str("[]"))
    }

    /// Look up the value this path addresses in `value`.
    ///
    /// ```
    /// use schema_core::FieldPath;
    /// use serde_json::json;
    ///
    /// let doc = json!({"tlsCertificates": [{"name": "a"}]});
    /// let path = FieldPath::parse("tlsCertificates[0].name");
    /// assert_eq!(path.lookup(&doc), Some(&json!("a")));
    /// assert_eq!(FieldPath::parse("missing").lookup(&doc), None);
    /// ```
    pub fn lookup<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.0.iter().try_fold(value, |current, segment| match segment {
            PathSegment::Key(key) => current.get(key),
            PathSegment::Index(idx) => current.get(*idx),
        })
    }
}

/// Read a quoted key up to its closing `"]`. The opening `["` is consumed.
fn parse_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut key = String::new();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    key.push(escaped);
                }
            }
            '"' => break,
            _ => key.push(ch),
        }
    }
    if chars.peek() == Some(&']') {
        chars.next();
    }
    key
}

fn needs_quotes(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"', '\\'])
}

fn render(
    segments: &[PathSegment],
    index: impl Fn(usize, &mut String) -> fmt::Result,
) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) if needs_quotes(key) => {
                out.push_str("[\"");
                for ch in key.chars() {
                    if matches!(ch, '"' | '\\') {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push_str("\"]");
            }
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(idx) => {
                // Writing into a String cannot fail.
                let _ = index(*idx, &mut out);
            }
        }
    }
    out
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0, |idx, out| write!(out, "[{idx}]")))
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

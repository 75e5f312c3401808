//! Segment paths into JSON documents
//!
//! A caller addresses a value with an ordered list of segments. The first
//! segment names the top-level document; the rest walk object properties
//! inside it:
//!
//! ```text
//! ["user", "CqtOILTDUg", "count"]
//!   │       └────────┬────────┘
//!   │            FieldPath  ──► path query "CqtOILTDUg.count"
//!   └─ document key
//! ```
//!
//! - [`FieldPath`]: the in-document part; renders to a path query
//! - [`DocPath`]: document key plus field path
//!
//! # Path Query Syntax
//!
//! | Field segments | Query |
//! |----------------|-------|
//! | (none) | `.` (document root) |
//! | `["lang"]` | `lang` |
//! | `["a", "b", "c"]` | `a.b.c` |
//!
//! Segments are joined without escaping, so a segment may not itself
//! contain [`SEPARATOR`]. [`FieldPath::validate`] rejects such paths.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator placed between field segments in a path query
pub const SEPARATOR: char = '.';

/// Path query addressing the document root
pub const ROOT_QUERY: &str = ".";

/// Maximum path length in field segments (256 segments)
pub const MAX_PATH_LENGTH: usize = 256;

// =============================================================================
// FieldPath
// =============================================================================

/// A path of property names inside one document
///
/// # Examples
///
/// ```
/// use deepbase_core::FieldPath;
///
/// let root = FieldPath::root();
/// assert_eq!(root.to_query(), ".");
///
/// let nested = FieldPath::root().key("a").key("b");
/// assert_eq!(nested.to_query(), "a.b");
/// assert_eq!(nested.parent(), Some(FieldPath::root().key("a")));
///
/// let parsed: FieldPath = "a.b".parse().unwrap();
/// assert_eq!(parsed, nested);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        FieldPath {
            segments: Vec::new(),
        }
    }

    /// Create a path from a sequence of segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path (empty)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(key.into());
        self
    }

    /// Push a segment (mutating)
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(key.into());
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<FieldPath> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    /// Get the last segment (None if root)
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Check if this path is an ancestor of another (or equal)
    pub fn is_ancestor_of(&self, other: &FieldPath) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }

    /// Check segment rules
    ///
    /// Rejects empty segments, segments containing [`SEPARATOR`], and paths
    /// longer than [`MAX_PATH_LENGTH`].
    pub fn validate(&self) -> Result<()> {
        if self.segments.len() > MAX_PATH_LENGTH {
            return Err(Error::InvalidPath(format!(
                "path length {} exceeds maximum of {} segments",
                self.segments.len(),
                MAX_PATH_LENGTH
            )));
        }
        for (pos, seg) in self.segments.iter().enumerate() {
            validate_segment(seg, pos)?;
        }
        Ok(())
    }

    /// Render the path query for the store
    ///
    /// The root path renders as [`ROOT_QUERY`].
    pub fn to_query(&self) -> String {
        if self.segments.is_empty() {
            ROOT_QUERY.to_string()
        } else {
            self.segments.join(".")
        }
    }
}

fn validate_segment(segment: &str, position: usize) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::InvalidPath(format!(
            "empty segment at position {}",
            position
        )));
    }
    if segment.contains(SEPARATOR) {
        return Err(Error::InvalidPath(format!(
            "segment '{}' at position {} contains '{}'",
            segment, position, SEPARATOR
        )));
    }
    Ok(())
}

impl FromStr for FieldPath {
    type Err = Error;

    /// Parse a path query back into segments
    ///
    /// `""` and `"."` both parse as the root path.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == ROOT_QUERY {
            return Ok(FieldPath::root());
        }
        let path = FieldPath::from_segments(s.split(SEPARATOR));
        path.validate()?;
        Ok(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

// =============================================================================
// DocPath
// =============================================================================

/// Document key plus a field path
///
/// This is the typed form of a caller's segment list: the first segment is
/// the document key, the remaining ones form the [`FieldPath`].
/// Build one with [`DocPath::new`] and [`DocPath::key`], or with the
/// [`path!`](crate::path!) macro.
///
/// ```
/// use deepbase_core::{path, DocPath};
///
/// let p = path!["user", "CqtOILTDUg", "count"];
/// assert_eq!(p.doc(), "user");
/// assert_eq!(p.field().to_query(), "CqtOILTDUg.count");
/// assert_eq!(p, DocPath::new("user").key("CqtOILTDUg").key("count"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocPath {
    doc: String,
    field: FieldPath,
}

impl DocPath {
    /// Path to the root of document `doc`
    pub fn new(doc: impl Into<String>) -> Self {
        DocPath {
            doc: doc.into(),
            field: FieldPath::root(),
        }
    }

    /// Assemble from a document key and a field path
    pub fn from_parts(doc: impl Into<String>, field: FieldPath) -> Self {
        DocPath {
            doc: doc.into(),
            field,
        }
    }

    /// Build from a full segment list; `None` when the list is empty
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = segments.into_iter();
        let doc = iter.next()?;
        Some(DocPath {
            doc: doc.into(),
            field: FieldPath::from_segments(iter),
        })
    }

    /// Append a field segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.field.push_key(key);
        self
    }

    /// Document key (first segment)
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Field path inside the document
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    /// Check if this addresses a whole document
    pub fn is_document(&self) -> bool {
        self.field.is_root()
    }

    /// Full segment list: document key followed by field segments
    pub fn segments(&self) -> Vec<String> {
        std::iter::once(self.doc.clone())
            .chain(self.field.segments().iter().cloned())
            .collect()
    }

    /// Last segment of the full list
    pub fn last_segment(&self) -> &str {
        self.field.last_segment().unwrap_or(&self.doc)
    }

    /// Check the document key and field segments
    pub fn validate(&self) -> Result<()> {
        if self.doc.is_empty() {
            return Err(Error::InvalidPath("empty document key".to_string()));
        }
        self.field.validate()
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_root() {
            write!(f, "{}", self.doc)
        } else {
            write!(f, "{}.{}", self.doc, self.field)
        }
    }
}

impl From<&str> for DocPath {
    fn from(doc: &str) -> Self {
        DocPath::new(doc)
    }
}

impl From<String> for DocPath {
    fn from(doc: String) -> Self {
        DocPath::new(doc)
    }
}

/// Build a [`DocPath`] from a segment list
///
/// The first expression is the document key; each following expression is a
/// field segment. Any `Into<String>` works.
///
/// ```
/// use deepbase_core::path;
///
/// let id = String::from("MXOlTBSmEf");
/// let p = path!["user", id.as_str(), "name"];
/// assert_eq!(p.segments(), vec!["user", "MXOlTBSmEf", "name"]);
/// ```
#[macro_export]
macro_rules! path {
    ($doc:expr $(, $seg:expr)* $(,)?) => {
        $crate::path::DocPath::new($doc)$(.key($seg))*
    };
}

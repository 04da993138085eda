//! Attribute paths for addressing within flattened state
//!
//! Provides [`AttributePath`], a typed view of a dotted attribute key such as
//! `extended_s3_configuration.0.processing_configuration.#`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Marker segment for the element count of a repeated block
pub const COUNT_SEGMENT: &str = "#";

/// One segment of an attribute key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Field name (`role_arn`, `processors`, map keys)
    Name(String),

    /// Position in a repeated block, or a set element hash
    Index(u64),

    /// Element count of the enclosing block (`#`)
    Count,
}

impl Segment {
    /// Classify a raw segment
    ///
    /// Digits are only treated as an index when they render back to the
    /// same text, so `007` stays a name and keys survive byte-for-byte.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == COUNT_SEGMENT {
            return Self::Count;
        }
        match raw.parse::<u64>() {
            Ok(index) if index.to_string() == raw => Self::Index(index),
            _ => Self::Name(raw.to_string()),
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
            Self::Count => f.write_str(COUNT_SEGMENT),
        }
    }
}

/// Path to an attribute inside a flattened bag
///
/// # Examples
/// - `["role_arn"]` → `role_arn`
/// - `["s3_configuration", 0, "bucket_arn"]` → `s3_configuration.0.bucket_arn`
/// - `["s3_configuration", #]` → `s3_configuration.#`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributePath(Vec<Segment>);

impl AttributePath {
    /// Create path from a single field name
    #[inline]
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![Segment::Name(name.into())])
    }

    /// Empty path (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, parent)| Self(parent.to_vec()))
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Append a field name, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.with_segment(Segment::Name(name.into()))
    }

    /// Append a positional index, returning new path
    #[inline]
    #[must_use]
    pub fn index(&self, index: u64) -> Self {
        self.with_segment(Segment::Index(index))
    }

    /// Path of the count key for the block rooted here (`<self>.#`)
    #[inline]
    #[must_use]
    pub fn count(&self) -> Self {
        self.with_segment(Segment::Count)
    }

    fn with_segment(&self, segment: Segment) -> Self {
        let mut new = self.clone();
        new.0.push(segment);
        new
    }

    /// Check if a raw key lies at or below this path
    ///
    /// Matching is bounded by segments: `s3_configuration` covers
    /// `s3_configuration.0.role_arn` but not `s3_configuration_backup.#`.
    #[must_use]
    pub fn covers_key(&self, key: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let prefix = self.to_string();
        match key.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }

    /// Re-key a raw key from this namespace onto another
    ///
    /// Only the leading occurrence is replaced; the remainder of the key is
    /// kept verbatim. Returns `None` if the key is outside this namespace.
    #[must_use]
    pub fn rebase_key(&self, key: &str, onto: &Self) -> Option<String> {
        if !self.covers_key(key) {
            return None;
        }
        let rest = &key[self.to_string().len()..];
        if onto.is_empty() {
            return Some(rest.trim_start_matches('.').to_string());
        }
        Some(format!("{onto}{rest}"))
    }
}

impl Display for AttributePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for AttributePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment(s.to_string()))
                } else {
                    Ok(Segment::parse(seg))
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

/// Errors related to attribute paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty segment in key
    #[error("attribute key '{0}' contains an empty segment")]
    EmptySegment(String),
}

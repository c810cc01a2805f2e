//! Expansion of configured character ranges into a code point set.
//!
//! # Example
//!
//! ```
//! use atlasforge_core::ranges::{expand_ranges, CodePointRange};
//!
//! let ranges = [["a", "c"], ["b", "d"]];
//! let set = expand_ranges(ranges.iter().map(|[lo, hi]| (*lo, *hi))).unwrap();
//! assert_eq!(set.to_vec(), vec!['a', 'b', 'c', 'd']);
//!
//! let range = CodePointRange::parse("0", "9").unwrap();
//! assert_eq!(range.len(), 10);
//! ```

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::error::{AtlasError, AtlasResult};

/// An inclusive range of code points with single-character endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodePointRange {
    pub low: char,
    pub high: char,
}

impl CodePointRange {
    /// Create a range from two code points.
    pub const fn new(low: char, high: char) -> Self {
        Self { low, high }
    }

    /// Parse a range from its configured string endpoints.
    ///
    /// Each endpoint must hold exactly one code point.
    pub fn parse(low: &str, high: &str) -> AtlasResult<Self> {
        Ok(Self {
            low: single_code_point(low, high, low)?,
            high: single_code_point(low, high, high)?,
        })
    }

    /// Number of code points in the range. A reversed range is empty.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the range contains no code points.
    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    /// Iterate the range in ascending order.
    ///
    /// `char` ranges skip the surrogate block on their own.
    pub fn iter(&self) -> RangeInclusive<char> {
        self.low..=self.high
    }
}

fn single_code_point(low: &str, high: &str, endpoint: &str) -> AtlasResult<char> {
    let mut chars = endpoint.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Err(AtlasError::invalid_range(low, high, "endpoint is empty")),
        (Some(_), Some(_)) => Err(AtlasError::invalid_range(
            low,
            high,
            "endpoint holds more than one code point",
        )),
    }
}

/// A deduplicated set of code points with a canonical ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointSet {
    chars: BTreeSet<char>,
}

impl CodePointSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single code point.
    pub fn insert(&mut self, ch: char) -> bool {
        self.chars.insert(ch)
    }

    /// Add every code point of `range`.
    pub fn insert_range(&mut self, range: CodePointRange) {
        self.chars.extend(range.iter());
    }

    /// Whether `ch` is in the set.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Number of code points.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Code points in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Code points in ascending order, collected.
    pub fn to_vec(&self) -> Vec<char> {
        self.iter().collect()
    }
}

impl FromIterator<char> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

/// Expand configured `(low, high)` endpoint pairs into a code point set.
///
/// Fails on the first pair whose endpoints are not single code points.
/// Reversed pairs (`low > high`) contribute nothing.
pub fn expand_ranges<'a, I>(ranges: I) -> AtlasResult<CodePointSet>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut set = CodePointSet::new();
    for (low, high) in ranges {
        let range = CodePointRange::parse(low, high)?;
        if range.is_empty() {
            tracing::debug!(
                target: "atlasforge_core::ranges",
                low = %range.low.escape_unicode(),
                high = %range.high.escape_unicode(),
                "reversed range contributes no code points"
            );
        }
        set.insert_range(range);
    }
    Ok(set)
}

//! Core coordinate types: counting windows and alignment spans.

use std::fmt;

/// A counting window on a target sequence.
/// Uses 0-based, half-open coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Window {
    pub target: String,
    pub start: u64,
    pub end: u64,
}

impl Window {
    /// Create a new window.
    #[inline]
    pub fn new(target: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            target: target.into(),
            start,
            end,
        }
    }

    /// Returns the length of the window.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the window covers no bases.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if a 0-based position falls inside the window.
    #[inline]
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if a span shares at least one base with this window.
    #[inline]
    pub fn overlaps(&self, span: &AlignmentSpan) -> bool {
        span.start < self.end && self.start < span.end
    }

    /// 1-based inclusive start, as printed.
    #[inline]
    pub fn one_based_start(&self) -> u64 {
        self.start + 1
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.target, self.one_based_start(), self.end)
    }
}

/// The reference span of one alignment record.
///
/// `end` is the clip-aware end: soft and hard clips never contribute,
/// only reference-consuming CIGAR operations do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlignmentSpan {
    pub start: u64,
    pub end: u64,
}

impl AlignmentSpan {
    /// Create a span. A record that consumes no reference bases is
    /// treated as covering its start base only.
    #[inline]
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.max(start + 1),
        }
    }

    /// Number of reference bases covered.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Floor midpoint of the span.
    #[inline]
    pub fn midpoint(&self) -> u64 {
        self.start + (self.end - self.start) / 2
    }
}

impl fmt::Display for AlignmentSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

//! In-memory alignment store.
//!
//! Spans are kept per target, sorted by start. Queries binary search using
//! the longest span seen on the target, so they never scan records that
//! cannot reach the window.

use std::slice;

use super::AlignmentStore;
use crate::error::Result;
use crate::genome::Targets;
use crate::interval::{AlignmentSpan, Window};

/// Alignment spans held in memory, indexed by target.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    targets: Targets,
    spans_by_target: Vec<Vec<AlignmentSpan>>,
    max_len_by_target: Vec<u64>,
}

impl MemoryStore {
    /// Create an empty store over the given targets.
    pub fn new(targets: Targets) -> Self {
        let n = targets.len();
        Self {
            targets,
            spans_by_target: vec![Vec::new(); n],
            max_len_by_target: vec![0; n],
        }
    }

    /// Add a record span on a named target, keeping start order.
    pub fn insert(&mut self, target: &str, span: AlignmentSpan) -> Result<()> {
        let id = self.targets.require_id(target)?;
        let spans = &mut self.spans_by_target[id];
        let pos = spans.partition_point(|s| *s <= span);
        spans.insert(pos, span);
        let max_len = &mut self.max_len_by_target[id];
        *max_len = (*max_len).max(span.len());
        Ok(())
    }

    /// Build a store from `(target, start, end)` triples.
    pub fn from_records<'a, I>(targets: Targets, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u64, u64)>,
    {
        let mut store = Self::new(targets);
        for (target, start, end) in records {
            store.insert(target, AlignmentSpan::new(start, end))?;
        }
        Ok(store)
    }

    /// Total number of records held.
    pub fn len(&self) -> usize {
        self.spans_by_target.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans_by_target.iter().all(Vec::is_empty)
    }
}

/// Spans overlapping one window.
pub struct MemorySpans<'a> {
    iter: slice::Iter<'a, AlignmentSpan>,
    window: Window,
}

impl Iterator for MemorySpans<'_> {
    type Item = Result<AlignmentSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        let window = &self.window;
        self.iter.find(|s| window.overlaps(s)).copied().map(Ok)
    }
}

impl AlignmentStore for MemoryStore {
    type Spans<'a> = MemorySpans<'a>;

    fn targets(&self) -> &Targets {
        &self.targets
    }

    fn query(&mut self, window: &Window) -> Result<MemorySpans<'_>> {
        let id = self.targets.require_id(&window.target)?;
        let spans = &self.spans_by_target[id];
        let max_len = self.max_len_by_target[id];

        // A span starting before `window.start - max_len` cannot reach the window
        let lo = spans.partition_point(|s| s.start.saturating_add(max_len) <= window.start);
        let hi = spans.partition_point(|s| s.start < window.end);

        Ok(MemorySpans {
            iter: spans[lo..hi.max(lo)].iter(),
            window: window.clone(),
        })
    }
}

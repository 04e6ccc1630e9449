//! Sources of alignment records.
//!
//! An [`AlignmentStore`] knows the target sequences of a dataset and can
//! return the records overlapping a window. Overlap is half-open: a record
//! `[s, e)` is returned for window `[ws, we)` iff `s < we && e > ws`, so
//! records that merely touch a window boundary are not returned.

pub mod bam;
pub mod memory;

pub use bam::{htslib_version, BamStore};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::genome::Targets;
use crate::interval::{AlignmentSpan, Window};

/// Indexed access to the alignment records of one dataset.
pub trait AlignmentStore {
    /// Spans of the records overlapping a window, in coordinate order.
    type Spans<'a>: Iterator<Item = Result<AlignmentSpan>>
    where
        Self: 'a;

    /// Target sequences in declared order.
    fn targets(&self) -> &Targets;

    /// Query the records overlapping `window`.
    fn query(&mut self, window: &Window) -> Result<Self::Spans<'_>>;
}

//! Fixed-size window generation.
//!
//! Windows tile a region exactly: consecutive windows are contiguous and
//! non-overlapping, every window but the last has `window_size` bases,
//! and the last is clipped to the region end.

use std::iter::FusedIterator;
use std::num::NonZeroU64;

use crate::interval::Window;
use crate::region::Region;

/// Lazy sequence of windows over one region.
#[derive(Debug, Clone)]
pub struct Windows {
    target: String,
    cursor: u64,
    end: u64,
    size: u64,
}

/// Generate the windows tiling `region`.
///
/// An empty region yields no windows. Calling this again with the same
/// arguments yields the same sequence.
pub fn generate(region: &Region, window_size: NonZeroU64) -> Windows {
    Windows {
        target: region.target.name.clone(),
        cursor: region.start,
        end: region.end,
        size: window_size.get(),
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.cursor >= self.end {
            return None;
        }
        let end = self.cursor.saturating_add(self.size).min(self.end);
        let window = Window::new(self.target.as_str(), self.cursor, end);
        self.cursor = end;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.cursor).div_ceil(self.size);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}

impl FusedIterator for Windows {}

//! Run configuration for window counting.
//!
//! The configuration is fixed before processing starts and passed by
//! reference to everything that needs it; nothing reads global state.

use std::num::NonZeroU64;

use crate::error::{Result, WindowError};
use crate::matching::MatchMode;

/// Immutable settings for one counting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountConfig {
    /// Window size in bases
    pub window_size: NonZeroU64,
    /// Record-to-window matching rule
    pub mode: MatchMode,
    /// Report windows with a zero count
    pub print_empty: bool,
}

impl CountConfig {
    /// Overlap matching, empty windows omitted.
    pub fn new(window_size: NonZeroU64) -> Self {
        Self {
            window_size,
            mode: MatchMode::Overlap,
            print_empty: false,
        }
    }

    /// Build from an unchecked window size.
    ///
    /// # Example
    ///
    /// ```
    /// use bamwindow::config::CountConfig;
    ///
    /// assert!(CountConfig::from_raw(0).is_err());
    /// assert_eq!(CountConfig::from_raw(500).unwrap().window_size.get(), 500);
    /// ```
    pub fn from_raw(window_size: u64) -> Result<Self> {
        NonZeroU64::new(window_size)
            .map(Self::new)
            .ok_or_else(|| WindowError::InvalidWindowSize(window_size.to_string()))
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_print_empty(mut self, print_empty: bool) -> Self {
        self.print_empty = print_empty;
        self
    }
}

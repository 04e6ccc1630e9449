//! Rules attributing alignment records to windows.

use std::fmt;
use std::str::FromStr;

use crate::error::WindowError;
use crate::interval::{AlignmentSpan, Window};

/// How records returned by a window's range query are matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Every record overlapping the window counts. A record spanning
    /// several windows is counted in each of them.
    #[default]
    Overlap,
    /// Only records whose leftmost aligned base lies in the window count.
    StartBased,
    /// Only records whose clip-aware midpoint lies in the window count.
    Midpoint,
}

impl MatchMode {
    /// Numeric code used on the command line (`-m0`, `-m1`, `-m2`).
    pub fn code(self) -> u8 {
        match self {
            MatchMode::Overlap => 0,
            MatchMode::StartBased => 1,
            MatchMode::Midpoint => 2,
        }
    }

    /// Decide whether `span`, returned by the query for `window`, counts.
    #[inline]
    pub fn matches(self, window: &Window, span: &AlignmentSpan) -> bool {
        match self {
            MatchMode::Overlap => true,
            MatchMode::StartBased => window.contains(span.start),
            MatchMode::Midpoint => window.contains(span.midpoint()),
        }
    }
}

/// Free-function form of [`MatchMode::matches`].
#[inline]
pub fn matches(mode: MatchMode, window: &Window, span: &AlignmentSpan) -> bool {
    mode.matches(window, span)
}

impl TryFrom<u8> for MatchMode {
    type Error = WindowError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MatchMode::Overlap),
            1 => Ok(MatchMode::StartBased),
            2 => Ok(MatchMode::Midpoint),
            other => Err(WindowError::InvalidMode(other.to_string())),
        }
    }
}

impl FromStr for MatchMode {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "overlap" => Ok(MatchMode::Overlap),
            "1" | "start" => Ok(MatchMode::StartBased),
            "2" | "midpoint" => Ok(MatchMode::Midpoint),
            _ => Err(WindowError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Overlap => write!(f, "overlap"),
            MatchMode::StartBased => write!(f, "start"),
            MatchMode::Midpoint => write!(f, "midpoint"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> [Window; 4] {
        [
            Window::new("chr1", 0, 300),
            Window::new("chr1", 300, 600),
            Window::new("chr1", 600, 900),
            Window::new("chr1", 900, 1000),
        ]
    }

    fn hits(mode: MatchMode, span: AlignmentSpan) -> Vec<bool> {
        windows()
            .iter()
            .map(|w| w.overlaps(&span) && matches(mode, w, &span))
            .collect()
    }

    #[test]
    fn test_overlap_counts_every_overlapping_window() {
        let span = AlignmentSpan::new(250, 350);
        assert_eq!(hits(MatchMode::Overlap, span), [true, true, false, false]);
    }

    #[test]
    fn test_start_counts_leftmost_base_window() {
        let span = AlignmentSpan::new(250, 350);
        assert_eq!(hits(MatchMode::StartBased, span), [true, false, false, false]);
    }

    #[test]
    fn test_midpoint_is_left_inclusive() {
        // 250 + (350 - 250) / 2 = 300, first base of the second window
        let span = AlignmentSpan::new(250, 350);
        assert_eq!(hits(MatchMode::Midpoint, span), [false, true, false, false]);
    }

    #[test]
    fn test_start_rejects_record_starting_before_window() {
        let w = Window::new("chr1", 300, 600);
        assert!(!MatchMode::StartBased.matches(&w, &AlignmentSpan::new(299, 400)));
        assert!(MatchMode::StartBased.matches(&w, &AlignmentSpan::new(300, 400)));
        assert!(MatchMode::StartBased.matches(&w, &AlignmentSpan::new(599, 700)));
    }

    #[test]
    fn test_midpoint_rejects_midpoint_past_window() {
        let w = Window::new("chr1", 0, 300);
        // Overlaps the window but its midpoint (325) does not
        assert!(!MatchMode::Midpoint.matches(&w, &AlignmentSpan::new(250, 400)));
    }

    #[test]
    fn test_mode_codes_round_trip() {
        for code in 0..3u8 {
            let mode = MatchMode::try_from(code).unwrap();
            assert_eq!(mode.code(), code);
            assert_eq!(code.to_string().parse::<MatchMode>().unwrap(), mode);
        }
        assert!(MatchMode::try_from(3).is_err());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("midpoint".parse::<MatchMode>().unwrap(), MatchMode::Midpoint);
        assert_eq!("Start".parse::<MatchMode>().unwrap(), MatchMode::StartBased);
        assert!("-1".parse::<MatchMode>().is_err());
        assert!("".parse::<MatchMode>().is_err());
        assert_eq!(MatchMode::default(), MatchMode::Overlap);
    }
}

//! Regions to count over, and parsing of user-supplied region strings.
//!
//! Region strings are 1-based and inclusive (`chr1:101-200` covers bases
//! 101 through 200); regions are stored 0-based, half-open (`[100, 200)`).
//!
//! Accepted forms:
//! - `chr1` - the whole target
//! - `chr1:101` or `chr1:101-` - from base 101 to the end of the target
//! - `chr1:101-200` - bases 101 to 200
//!
//! Numbers may carry `,` thousands separators (`chr1:1,000-2,000`).
//! Target names containing `:` are accepted when the whole string names a target.

use std::num::NonZeroU64;

use crate::error::{Result, WindowError};
use crate::genome::{TargetSequence, Targets};
use crate::windows::{generate, Windows};

/// A 0-based, half-open range on one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub target: TargetSequence,
    pub start: u64,
    pub end: u64,
}

impl Region {
    /// The whole of a target. Empty when the target has length 0.
    pub fn whole(target: TargetSequence) -> Self {
        let end = target.length;
        Self {
            target,
            start: 0,
            end,
        }
    }

    /// Parse a 1-based inclusive region string against the dataset's targets.
    pub fn parse(text: &str, targets: &Targets) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WindowError::region(text, "empty region"));
        }

        if let Some(target) = targets.get(text) {
            return Self::checked(text, target.clone(), 1, None);
        }

        let (name, range) = match text.rsplit_once(':') {
            Some(parts) => parts,
            None => return Err(WindowError::UnknownTarget(text.to_string())),
        };
        let target = targets.require(name)?.clone();

        let (start, end) = match range.split_once('-') {
            Some((start, "")) => (parse_coord(text, start)?, None),
            Some((start, end)) => (parse_coord(text, start)?, Some(parse_coord(text, end)?)),
            None => (parse_coord(text, range)?, None),
        };

        Self::checked(text, target, start, end)
    }

    /// Validate 1-based inclusive bounds and convert to 0-based half-open.
    fn checked(text: &str, target: TargetSequence, start: u64, end: Option<u64>) -> Result<Self> {
        if start == 0 {
            return Err(WindowError::region(text, "start must be >= 1"));
        }
        if start > target.length {
            return Err(WindowError::region(
                text,
                format!(
                    "start {} is beyond the end of {} (length {})",
                    start, target.name, target.length
                ),
            ));
        }
        let end = end.unwrap_or(target.length);
        if end < start {
            return Err(WindowError::region(text, "end is before start"));
        }
        if end > target.length {
            return Err(WindowError::region(
                text,
                format!(
                    "end {} is beyond the end of {} (length {})",
                    end, target.name, target.length
                ),
            ));
        }

        Ok(Self {
            target,
            start: start - 1,
            end,
        })
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Windows tiling this region.
    pub fn windows(&self, window_size: NonZeroU64) -> Windows {
        generate(self, window_size)
    }
}

fn parse_coord(text: &str, field: &str) -> Result<u64> {
    let digits: String = field.chars().filter(|&c| c != ',').collect();
    if digits.is_empty() {
        return Err(WindowError::region(text, "missing coordinate"));
    }
    digits
        .parse()
        .map_err(|_| WindowError::region(text, format!("invalid coordinate: {}", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Targets {
        Targets::from_pairs([("chr1", 1000), ("chr2", 500), ("HLA-A*01:01", 3000)])
    }

    #[test]
    fn test_parse_converts_to_half_open() {
        let region = Region::parse("chr1:101-200", &targets()).unwrap();
        assert_eq!(region.target.name, "chr1");
        assert_eq!(region.start, 100);
        assert_eq!(region.end, 200);
        assert_eq!(region.len(), 100);
    }

    #[test]
    fn test_parse_whole_target() {
        let region = Region::parse("chr2", &targets()).unwrap();
        assert_eq!((region.start, region.end), (0, 500));
    }

    #[test]
    fn test_parse_open_ended() {
        let t = targets();
        let a = Region::parse("chr1:901", &t).unwrap();
        let b = Region::parse("chr1:901-", &t).unwrap();
        assert_eq!((a.start, a.end), (900, 1000));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_thousands_separators() {
        let t = Targets::from_pairs([("chr1", 10_000)]);
        let region = Region::parse("chr1:1,001-2,000", &t).unwrap();
        assert_eq!((region.start, region.end), (1000, 2000));
    }

    #[test]
    fn test_parse_name_with_colon() {
        let region = Region::parse("HLA-A*01:01", &targets()).unwrap();
        assert_eq!(region.target.name, "HLA-A*01:01");
        assert_eq!(region.end, 3000);

        let sub = Region::parse("HLA-A*01:01:11-20", &targets()).unwrap();
        assert_eq!((sub.start, sub.end), (10, 20));
    }

    #[test]
    fn test_single_base_region() {
        let region = Region::parse("chr1:1000-1000", &targets()).unwrap();
        assert_eq!((region.start, region.end), (999, 1000));
    }

    #[test]
    fn test_unknown_target() {
        assert!(matches!(
            Region::parse("chrX:1-10", &targets()),
            Err(WindowError::UnknownTarget(_))
        ));
        assert!(matches!(
            Region::parse("chrX", &targets()),
            Err(WindowError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_is_not_clamped() {
        let t = targets();
        assert!(matches!(
            Region::parse("chr1:1-1001", &t),
            Err(WindowError::Region { .. })
        ));
        assert!(matches!(
            Region::parse("chr1:1001-1002", &t),
            Err(WindowError::Region { .. })
        ));
    }

    #[test]
    fn test_malformed_regions() {
        let t = targets();
        for text in ["", "chr1:", "chr1:0-10", "chr1:abc-200", "chr1:200-100", "chr1:-100"] {
            assert!(Region::parse(text, &t).is_err(), "expected error for {:?}", text);
        }
    }

    #[test]
    fn test_whole_zero_length_target_is_empty() {
        let region = Region::whole(TargetSequence::new("empty", 0));
        assert!(region.is_empty());
    }
}

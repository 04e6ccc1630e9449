//! bamwindow: count alignment records in fixed-size genomic windows.
//!
//! Each target sequence of an indexed BAM/CRAM file (or a single region of
//! one) is split into consecutive windows of a fixed size, the last one
//! clipped to the end. For every window the records overlapping it are
//! fetched from the index and attributed to the window by one of three
//! rules (overlap, read start, read midpoint), and one count per window is
//! reported.
//!
//! # Example
//!
//! ```rust
//! use bamwindow::prelude::*;
//!
//! let targets = Targets::from_pairs([("chr1", 1000)]);
//! let mut store = MemoryStore::from_records(targets, [("chr1", 250, 350)]).unwrap();
//!
//! let config = CountConfig::from_raw(300).unwrap().with_mode(MatchMode::Midpoint);
//! let mut out = Vec::new();
//! WindowCountCommand::new(config).run(&mut store, None, &mut out).unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "chr1\t301\t600\t1\n");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod genome;
pub mod interval;
pub mod matching;
pub mod output;
pub mod region;
pub mod store;
pub mod windows;

// Re-export commonly used types
pub use commands::{CountStats, WindowCountCommand};
pub use config::CountConfig;
pub use error::{Result, WindowError};
pub use genome::{TargetSequence, Targets};
pub use interval::{AlignmentSpan, Window};
pub use matching::MatchMode;
pub use output::WindowResult;
pub use region::Region;
pub use store::{AlignmentStore, BamStore, MemoryStore};

/// Program name used in version output.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{CountStats, WindowCountCommand};
    pub use crate::config::CountConfig;
    pub use crate::genome::{TargetSequence, Targets};
    pub use crate::interval::{AlignmentSpan, Window};
    pub use crate::matching::MatchMode;
    pub use crate::region::Region;
    pub use crate::store::{AlignmentStore, BamStore, MemoryStore};
}

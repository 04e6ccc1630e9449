//! Indexed BAM/CRAM access through htslib.

use std::ffi::CStr;
use std::path::Path;

use rust_htslib::bam::ext::BamRecordExtensions;
use rust_htslib::bam::{self, Read};
use rust_htslib::errors::Error as HtsError;

use super::AlignmentStore;
use crate::error::{Result, WindowError};
use crate::genome::Targets;
use crate::interval::{AlignmentSpan, Window};

/// Version string of the linked htslib.
pub fn htslib_version() -> String {
    // SAFETY: hts_version returns a pointer to a static NUL-terminated string.
    let version = unsafe { CStr::from_ptr(rust_htslib::htslib::hts_version()) };
    version.to_string_lossy().into_owned()
}

/// An open, indexed alignment file.
///
/// The file handle, header and index are released when the store is dropped.
pub struct BamStore {
    reader: bam::IndexedReader,
    targets: Targets,
    record: bam::Record,
}

impl BamStore {
    /// Open an alignment file together with its index (`.bai`, `.csi` or `.crai`).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // IndexedReader does not check the header read, so read it once here
        let targets = {
            let reader = bam::Reader::from_path(path).map_err(|e| open_error(path, e))?;
            read_targets(path, reader.header())?
        };

        let reader = bam::IndexedReader::from_path(path).map_err(|e| open_error(path, e))?;
        log::info!(
            "Opened {} ({} target sequences)",
            path.display(),
            targets.len()
        );

        Ok(Self {
            reader,
            targets,
            record: bam::Record::new(),
        })
    }
}

fn open_error(path: &Path, err: HtsError) -> WindowError {
    let path = path.to_path_buf();
    match err {
        HtsError::BamOpen { .. } => WindowError::Header {
            path,
            message: "header is missing or malformed".to_string(),
        },
        HtsError::BamInvalidIndex { .. } => WindowError::Index { path },
        other => WindowError::Open {
            path,
            message: other.to_string(),
        },
    }
}

fn read_targets(path: &Path, header: &bam::HeaderView) -> Result<Targets> {
    let mut targets = Targets::new();
    for tid in 0..header.target_count() {
        let name = String::from_utf8_lossy(header.tid2name(tid)).into_owned();
        let length = header.target_len(tid).ok_or_else(|| WindowError::Header {
            path: path.to_path_buf(),
            message: format!("missing length for target {}", name),
        })?;
        targets.insert(name, length);
    }
    Ok(targets)
}

/// Records overlapping one window, decoded into a reused record buffer.
pub struct BamSpans<'a> {
    reader: &'a mut bam::IndexedReader,
    record: &'a mut bam::Record,
}

impl Iterator for BamSpans<'_> {
    type Item = Result<AlignmentSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read(self.record)? {
            Ok(()) => Some(Ok(span_of(self.record))),
            Err(e) => Some(Err(WindowError::Hts(e))),
        }
    }
}

/// Reference span of a record, excluding soft and hard clips.
fn span_of(record: &bam::Record) -> AlignmentSpan {
    let start = record.pos().max(0) as u64;
    let end = record.reference_end().max(0) as u64;
    AlignmentSpan::new(start, end)
}

impl AlignmentStore for BamStore {
    type Spans<'a> = BamSpans<'a>;

    fn targets(&self) -> &Targets {
        &self.targets
    }

    fn query(&mut self, window: &Window) -> Result<BamSpans<'_>> {
        let tid = self.targets.require_id(&window.target)? as u32;
        self.reader
            .fetch((tid, window.start as i64, window.end as i64))?;
        Ok(BamSpans {
            reader: &mut self.reader,
            record: &mut self.record,
        })
    }
}

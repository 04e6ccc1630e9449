//! Window counting: the per-window query/evaluate/emit loop and the
//! iteration over targets or a single region.
//!
//! Processing is strictly sequential: one window is queried and evaluated
//! completely before the next is generated, and every result is written
//! as soon as it is known.

use std::io::Write;

use crate::config::CountConfig;
use crate::error::Result;
use crate::interval::Window;
use crate::output::{WindowResult, WindowWriter};
use crate::region::Region;
use crate::store::AlignmentStore;

/// Window count command.
#[derive(Debug, Clone)]
pub struct WindowCountCommand {
    pub config: CountConfig,
}

impl WindowCountCommand {
    pub fn new(config: CountConfig) -> Self {
        Self { config }
    }

    /// Count the records matching one window.
    pub fn count_window<S: AlignmentStore>(
        &self,
        store: &mut S,
        window: Window,
    ) -> Result<WindowResult> {
        let mut stats = CountStats::default();
        self.count_window_with_stats(store, window, &mut stats)
    }

    fn count_window_with_stats<S: AlignmentStore>(
        &self,
        store: &mut S,
        window: Window,
        stats: &mut CountStats,
    ) -> Result<WindowResult> {
        let mode = self.config.mode;
        let mut seen = 0u64;
        let mut count = 0u64;
        for span in store.query(&window)? {
            let span = span?;
            seen += 1;
            if mode.matches(&window, &span) {
                count += 1;
            }
        }
        stats.windows += 1;
        stats.records_seen += seen;
        stats.records_counted += count;
        log::trace!("{}: {} of {} records", window, count, seen);
        Ok(WindowResult::new(window, count))
    }

    /// Count every window of one region, writing reported results.
    pub fn run_region<S: AlignmentStore, W: Write>(
        &self,
        store: &mut S,
        region: &Region,
        writer: &mut WindowWriter<W>,
        stats: &mut CountStats,
    ) -> Result<()> {
        log::debug!(
            "Counting {}:{}-{} in {} bp windows",
            region.target.name,
            region.start + 1,
            region.end,
            self.config.window_size
        );
        for window in region.windows(self.config.window_size) {
            let result = self.count_window_with_stats(store, window, stats)?;
            if result.is_empty() && !self.config.print_empty {
                stats.empty_skipped += 1;
                continue;
            }
            writer.write_result(&result)?;
            stats.reported += 1;
        }
        stats.targets += 1;
        Ok(())
    }

    /// Count windows over every target, in the dataset's declared order.
    pub fn run_all<S: AlignmentStore, W: Write>(
        &self,
        store: &mut S,
        output: &mut W,
    ) -> Result<CountStats> {
        let regions: Vec<Region> = store.targets().iter().cloned().map(Region::whole).collect();
        self.run_regions(store, &regions, output)
    }

    /// Count windows over a region given as `target[:start-end]` (1-based, inclusive).
    pub fn run_region_str<S: AlignmentStore, W: Write>(
        &self,
        store: &mut S,
        region: &str,
        output: &mut W,
    ) -> Result<CountStats> {
        let region = Region::parse(region, store.targets())?;
        self.run_regions(store, std::slice::from_ref(&region), output)
    }

    /// Count a region if one is given, otherwise the whole dataset.
    pub fn run<S: AlignmentStore, W: Write>(
        &self,
        store: &mut S,
        region: Option<&str>,
        output: &mut W,
    ) -> Result<CountStats> {
        match region {
            Some(region) => self.run_region_str(store, region, output),
            None => self.run_all(store, output),
        }
    }

    fn run_regions<S: AlignmentStore, W: Write>(
        &self,
        store: &mut S,
        regions: &[Region],
        output: &mut W,
    ) -> Result<CountStats> {
        let mut writer = WindowWriter::new(output);
        let mut stats = CountStats::default();
        for region in regions {
            if let Err(e) = self.run_region(store, region, &mut writer, &mut stats) {
                writer.discard();
                return Err(e);
            }
        }
        writer.flush()?;
        log::info!("Finished: {}", stats);
        Ok(stats)
    }
}

/// Summary of a counting run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountStats {
    /// Targets or regions processed
    pub targets: usize,
    /// Windows generated and queried
    pub windows: u64,
    /// Windows written to the output
    pub reported: u64,
    /// Zero-count windows left out of the output
    pub empty_skipped: u64,
    /// Records returned by range queries (a record is seen once per window it overlaps)
    pub records_seen: u64,
    /// Records counted under the match mode
    pub records_counted: u64,
}

impl std::fmt::Display for CountStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Targets: {}, Windows: {}, Reported: {}, Empty skipped: {}, Records seen: {}, Records counted: {}",
            self.targets,
            self.windows,
            self.reported,
            self.empty_skipped,
            self.records_seen,
            self.records_counted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WindowError;
    use crate::genome::Targets;
    use crate::matching::MatchMode;
    use crate::store::MemoryStore;

    fn command(window_size: u64, mode: MatchMode, print_empty: bool) -> WindowCountCommand {
        WindowCountCommand::new(
            CountConfig::from_raw(window_size)
                .unwrap()
                .with_mode(mode)
                .with_print_empty(print_empty),
        )
    }

    fn single_record_store() -> MemoryStore {
        MemoryStore::from_records(Targets::from_pairs([("chr1", 1000)]), [("chr1", 250, 350)])
            .unwrap()
    }

    fn run_to_string(
        cmd: &WindowCountCommand,
        store: &mut MemoryStore,
        region: Option<&str>,
    ) -> (String, CountStats) {
        let mut out = Vec::new();
        let stats = cmd.run(store, region, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_overlap_counts_in_both_windows() {
        let mut store = single_record_store();
        let (out, _) = run_to_string(&command(300, MatchMode::Overlap, true), &mut store, None);

        assert_eq!(
            out,
            "chr1\t1\t300\t1\nchr1\t301\t600\t1\nchr1\t601\t900\t0\nchr1\t901\t1000\t0\n"
        );
    }

    #[test]
    fn test_start_counts_first_window_only() {
        let mut store = single_record_store();
        let (out, _) = run_to_string(&command(300, MatchMode::StartBased, false), &mut store, None);

        assert_eq!(out, "chr1\t1\t300\t1\n");
    }

    #[test]
    fn test_midpoint_counts_second_window_only() {
        let mut store = single_record_store();
        let (out, _) = run_to_string(&command(300, MatchMode::Midpoint, false), &mut store, None);

        assert_eq!(out, "chr1\t301\t600\t1\n");
    }

    #[test]
    fn test_empty_windows_suppressed_by_default() {
        let mut store = single_record_store();
        let (out, stats) = run_to_string(&command(300, MatchMode::Overlap, false), &mut store, None);

        assert_eq!(out.lines().count(), 2);
        assert_eq!(stats.windows, 4);
        assert_eq!(stats.reported, 2);
        assert_eq!(stats.empty_skipped, 2);
        assert_eq!(stats.records_seen, 2);
        assert_eq!(stats.records_counted, 2);
    }

    #[test]
    fn test_region_output_is_one_based() {
        let mut store = single_record_store();
        let (out, stats) = run_to_string(
            &command(100, MatchMode::Overlap, true),
            &mut store,
            Some("chr1:101-200"),
        );

        assert_eq!(out, "chr1\t101\t200\t0\n");
        assert_eq!(stats.targets, 1);
    }

    #[test]
    fn test_targets_in_declared_order_and_zero_length_skipped() {
        let targets = Targets::from_pairs([("chr9", 100), ("chrUn", 0), ("chr10", 50)]);
        let mut store =
            MemoryStore::from_records(targets, [("chr10", 0, 10), ("chr9", 0, 10)]).unwrap();
        let (out, stats) = run_to_string(&command(1000, MatchMode::Overlap, true), &mut store, None);

        assert_eq!(out, "chr9\t1\t100\t1\nchr10\t1\t50\t1\n");
        assert_eq!(stats.targets, 3);
        assert_eq!(stats.windows, 2);
    }

    #[test]
    fn test_region_errors_produce_no_output() {
        let mut store = single_record_store();
        let cmd = command(100, MatchMode::Overlap, true);
        let mut out = Vec::new();

        assert!(matches!(
            cmd.run(&mut store, Some("chr2:1-10"), &mut out),
            Err(WindowError::UnknownTarget(_))
        ));
        assert!(matches!(
            cmd.run(&mut store, Some("chr1:1-5000"), &mut out),
            Err(WindowError::Region { .. })
        ));
        assert!(out.is_empty());
    }

    /// Wraps a MemoryStore and fails the nth query.
    struct FailingStore {
        inner: MemoryStore,
        queries: usize,
        fail_at: usize,
    }

    impl AlignmentStore for FailingStore {
        type Spans<'a> = crate::store::memory::MemorySpans<'a>;

        fn targets(&self) -> &Targets {
            self.inner.targets()
        }

        fn query(&mut self, window: &Window) -> Result<Self::Spans<'_>> {
            self.queries += 1;
            if self.queries == self.fail_at {
                return Err(WindowError::Io(std::io::Error::other("read failed")));
            }
            self.inner.query(window)
        }
    }

    #[test]
    fn test_failure_mid_run_discards_buffered_output() {
        let mut store = FailingStore {
            inner: MemoryStore::from_records(
                Targets::from_pairs([("chr1", 1000)]),
                [("chr1", 0, 150)],
            )
            .unwrap(),
            queries: 0,
            fail_at: 3,
        };
        let mut out = Vec::new();

        let result = command(100, MatchMode::Overlap, true).run(&mut store, None, &mut out);

        assert!(matches!(result, Err(WindowError::Io(_))));
        assert_eq!(store.queries, 3);
        assert!(out.is_empty(), "unexpected output: {:?}", String::from_utf8_lossy(&out));
    }

    #[test]
    fn test_count_window_directly() {
        let mut store = single_record_store();
        let cmd = command(300, MatchMode::Midpoint, false);

        let result = cmd
            .count_window(&mut store, Window::new("chr1", 300, 600))
            .unwrap();
        assert_eq!(result.count, 1);

        let result = cmd.count_window(&mut store, Window::new("chr1", 0, 300)).unwrap();
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = CountStats {
            targets: 1,
            windows: 4,
            reported: 2,
            empty_skipped: 2,
            records_seen: 2,
            records_counted: 2,
        };
        assert_eq!(
            stats.to_string(),
            "Targets: 1, Windows: 4, Reported: 2, Empty skipped: 2, Records seen: 2, Records counted: 2"
        );
    }
}

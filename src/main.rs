//! bamwindow: print the number of reads aligning to fixed-size windows
//! of an indexed BAM/CRAM file.
//!
//! Usage: bamwindow [-h] [-v] [-e] [-m MODE] <WINDOW_SIZE> <FILE> [REGION]

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::process;

use bamwindow::store::htslib_version;
use bamwindow::{BamStore, CountConfig, MatchMode, WindowCountCommand, WindowError};

const AFTER_HELP: &str = "\
If no region is given, windows are created for each target (usually a
chromosome) in the file, starting at the beginning of the target and
incrementing by the window size. The last window is clipped to the end
of the target. If a region is given, windows start at the start of the
region and the last window is clipped to the end of the region.

Regions are 1-based and inclusive (target:start-end). The read start is
the left-most aligned base. For midpoint matching, the read span excludes
clipped bases.

Match modes:
  0  match by overlap (a read can be counted in several windows)
  1  match by read start
  2  match by read midpoint

Output: <target> <start> <end> <count>, 1-based and inclusive.
Set RUST_LOG=info (or debug, trace) for progress messages.";

#[derive(Parser)]
#[command(name = "bamwindow")]
#[command(about = "Print the number of reads aligning to windows of a fixed size in a BAM file", long_about = None)]
#[command(after_help = AFTER_HELP)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print the version and quit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Print empty windows
    #[arg(short = 'e', long = "empty")]
    print_empty: bool,

    /// The matching mode [0, 1 or 2]
    #[arg(short = 'm', long = "mode", default_value = "0", value_parser = parse_mode)]
    mode: MatchMode,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// The window size
    #[arg(value_name = "WINDOW_SIZE", required_unless_present = "version", value_parser = parse_window_size)]
    window_size: Option<NonZeroU64>,

    /// Indexed BAM/CRAM file to process
    #[arg(value_name = "FILE", required_unless_present = "version")]
    file: Option<PathBuf>,

    /// A region (target:start-end)
    #[arg(value_name = "REGION")]
    region: Option<String>,
}

fn parse_mode(s: &str) -> Result<MatchMode, String> {
    s.parse::<MatchMode>().map_err(|e| e.to_string())
}

fn parse_window_size(s: &str) -> Result<NonZeroU64, String> {
    s.trim()
        .parse::<u64>()
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(|| WindowError::InvalidWindowSize(s.to_string()).to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help goes to stdout and succeeds; every usage error exits with 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if cli.version {
        println!(
            "{} {} (HTSlib version {})",
            bamwindow::NAME,
            bamwindow::VERSION,
            htslib_version()
        );
        return;
    }

    let (Some(window_size), Some(file)) = (cli.window_size, cli.file.as_deref()) else {
        let mut cmd = Cli::command();
        let err = cmd.error(
            ErrorKind::MissingRequiredArgument,
            "<WINDOW_SIZE> and <FILE> are required",
        );
        let _ = err.print();
        process::exit(1);
    };

    let config = CountConfig::new(window_size)
        .with_mode(cli.mode)
        .with_print_empty(cli.print_empty);

    if let Err(e) = run(config, file, cli.region.as_deref(), cli.stats) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(
    config: CountConfig,
    file: &Path,
    region: Option<&str>,
    print_stats: bool,
) -> Result<(), WindowError> {
    log::debug!(
        "Window size {}, match mode {}, print empty {}",
        config.window_size,
        config.mode,
        config.print_empty
    );

    let mut store = BamStore::open(file)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let stats = WindowCountCommand::new(config).run(&mut store, region, &mut handle)?;

    if print_stats {
        eprintln!("Window count stats: {}", stats);
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "memgate",
    version,
    about = "Run a memory analyzer against a binary and fail the build on reported errors"
)]
pub struct Args {
    /// Full path to the binary target that will be analyzed
    pub target: PathBuf,

    /// Arguments forwarded to the target binary
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub arguments: Vec<String>,

    /// Analyzer executable name or path (default: valgrind)
    #[arg(long)]
    pub analyzer: Option<String>,

    /// Directory for <analyzer>-results.log (default: current directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Kill the analyzer if it runs longer than this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write a JSON run summary to this file
    #[arg(long)]
    pub summary_out: Option<PathBuf>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,
}

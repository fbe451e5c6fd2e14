//! CLI argument parsing for depot.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Depot: versioned file paths and advisory locks for a deposition repository.
///
/// Files are stored as `<repo>/<id>/<id>_<type>_P<part>.<ext>.V<n>`; symbolic
/// versions (next, latest, previous, first, second) are resolved against
/// what is on disk.
#[derive(Parser, Debug)]
#[command(name = "depot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: $DEPOT_CONFIG, then ./depot.yaml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for depot.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a version token to a file path.
    ///
    /// Prints the path of the selected version. `next` paths need not exist.
    Resolve(ResolveArgs),

    /// List the versions of a file present on disk, highest first.
    Versions(VersionsArgs),

    /// Print the MIME type for a content format.
    Mime(MimeArgs),

    /// Check that a content type may be stored in a format.
    Check(CheckArgs),

    /// Run a command while holding the lock for a file.
    ///
    /// The version is resolved after the lock is taken and passed to the
    /// command as DEPOT_FILE.
    Lock(LockArgs),

    /// List lock files in the shared lock directory.
    ///
    /// Shows whether each lock is held and by whom.
    Locks(LocksArgs),
}

/// Identifies a versioned file in API terms.
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Repository (onedep-archive, onedep-deposit).
    pub repository: String,

    /// Object identifier (e.g., D_1000000001).
    pub id: String,

    /// Content type (e.g., model, structure-factors).
    pub content_type: String,

    /// Content format (e.g., pdbx, mtz).
    pub format: String,

    /// Part number.
    #[arg(short, long, default_value_t = 1)]
    pub part: u32,

    /// Milestone qualifier (e.g., upload, release).
    #[arg(short, long)]
    pub milestone: Option<String>,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Version token: next, latest, previous, first, second, or a number.
    #[arg(long = "version", default_value = "latest", value_name = "TOKEN")]
    pub version: String,

    /// Print a JSON object instead of the bare path.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `versions` command.
#[derive(Parser, Debug)]
pub struct VersionsArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Print a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `mime` command.
#[derive(Parser, Debug)]
pub struct MimeArgs {
    /// Content format or file extension (e.g., pdbx, cif).
    pub format: String,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Content type (e.g., model).
    pub content_type: String,

    /// Content format (e.g., pdbx).
    pub format: String,
}

/// Arguments for the `lock` command.
#[derive(Parser, Debug)]
pub struct LockArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Version token resolved while the lock is held.
    #[arg(long = "version", default_value = "latest", value_name = "TOKEN")]
    pub version: String,

    /// Lock mode (shared, exclusive).
    #[arg(long, default_value = "exclusive")]
    pub mode: String,

    /// Seconds to keep retrying a contended lock (default from config).
    #[arg(long, value_name = "SECONDS")]
    pub max_wait: Option<f64>,

    /// Command line to run, split like a shell would (no shell is started).
    #[arg(short, long, conflicts_with = "args")]
    pub command: Option<String>,

    /// Command and arguments to run, after `--`.
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the `locks` command.
#[derive(Parser, Debug)]
pub struct LocksArgs {
    /// Print a JSON array.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}

//! Command-line interface definition for lode.
//!
//! This module defines the CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `lode explain` - Show the dispatch decision for individual files
//! - `lode scan` - Dispatch every file under a directory and summarize
//! - `lode check` - Validate and compile the configuration

mod commands;

use clap::{Args, Parser};
use std::path::PathBuf;

pub use commands::{CheckArgs, Command, ExplainArgs, ScanArgs};

/// lode - asset rule dispatcher for bundler pipelines
#[derive(Parser, Debug)]
#[command(
    name = "lode",
    version,
    about = "Decide how each asset in a project is transformed and where it ends up",
    long_about = "lode matches asset files against an ordered rule table and reports, for each\n\
                  file, the loader chain it runs through and whether it is inlined as a data URI,\n\
                  emitted as a separate file, bundled as a module, or passed through untouched."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows which rules were tested for each asset and how the
    /// configuration was layered.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options that locate and shape the configuration, shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Path to a configuration file
    ///
    /// Accepts `lode.toml`, a JSON file, or a `package.json` with a `lode`
    /// field. Without it, `lode.toml` and then `package.json` are searched in
    /// the project directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration profile to apply (e.g. production)
    #[arg(short, long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available lode subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how individual files are dispatched
    ///
    /// Reads each file to learn its size and content hash, then prints the
    /// matching rule, its loader chain and the output location.
    Explain(ExplainArgs),

    /// Dispatch every file in a directory tree
    ///
    /// Walks the tree respecting .gitignore and .ignore files, dispatches
    /// all files in parallel and prints a summary per rule.
    Scan(ScanArgs),

    /// Validate the configuration and print the rule table
    ///
    /// Loads the configuration, applies the selected profile, and compiles
    /// the rules, reporting overlapping rules, bad patterns and bad
    /// filename templates.
    Check(CheckArgs),
}

/// Arguments for the explain command
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Files to explain, relative to the project directory
    ///
    /// A `?query` suffix is kept and flows into `[query]` in filename
    /// templates.
    ///
    /// Examples:
    ///   lode explain src/assets/logo.svg
    ///   lode explain "src/fonts/inter.woff2?v=3"
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,

    /// Print decisions as JSON
    #[arg(long)]
    pub json: bool,

    /// Dispatch files that do not exist by name, with size 0
    #[arg(long = "virtual")]
    pub virtual_files: bool,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan, relative to the project directory
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Print every decision as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Include hidden files and directories
    #[arg(long)]
    pub hidden: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print the compiled rule table as JSON
    #[arg(long)]
    pub json: bool,
}

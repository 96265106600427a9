//! Command implementations for the lode CLI.
//!
//! - [`explain`] - Dispatch named files and print each decision
//! - [`scan`] - Dispatch a whole directory tree and summarize per rule
//! - [`check`] - Validate and print the rule table
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments plus the shared project options.

pub mod check;
pub mod explain;
pub mod scan;
pub mod utils;

pub use check::execute as check_execute;
pub use explain::execute as explain_execute;
pub use scan::execute as scan_execute;

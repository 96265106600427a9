//! Check command implementation.
//!
//! Validates and compiles the configuration without touching any assets.

use crate::cli::{CheckArgs, ProjectArgs};
use crate::commands::utils::Project;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Locate and parse the configuration (file, then `LODE_*` variables)
/// 2. Apply the selected profile
/// 3. Check the document shape
/// 4. Compile the rule table, rejecting bad patterns, bad templates and
///    overlapping rules
pub fn execute(args: CheckArgs, project: &ProjectArgs) -> Result<()> {
    if !args.json {
        ui::info("Checking configuration...");
    }

    let project = Project::load(project)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&project.rules)?);
        return Ok(());
    }

    match &project.source {
        Some(path) => ui::success(&format!("Configuration is valid: {}", path.display())),
        None => ui::success("Built-in vue-dev preset is valid"),
    }
    if !project.config.engine.is_null() {
        ui::info("[engine] options are passed through unchanged");
    }

    ui::print_rule_table(&project.rules);
    Ok(())
}

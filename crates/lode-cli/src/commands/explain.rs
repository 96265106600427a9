//! Explain command implementation.
//!
//! Dispatches the named files and prints one decision per file.

use std::path::Path;

use lode_rules::{Asset, Decision};
use serde::Serialize;
use tracing::debug;

use crate::cli::{ExplainArgs, ProjectArgs};
use crate::commands::utils::{self, Project};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// A dispatched file as printed by `explain` and `scan --json`.
#[derive(Debug, Serialize)]
pub struct Explained {
    pub file: String,
    pub size_bytes: u64,
    #[serde(flatten)]
    pub decision: Decision,
}

/// Execute the explain command.
///
/// # Errors
///
/// Fails on the first file that does not exist (unless `--virtual` is set)
/// or that the rule set rejects.
pub fn execute(args: ExplainArgs, project: &ProjectArgs) -> Result<()> {
    let project = Project::load(project)?;

    let mut explained = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let asset = load_asset(file, &project.root, args.virtual_files)?;
        let decision = project.rules.dispatch(&asset)?;
        explained.push(Explained {
            file: file.clone(),
            size_bytes: asset.size_bytes(),
            decision,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&explained)?);
    } else {
        for item in &explained {
            print_explained(item);
        }
    }

    Ok(())
}

/// Build the asset for `file`, reading its content when it exists.
///
/// `file` may carry a `?query`; only the part before it names the file on
/// disk.
pub fn load_asset(file: &str, root: &Path, allow_virtual: bool) -> Result<Asset> {
    let on_disk = file.split_once('?').map_or(file, |(path, _)| path);
    let path = utils::resolve_path(Path::new(on_disk), root);

    if path.is_file() {
        let content = std::fs::read(&path).with_path(&path)?;
        return Ok(Asset::with_content(file, content)?);
    }

    if allow_virtual {
        debug!(file, "dispatching virtual asset");
        return Ok(Asset::new(file, 0)?);
    }

    Err(CliError::FileNotFound(path))
}

fn print_explained(item: &Explained) {
    println!("{} ({})", item.file, ui::format_size(item.size_bytes));
    println!(
        "  rule    {}",
        item.decision.rule().unwrap_or("(none)")
    );
    if !item.decision.chain().is_empty() {
        println!("  use     {}", item.decision.chain());
        let order: Vec<_> = item
            .decision
            .chain()
            .execution_order()
            .map(|l| l.name.as_str())
            .collect();
        println!("  runs    {}", order.join(" -> "));
    }
    println!("  output  {}", ui::describe_output(item.decision.output()));
}

//! Scan command implementation.
//!
//! Walks a directory tree, dispatches every file that has an extension and
//! prints per-rule totals.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use indexmap::IndexMap;
use lode_rules::{Asset, OutputLocation, RuleSet};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cli::{ProjectArgs, ScanArgs};
use crate::commands::explain::Explained;
use crate::commands::utils::{self, Project};
use crate::error::{CliError, Result, ResultExt};
use crate::ui::{self, RuleTally};

/// Execute the scan command.
pub fn execute(args: ScanArgs, project: &ProjectArgs) -> Result<()> {
    let project = Project::load(project)?;
    let dir = utils::resolve_path(&args.dir, &project.root);
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }

    let files = walk(&dir, args.hidden)?;
    info!(dir = %dir.display(), files = files.len(), "scanning");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(project.config.settings.parallel_jobs.unwrap_or(0))
        .build()?;
    let results = pool.install(|| scan_files(&files, &project.root, &project.rules));

    let mut explained = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (file, result) in results {
        match result {
            Ok(item) => explained.push(item),
            Err(err) => {
                failures += 1;
                ui::error(&format!("{file}: {err}"));
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&explained)?);
    } else {
        ui::print_scan_summary(&tally(&project.rules, &explained));
    }

    if failures > 0 {
        return Err(CliError::Custom(format!(
            "{failures} file(s) could not be dispatched"
        )));
    }
    Ok(())
}

/// Collect regular files under `dir`, honoring ignore files, sorted by path.
fn walk(dir: &Path, hidden: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkBuilder::new(dir).hidden(!hidden).build() {
        let entry = entry?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Display path of a walked file and its dispatch outcome.
type Scanned = (String, Result<Explained>);

/// Read and dispatch every file in parallel, in walk order.
///
/// Files without an extension are skipped. A file that fails to read or
/// dispatch yields an error entry without stopping the others.
fn scan_files(files: &[PathBuf], root: &Path, rules: &RuleSet) -> Vec<Scanned> {
    files
        .par_iter()
        .filter_map(|path| scan_file(path, root, rules))
        .collect()
}

fn scan_file(path: &Path, root: &Path, rules: &RuleSet) -> Option<Scanned> {
    let name = utils::display_path(path, root);
    let result = match read_asset(path, &name) {
        Ok(Some(asset)) => rules
            .dispatch(&asset)
            .map(|decision| Explained {
                file: name.clone(),
                size_bytes: asset.size_bytes(),
                decision,
            })
            .map_err(CliError::from),
        Ok(None) => return None,
        Err(err) => Err(err),
    };
    Some((name, result))
}

fn read_asset(path: &Path, name: &str) -> Result<Option<Asset>> {
    let content = std::fs::read(path).with_path(path)?;
    match Asset::with_content(name, content) {
        Ok(asset) => Ok(Some(asset)),
        Err(lode_rules::Error::MissingExtension { .. }) => {
            debug!(file = %name, "skipping file without extension");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Per-rule totals in rule table order, unmatched assets last.
fn tally(rules: &RuleSet, explained: &[Explained]) -> Vec<RuleTally> {
    let mut tallies: IndexMap<Option<&str>, RuleTally> = rules
        .iter()
        .map(|rule| {
            let tally = RuleTally {
                rule: Some(rule.name().to_string()),
                ..Default::default()
            };
            (Some(rule.name()), tally)
        })
        .collect();
    tallies.insert(None, RuleTally::default());

    for item in explained {
        let entry = tallies.entry(item.decision.rule()).or_default();
        entry.files += 1;
        entry.bytes += item.size_bytes;
        match item.decision.output() {
            OutputLocation::Inline { .. } => entry.inlined += 1,
            OutputLocation::Emitted { .. } => entry.emitted += 1,
            OutputLocation::Bundled | OutputLocation::PassThrough => {}
        }
    }

    tallies.into_values().filter(|t| t.files > 0).collect()
}

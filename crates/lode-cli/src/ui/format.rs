//! Formatting for rule tables, decisions and scan summaries.

use console::Term;
use lode_rules::{OutputLocation, OutputPolicy, RuleSet};
use owo_colors::{OwoColorize, Stream};

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use lode_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(10_240), "10.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// One-line description of an output policy.
///
/// `default_filename` is shown for policies that emit without their own
/// template.
pub fn describe_policy(policy: &OutputPolicy, default_filename: &str) -> String {
    match policy {
        OutputPolicy::Auto {
            max_inline_size,
            filename,
        } => format!(
            "inline < {}, else emit {}",
            format_size(*max_inline_size),
            filename.as_ref().map_or(default_filename, |f| f.as_str())
        ),
        OutputPolicy::Emit { filename } => format!(
            "emit {}",
            filename.as_ref().map_or(default_filename, |f| f.as_str())
        ),
        OutputPolicy::Inline => "inline".to_string(),
        OutputPolicy::Bundle => "bundle".to_string(),
    }
}

/// One-line description of where a dispatched asset ends up.
pub fn describe_output(output: &OutputLocation) -> String {
    match output {
        OutputLocation::Inline { mime, .. } => format!("inline as {mime}"),
        OutputLocation::Emitted {
            path: Some(path), ..
        } => format!("emit {path}"),
        OutputLocation::Emitted {
            template,
            path: None,
        } => format!("emit {template}"),
        OutputLocation::Bundled => "bundle".to_string(),
        OutputLocation::PassThrough => "pass through".to_string(),
    }
}

/// Print the compiled rule table to stdout.
pub fn print_rule_table(rules: &RuleSet) {
    let width = separator_width();
    let default_filename = rules.asset_filename().as_str();

    println!(
        "{}",
        "Rules".if_supports_color(Stream::Stdout, |t| t.bold().underline().to_string())
    );
    println!("{}", "─".repeat(width));

    for (index, rule) in rules.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{:>2}.", index + 1).if_supports_color(Stream::Stdout, |t| t.dimmed()),
            rule.name()
                .if_supports_color(Stream::Stdout, |t| t.bright_white().bold().to_string()),
            rule.matcher()
                .to_string()
                .if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
        if !rule.chain().is_empty() {
            println!("      use    {}", rule.chain());
        }
        println!(
            "      output {}",
            describe_policy(rule.policy(), default_filename)
        );
    }

    println!("{}", "─".repeat(width));
    println!("  unmatched assets: {}", rules.fallback());
}

/// Per-rule totals collected by `lode scan`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTally {
    /// Rule name, or `None` for unmatched assets
    pub rule: Option<String>,
    pub files: usize,
    pub bytes: u64,
    pub inlined: usize,
    pub emitted: usize,
}

/// Print a scan summary table to stdout.
pub fn print_scan_summary(tallies: &[RuleTally]) {
    let width = separator_width();

    println!(
        "{}",
        "Scan Summary".if_supports_color(Stream::Stdout, |t| t.bold().underline().to_string())
    );
    println!("{}", "─".repeat(width));

    for tally in tallies {
        let name = tally.rule.as_deref().unwrap_or("(pass through)");
        let mut detail = format!("{} files, {}", tally.files, format_size(tally.bytes));
        if tally.inlined > 0 {
            detail.push_str(&format!(", {} inlined", tally.inlined));
        }
        if tally.emitted > 0 {
            detail.push_str(&format!(", {} emitted", tally.emitted));
        }

        println!(
            "  {} {} {}",
            "▸".if_supports_color(Stream::Stdout, |t| t.blue()),
            name.if_supports_color(Stream::Stdout, |t| t.bright_white().bold().to_string()),
            detail.if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
    }

    println!("{}", "─".repeat(width));

    let files: usize = tallies.iter().map(|t| t.files).sum();
    let bytes: u64 = tallies.iter().map(|t| t.bytes).sum();
    println!("  Total: {} files, {}", files, format_size(bytes));
}

fn separator_width() -> usize {
    let columns = Term::stdout().size().1 as usize;
    columns.clamp(20, 80)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lode_rules::FilenameTemplate;

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
    }

    #[test]
    fn describe_auto_policy() {
        let policy = OutputPolicy::auto();
        assert_eq!(
            describe_policy(&policy, "static/media/[hash:10][ext][query]"),
            "inline < 10.00 KB, else emit static/media/[hash:10][ext][query]"
        );
    }

    #[test]
    fn describe_emit_policy_with_own_template() {
        let policy = OutputPolicy::Emit {
            filename: Some(FilenameTemplate::parse("fonts/[name][ext]").unwrap()),
        };
        assert_eq!(describe_policy(&policy, "unused"), "emit fonts/[name][ext]");
    }

    #[test]
    fn describe_outputs() {
        assert_eq!(
            describe_output(&OutputLocation::Inline {
                mime: "image/svg+xml",
                data_uri: None
            }),
            "inline as image/svg+xml"
        );
        assert_eq!(
            describe_output(&OutputLocation::Emitted {
                template: "[name][ext]".into(),
                path: Some("hero.png".into())
            }),
            "emit hero.png"
        );
        assert_eq!(describe_output(&OutputLocation::PassThrough), "pass through");
    }
}

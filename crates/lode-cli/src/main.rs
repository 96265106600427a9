//! lode CLI entry point: parse arguments, set up logging, run the command.

use clap::Parser;
use lode_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let configured = commands::utils::configured_log_level(&args.project);
    logger::init_logger(args.verbose, args.quiet, args.no_color, configured.as_deref());
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Explain(explain_args) => {
            commands::explain_execute(explain_args, &args.project)
        }
        cli::Command::Scan(scan_args) => commands::scan_execute(scan_args, &args.project),
        cli::Command::Check(check_args) => commands::check_execute(check_args, &args.project),
    };

    result.map_err(error::cli_error_to_miette)
}

// src/bin/cli.rs
use color_eyre::eyre::{Result, WrapErr};

use roster_check::cli::{self, CliProgress, Command};
use roster_check::{log, runner};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match cli::parse_env()? {
        Command::Help => {
            eprintln!("{}", cli::HELP);
            return Ok(());
        }
        Command::Run(args) => args,
    };
    log::set_enabled(args.log);

    let mut progress = CliProgress::new(args.quiet);
    let summary = runner::run(&args.options, Some(&mut progress))
        .wrap_err_with(|| format!("checking roster {}", args.options.roster.display()))?;

    println!("Records read: {} (from {} payloads)", summary.records, summary.payloads);
    println!("Matched names: {} / {}", summary.found(), summary.rows.len());
    println!("Wrote {}", summary.report.display());

    if summary.is_partial() {
        eprintln!("Warning: {} payload(s) failed; the report may be incomplete", summary.failures.len());
        std::process::exit(2);
    }
    Ok(())
}

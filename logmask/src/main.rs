// logmask/src/main.rs
//! logmask entry point.
//!
//! Resolves the rule source, compiles the masker once, and dispatches to the
//! selected command. Any configuration error aborts with a non-zero exit
//! before a single line is written.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use logmask::cli::{Cli, Commands};
use logmask::commands::{self, check, demo, mask};
use logmask::logger;

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Mask(cmd) => {
            logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
            let masker = commands::build_masker(&cmd.source)?;
            mask::run_mask(&masker, &cmd, cli.quiet)
        }
        Commands::Check(cmd) => {
            logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
            let masker = commands::build_masker(&cmd.source)?;
            check::run_check(&masker, cli.quiet)
        }
        Commands::Demo(cmd) => {
            // The masking logger becomes the global logger here.
            let level = logger::level_from_flags(cli.quiet, cli.debug).unwrap_or(LevelFilter::Info);
            let masker = commands::build_masker(&cmd.source)?;
            demo::run_demo(masker, &cmd.field_name, level)
        }
    }
}

fn main() {
    // A missing .env file is fine; rules may come from flags or a rule file.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        commands::error_msg(format!("{:#}", e));
        std::process::exit(1);
    }
}

//! # sui-e
//!
//! `sui-e` runs `sui move build` and reprints its output grouped by source
//! file, errors before warnings, then exits with the build's own exit code.
//!
//! ## Quick Start
//! ```sh
//! cargo install sui-e
//! sui-e
//! sui-e -- sui move build --path packages/unxversal
//! sui move build 2>&1 | sui-e --input - --exit-code "${PIPESTATUS[0]}"
//! ```

use clap::Parser;
use sui_e::e_driver::failure_exit_code;
use sui_e::e_fmt::Palette;
use sui_e::prelude::*;
use sui_e::{BuildCommandBuilder, BuildSource, CapturedSource, Cli, CommandSource, ReportRenderer, RunError};

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    if cli.version {
        sui_e::e_cli::print_version_and_features();
        exit(0);
    }

    let palette = Palette::for_choice(cli.color);
    let mut source: Box<dyn BuildSource> = match &cli.input {
        Some(path) => Box::new(CapturedSource::new(path, cli.exit_code)),
        None => Box::new(CommandSource::new(BuildCommandBuilder::from_command_line(&cli.command))),
    };

    let renderer = ReportRenderer::new(palette);
    let mut stdout = io::stdout().lock();
    let code = match sui_e::drive(source.as_mut(), &renderer, cli.format, &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", palette.errors.paint(format!("Error: {}", err)));
            if let Some(guidance) = err.downcast_ref::<RunError>().and_then(RunError::guidance) {
                eprintln!("{}", guidance);
            }
            failure_exit_code(&err)
        }
    };
    debug!("exiting with {}", code);
    exit(code);
}

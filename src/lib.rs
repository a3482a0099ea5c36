#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::env;
    pub use std::error::Error;
    pub use std::fs;
    pub use std::io;
    pub use std::path::{Path, PathBuf};
    pub use std::process::exit;
    pub use log::{debug, error, info, trace, warn};
}

pub mod e_types;
pub use e_types::{DiagnosticBlock, FileGroup, Report, ScanItem, Severity};
pub mod e_parser;
pub use e_parser::{scan_text, BlockScanner, TRAILER_PHRASE};
pub mod e_locate;
pub use e_locate::locate_path;
pub mod e_aggregate;
pub use e_aggregate::{aggregate, build_report, Aggregator};
pub mod e_fmt;
pub mod e_reports;
pub use e_reports::{OutputFormat, ReportRenderer};
pub mod e_command_builder;
pub use e_command_builder::BuildCommandBuilder;
pub mod e_runner;
pub use e_runner::{BuildOutput, BuildSource, CapturedSource, CommandSource, RunError};
pub mod e_driver;
pub use e_driver::drive;
pub mod e_cli;
pub use e_cli::Cli;

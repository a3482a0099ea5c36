use crate::e_fmt::ColorChoice;
use crate::e_reports::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sui-e: errors first. Runs `sui move build` and regroups its diagnostics by file.",
    long_about = None
)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and feature flags in JSON format.
    #[arg(
        long,
        short = 'v',
        help = "Print version and feature flags in JSON format."
    )]
    pub version: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = ColorChoice::Auto,
        help = "When to color headers and dividers (default: auto)."
    )]
    pub color: ColorChoice,

    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format (default: text)."
    )]
    pub format: OutputFormat,

    #[arg(
        long,
        value_name = "PATH",
        help = "Re-sort previously captured build output instead of running a build ('-' reads stdin)."
    )]
    pub input: Option<PathBuf>,

    #[arg(
        long = "exit-code",
        value_name = "N",
        default_value_t = 0,
        requires = "input",
        allow_negative_numbers = true,
        help = "Exit code to report for --input (default: 0)."
    )]
    pub exit_code: i32,

    #[arg(
        last = true,
        value_name = "COMMAND",
        help = "Build command to run instead of `sui move build`."
    )]
    pub command: Vec<String>,
}

/// Print the version and the JSON array of feature flags.
pub fn print_version_and_features() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
    let json_features = format!(
        "[{}]",
        get_feature_flags()
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<String>>()
            .join(", ")
    );
    println!("sui-e {}", version);
    println!("{}", json_features);
}

/// Returns a vector of feature flag strings.
/// Enabled features are listed as-is while disabled ones are prefixed with "!".
pub fn get_feature_flags() -> Vec<&'static str> {
    let mut flags = Vec::new();
    if cfg!(feature = "uses_serde") {
        flags.push("uses_serde");
    } else {
        flags.push("!uses_serde");
    }
    flags
}

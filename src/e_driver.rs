use crate::e_aggregate::build_report;
use crate::e_reports::{OutputFormat, ReportRenderer};
use crate::e_runner::{BuildSource, RunError};
use anyhow::Result;
use log::warn;
use std::io::{self, Write};

/// Collects the build output from `source`, renders the grouped report to
/// `out`, and returns the exit code the process should terminate with.
///
/// Once the build output is collected, that is the build's own exit code,
/// untouched, even when writing the report fails. Only a source that cannot
/// produce output at all surfaces as an error, carrying a [`RunError`].
pub fn drive<S, W>(source: &mut S, renderer: &ReportRenderer, format: OutputFormat, out: &mut W) -> Result<i32>
where
    S: BuildSource + ?Sized,
    W: Write + ?Sized,
{
    let output = source.collect()?;
    let report = build_report(&output.text, output.exit_code);
    let rendered = renderer.render(&report, format);
    if let Err(e) = out.write_all(rendered.as_bytes()).and_then(|_| out.flush()) {
        warn!("failed to write report: {}", e);
        let _ = writeln!(io::stderr(), "Warning: failed to write report: {}", e);
    }
    Ok(report.exit_code)
}

/// Maps a failed run to the exit code reserved for its cause.
pub fn failure_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RunError>() {
        Some(run_err) => run_err.exit_code(),
        None => crate::e_runner::EXIT_IO,
    }
}

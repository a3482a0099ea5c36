//! Rendering of an aggregated [`Report`] into the final output text.

use crate::e_fmt::Palette;
use crate::e_types::{DiagnosticBlock, FileGroup, Report};

/// Output format for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// Requires the `uses_serde` feature; falls back to text without it.
    Json,
}

/// Serializes a report, independent of where it is written.
///
/// Rendering is pure: the same report and palette always yield the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    palette: Palette,
}

impl ReportRenderer {
    pub fn new(palette: Palette) -> Self {
        ReportRenderer { palette }
    }

    pub fn render(&self, report: &Report, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(report),
            #[cfg(feature = "uses_serde")]
            OutputFormat::Json => render_json(report),
            #[cfg(not(feature = "uses_serde"))]
            OutputFormat::Json => {
                log::warn!("built without uses_serde; rendering text instead of json");
                self.render_text(report)
            }
        }
    }

    /// Renders preamble, then one section per file (errors above warnings),
    /// then the summary line.
    ///
    /// # Example
    /// ```
    /// use sui_e::{build_report, ReportRenderer};
    ///
    /// let report = build_report("Caching git dependency ...", 0);
    /// assert_eq!(ReportRenderer::default().render_text(&report), "Caching git dependency ...\n");
    /// ```
    pub fn render_text(&self, report: &Report) -> String {
        let mut out = String::new();
        let divider = self.palette.divider();

        if !report.preamble.is_empty() {
            out.push_str(&report.preamble.join("\n"));
            out.push('\n');
        }

        for group in report.files().filter(|g| !g.is_empty()) {
            self.render_group(&mut out, group, &divider);
        }

        if let Some(summary) = &report.summary_line {
            out.push('\n');
            out.push_str(&divider);
            out.push('\n');
            out.push_str(summary);
            out.push('\n');
        }
        out
    }

    fn render_group(&self, out: &mut String, group: &FileGroup, divider: &str) {
        out.push('\n');
        out.push_str(divider);
        out.push('\n');
        out.push_str(&self.palette.file.paint(format!("File: {}", group.path)).to_string());
        out.push('\n');
        out.push_str(divider);
        out.push('\n');

        if !group.errors.is_empty() {
            out.push_str(&self.palette.errors.paint("  ERRORS").to_string());
            out.push('\n');
            push_blocks(out, &group.errors);
            if !group.warnings.is_empty() {
                out.push('\n');
            }
        }

        if !group.warnings.is_empty() {
            out.push_str(&self.palette.warnings.paint("  WARNINGS").to_string());
            out.push('\n');
            push_blocks(out, &group.warnings);
        }
    }
}

fn push_blocks(out: &mut String, blocks: &[DiagnosticBlock]) {
    let texts: Vec<String> = blocks.iter().map(DiagnosticBlock::raw_text).collect();
    out.push_str(&texts.join("\n\n"));
    out.push('\n');
}

#[cfg(feature = "uses_serde")]
#[derive(serde::Serialize)]
struct JsonReport<'a> {
    preamble: &'a [String],
    files: Vec<&'a FileGroup>,
    summary: Option<&'a str>,
    exit_code: i32,
}

/// Machine-readable rendering; `files` follows first-appearance order.
#[cfg(feature = "uses_serde")]
pub fn render_json(report: &Report) -> String {
    let view = JsonReport {
        preamble: &report.preamble,
        files: report.files().filter(|g| !g.is_empty()).collect(),
        summary: report.summary_line.as_deref(),
        exit_code: report.exit_code,
    };
    let mut json = serde_json::to_string_pretty(&view).unwrap_or_else(|e| {
        log::error!("failed to serialize report: {}", e);
        String::from("{}")
    });
    json.push('\n');
    json
}

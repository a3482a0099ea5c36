use std::collections::HashMap;

#[cfg(feature = "uses_serde")]
use serde::Serialize;

/// Represents the severity of a diagnostic block emitted by the build.
///
/// Only the two severities the build prints as standalone blocks are tracked;
/// `note:`/`help:` lines are continuation lines inside those blocks.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "uses_serde", derive(Serialize))]
#[cfg_attr(feature = "uses_serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// The literal a line must start with to open a block of this severity.
    pub fn introducer(self) -> &'static str {
        match self {
            Severity::Error => "error[",
            Severity::Warning => "warning[",
        }
    }

    /// Classifies a raw line as a block introducer, if it is one.
    ///
    /// # Example
    /// ```
    /// use sui_e::Severity;
    ///
    /// assert_eq!(Severity::from_line("error[E01]: type mismatch"), Some(Severity::Error));
    /// assert_eq!(Severity::from_line("warning[W09001]: unused alias"), Some(Severity::Warning));
    /// assert_eq!(Severity::from_line("  error[E01]: indented"), None);
    /// ```
    pub fn from_line(line: &str) -> Option<Severity> {
        if line.starts_with(Severity::Error.introducer()) {
            Some(Severity::Error)
        } else if line.starts_with(Severity::Warning.introducer()) {
            Some(Severity::Warning)
        } else {
            None
        }
    }
}

/// One error or warning as printed by the build: the introducing line plus
/// every continuation line up to (not including) the terminating blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uses_serde", derive(Serialize))]
pub struct DiagnosticBlock {
    pub severity: Severity,
    pub lines: Vec<String>,
}

impl DiagnosticBlock {
    pub fn new(severity: Severity, header: impl Into<String>) -> Self {
        DiagnosticBlock {
            severity,
            lines: vec![header.into()],
        }
    }

    /// The introducing line, e.g. `error[E01]: type mismatch`.
    pub fn header(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    /// The bracketed code from the header, e.g. `E01`.
    pub fn code(&self) -> Option<&str> {
        self.header()
            .strip_prefix(self.severity.introducer())?
            .split_once(']')
            .map(|(code, _)| code)
    }

    /// The block's lines joined for display.
    pub fn raw_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// What the scanner yields for each step over the raw stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    /// A non-empty line outside any block.
    Plain(String),
    /// A plain line carrying the "build failed" phrase.
    Trailer(String),
    Block(DiagnosticBlock),
}

/// All diagnostics attributed to one source path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "uses_serde", derive(Serialize))]
pub struct FileGroup {
    pub path: String,
    pub errors: Vec<DiagnosticBlock>,
    pub warnings: Vec<DiagnosticBlock>,
}

impl FileGroup {
    pub fn new(path: impl Into<String>) -> Self {
        FileGroup {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, block: DiagnosticBlock) {
        match block.severity {
            Severity::Error => self.errors.push(block),
            Severity::Warning => self.warnings.push(block),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// The whole-run result: what gets rendered, plus the build's exit status.
///
/// `groups` holds one entry per path; `file_order` remembers the order in
/// which each path was first seen. A path is in `file_order` iff it is a key
/// of `groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub preamble: Vec<String>,
    pub file_order: Vec<String>,
    pub groups: HashMap<String, FileGroup>,
    pub summary_line: Option<String>,
    pub exit_code: i32,
}

impl Report {
    pub fn new(exit_code: i32) -> Self {
        Report {
            exit_code,
            ..Default::default()
        }
    }

    /// File groups in first-appearance order.
    pub fn files(&self) -> impl Iterator<Item = &FileGroup> + '_ {
        self.file_order
            .iter()
            .filter_map(move |path| self.groups.get(path))
    }

    pub fn error_count(&self) -> usize {
        self.groups.values().map(|g| g.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.groups.values().map(|g| g.warnings.len()).sum()
    }

    /// True when there is nothing at all to print.
    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.summary_line.is_none() && self.files().all(FileGroup::is_empty)
    }
}

use crate::e_locate::locate_path;
use crate::e_parser::scan_text;
use crate::e_types::{DiagnosticBlock, FileGroup, Report, ScanItem};
use crate::prelude::*;

/// Builds a [`Report`] from scanned items in a single forward pass.
///
/// Files keep the position of their first block; blocks keep stream order
/// within their severity. Nothing is reordered once appended.
#[derive(Debug, Default)]
pub struct Aggregator {
    report: Report,
}

impl Aggregator {
    pub fn new(exit_code: i32) -> Self {
        Aggregator {
            report: Report::new(exit_code),
        }
    }

    pub fn push(&mut self, item: ScanItem) {
        match item {
            ScanItem::Plain(line) => self.report.preamble.push(line),
            // Last one wins.
            ScanItem::Trailer(line) => self.report.summary_line = Some(line),
            ScanItem::Block(block) => self.push_block(block),
        }
    }

    fn push_block(&mut self, block: DiagnosticBlock) {
        let text = block.raw_text();
        match locate_path(&text) {
            Some(path) => {
                trace!("{:?} block -> {}", block.severity, path);
                if !self.report.groups.contains_key(&path) {
                    self.report.file_order.push(path.clone());
                }
                self.report
                    .groups
                    .entry(path)
                    .or_insert_with_key(|p| FileGroup::new(p.as_str()))
                    .push(block);
            }
            None => {
                warn!("no source location in diagnostic: {}", block.header());
                self.report.preamble.push(text);
            }
        }
    }

    pub fn finish(self) -> Report {
        debug!(
            "aggregated {} files, {} errors, {} warnings, {} preamble entries",
            self.report.file_order.len(),
            self.report.error_count(),
            self.report.warning_count(),
            self.report.preamble.len()
        );
        self.report
    }
}

impl Extend<ScanItem> for Aggregator {
    fn extend<I: IntoIterator<Item = ScanItem>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Aggregates a scanned item sequence.
pub fn aggregate(items: impl IntoIterator<Item = ScanItem>, exit_code: i32) -> Report {
    let mut aggregator = Aggregator::new(exit_code);
    aggregator.extend(items);
    aggregator.finish()
}

/// Scans and aggregates captured output in one call.
///
/// # Example
/// ```
/// use sui_e::build_report;
///
/// let text = "warning[W1]: unused\n  ┌─ a.move:10\n\nerror[E1]: bad\n  ┌─ a.move:20\n";
/// let report = build_report(text, 1);
/// assert_eq!(report.file_order, vec!["a.move"]);
/// assert_eq!(report.error_count(), 1);
/// assert_eq!(report.warning_count(), 1);
/// assert_eq!(report.exit_code, 1);
/// ```
pub fn build_report(text: &str, exit_code: i32) -> Report {
    let items = scan_text(text);
    debug!("scanned {} items", items.len());
    aggregate(items, exit_code)
}

//! Block scanner for the build's combined output.
//!
//! Walks the raw lines once with an explicit cursor and two states: outside a
//! block (`Scanning`) and collecting a diagnostic (`InBlock`). Running out of
//! lines while in a block just closes it.

use crate::prelude::*;
use crate::e_types::{DiagnosticBlock, ScanItem, Severity};

/// The phrase the build prints when compilation failed as a whole.
pub const TRAILER_PHRASE: &str = "Failed to build Move modules";

enum State {
    Scanning,
    InBlock(DiagnosticBlock),
}

/// Splits the raw line sequence into plain lines, trailer lines and
/// diagnostic blocks, preserving stream order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockScanner;

impl BlockScanner {
    pub fn new() -> Self {
        BlockScanner
    }

    /// Scans `lines` in order.
    ///
    /// Empty plain lines are dropped; the blank line that terminates a block is
    /// consumed but not kept.
    ///
    /// # Example
    /// ```
    /// use sui_e::{BlockScanner, ScanItem};
    ///
    /// let lines = ["BUILDING pool", "error[E01]: oops", "  ┌─ a.move:1", "", ""];
    /// let items = BlockScanner::new().scan(&lines);
    /// assert_eq!(items.len(), 2);
    /// assert_eq!(items[0], ScanItem::Plain("BUILDING pool".to_string()));
    /// assert!(matches!(&items[1], ScanItem::Block(b) if b.lines.len() == 2));
    /// ```
    pub fn scan<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ScanItem> {
        let mut items = Vec::new();
        let mut state = State::Scanning;
        let mut cursor = 0;

        while cursor < lines.len() {
            let line = lines[cursor].as_ref();
            cursor += 1;

            state = match state {
                State::Scanning => match Severity::from_line(line) {
                    Some(severity) => {
                        trace!("line {}: opens {:?} block", cursor, severity);
                        State::InBlock(DiagnosticBlock::new(severity, line))
                    }
                    None => {
                        if line.contains(TRAILER_PHRASE) {
                            trace!("line {}: trailer", cursor);
                            items.push(ScanItem::Trailer(line.to_string()));
                        } else if !line.trim().is_empty() {
                            items.push(ScanItem::Plain(line.to_string()));
                        }
                        State::Scanning
                    }
                },
                State::InBlock(mut block) => {
                    if line.trim().is_empty() {
                        trace!("line {}: closes block of {} lines", cursor, block.lines.len());
                        items.push(ScanItem::Block(block));
                        State::Scanning
                    } else {
                        block.lines.push(line.to_string());
                        State::InBlock(block)
                    }
                }
            };
        }

        if let State::InBlock(block) = state {
            trace!("end of stream closes block of {} lines", block.lines.len());
            items.push(ScanItem::Block(block));
        }
        items
    }
}

/// Characters that end a line, besides `\r\n` taken as one break.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits captured output into lines.
///
/// Besides `\n` and `\r\n`, a bare `\r` (progress rewrites), vertical tab,
/// form feed, the information separators and the Unicode line/paragraph
/// separators all end a line. A trailing break does not produce an empty
/// last line.
///
/// # Example
/// ```
/// use sui_e::e_parser::split_lines;
///
/// assert_eq!(split_lines("a\r\nb\rc\n"), vec!["a", "b", "c"]);
/// assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Scans a whole captured output text.
pub fn scan_text(text: &str) -> Vec<ScanItem> {
    BlockScanner::new().scan(&split_lines(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(items: &[ScanItem], idx: usize) -> &DiagnosticBlock {
        match &items[idx] {
            ScanItem::Block(b) => b,
            other => panic!("expected block at {}, got {:?}", idx, other),
        }
    }

    #[test]
    fn test_plain_lines_only() {
        let items = scan_text("UPDATING GIT DEPENDENCY https://github.com/MystenLabs/sui.git\nINCLUDING DEPENDENCY Sui\n");
        assert_eq!(
            items,
            vec![
                ScanItem::Plain("UPDATING GIT DEPENDENCY https://github.com/MystenLabs/sui.git".into()),
                ScanItem::Plain("INCLUDING DEPENDENCY Sui".into()),
            ]
        );
    }

    #[test]
    fn test_empty_plain_lines_are_dropped() {
        let items = scan_text("\n   \nBUILDING x\n\t\n");
        assert_eq!(items, vec![ScanItem::Plain("BUILDING x".into())]);
    }

    #[test]
    fn test_block_stops_at_blank_line() {
        let text = "error[E01]: type mismatch\n   ┌─ sources/math.move:42:5\n   │\n42 │     x + y\n   │     ^ here\n\nBUILDING after";
        let items = scan_text(text);
        assert_eq!(items.len(), 2);
        let b = block(&items, 0);
        assert_eq!(b.severity, Severity::Error);
        assert_eq!(b.lines.len(), 5);
        assert_eq!(b.lines[2], "   │");
        assert_eq!(items[1], ScanItem::Plain("BUILDING after".into()));
    }

    #[test]
    fn test_whitespace_only_line_terminates_block() {
        let items = scan_text("warning[W1]: unused\n  ┌─ a.move:3\n    \nnext");
        assert_eq!(block(&items, 0).lines.len(), 2);
        assert_eq!(items[1], ScanItem::Plain("next".into()));
    }

    #[test]
    fn test_block_runs_to_end_of_stream() {
        let items = scan_text("warning[W09001]: unused alias\n  ┌─ sources/a.move:10:5");
        assert_eq!(items.len(), 1);
        let b = block(&items, 0);
        assert_eq!(b.severity, Severity::Warning);
        assert_eq!(b.lines.len(), 2);
    }

    #[test]
    fn test_introducer_inside_block_is_continuation() {
        // Only a blank line ends a block.
        let items = scan_text("error[E1]: a\nerror[E2]: b\n\n");
        assert_eq!(items.len(), 1);
        assert_eq!(block(&items, 0).lines, vec!["error[E1]: a", "error[E2]: b"]);
    }

    #[test]
    fn test_consecutive_blocks() {
        let items = scan_text("error[E1]: a\n  ┌─ a.move:1\n\nwarning[W1]: b\n  ┌─ b.move:2\n\n");
        assert_eq!(items.len(), 2);
        assert_eq!(block(&items, 0).severity, Severity::Error);
        assert_eq!(block(&items, 1).severity, Severity::Warning);
    }

    #[test]
    fn test_trailer_is_recognised_as_substring() {
        let items = scan_text("Error: Failed to build Move modules: Compilation error.");
        assert_eq!(
            items,
            vec![ScanItem::Trailer("Error: Failed to build Move modules: Compilation error.".into())]
        );
    }

    #[test]
    fn test_trailer_phrase_inside_block_stays_in_block() {
        let items = scan_text("error[E1]: Failed to build Move modules\n  ┌─ a.move:1\n");
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], ScanItem::Block(_)));
    }

    #[test]
    fn test_reworded_trailer_is_plain() {
        // Exact substring match only; other wordings stay ordinary lines.
        let items = scan_text("Failed to build move modules");
        assert_eq!(items, vec![ScanItem::Plain("Failed to build move modules".into())]);
    }

    #[test]
    fn test_lowercase_error_without_bracket_is_plain() {
        let items = scan_text("error: could not find Move.toml");
        assert_eq!(items, vec![ScanItem::Plain("error: could not find Move.toml".into())]);
    }

    #[test]
    fn test_split_lines_separators() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\n\r\nb\r\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\u{0b}b\u{0c}c\u{2028}d\u{2029}e\u{85}f"), vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("\r\r\n"), vec!["", ""]);
    }

    #[test]
    fn test_bare_carriage_return_splits_progress_lines() {
        let items = scan_text("Compiling 1/3\rCompiling 3/3\nerror[E1]: a\r  ┌─ a.move:1\r\rdone");
        assert_eq!(items[0], ScanItem::Plain("Compiling 1/3".into()));
        assert_eq!(items[1], ScanItem::Plain("Compiling 3/3".into()));
        assert_eq!(block(&items, 2).lines, vec!["error[E1]: a", "  ┌─ a.move:1"]);
        assert_eq!(items[3], ScanItem::Plain("done".into()));
    }

    #[test]
    fn test_crlf_input() {
        let items = scan_text("error[E1]: a\r\n  ┌─ a.move:1\r\n\r\ndone\r\n");
        assert_eq!(block(&items, 0).lines, vec!["error[E1]: a", "  ┌─ a.move:1"]);
        assert_eq!(items[1], ScanItem::Plain("done".into()));
    }
}

use crate::e_parser::split_lines;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pointer line printed under a diagnostic header: `┌─ <path>:<line>[:<col>]`.
static POINTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"┌─\s*([^:]+):\d+").expect("pointer regex is valid"));

/// Finds the source path a diagnostic block points at.
///
/// The first line carrying a pointer wins; the line number is dropped.
///
/// # Example
/// ```
/// use sui_e::e_locate::locate_path;
///
/// let block = "error[E01]: type mismatch\n   ┌─ sources/math.move:42:5\n";
/// assert_eq!(locate_path(block).as_deref(), Some("sources/math.move"));
/// assert_eq!(locate_path("error[E02]: no pointer here"), None);
/// ```
pub fn locate_path(text: &str) -> Option<String> {
    split_lines(text).into_iter().find_map(|line| {
        POINTER_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

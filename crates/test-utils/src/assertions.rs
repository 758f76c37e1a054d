//! Snapshot testing assertions for doclint diagnostics
//!
//! This module provides helpers for snapshot testing with insta.
//! Diagnostics are formatted consistently for readable snapshots.

use std::fmt::Display;

/// Format a list of diagnostics for snapshot testing, one per line.
///
/// # Example
///
/// ```ignore
/// use doclint_test_utils::assertions::format_diagnostics;
///
/// let diagnostics = analyzer.analyze_declaration(&declaration, Some(&comment));
/// insta::assert_snapshot!(format_diagnostics(&diagnostics));
/// ```
pub fn format_diagnostics<D: Display>(diagnostics: &[D]) -> String {
    if diagnostics.is_empty() {
        return String::from("(no diagnostics)");
    }

    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| format!("[{}] {d}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format diagnostics with their messages only (without position info).
/// Useful when you only care about the messages, not positions.
pub fn format_diagnostic_messages<T: AsRef<str>>(messages: &[T]) -> String {
    if messages.is_empty() {
        return String::from("(no diagnostics)");
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}", i + 1, m.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

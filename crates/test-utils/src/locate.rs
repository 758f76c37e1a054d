//! Source position lookup for rule tests.
//!
//! Rule tests need the exact position of tokens such as a declaration name or
//! a visibility keyword. Rather than counting columns by hand, tests locate
//! them by searching for a unique needle in the fixture source.

use doclint_syntax::{LineIndex, SourcePosition};

/// Position of the first occurrence of `needle` in `source`.
///
/// # Panics
///
/// Panics if `needle` does not occur in `source`.
pub fn position_of(source: &str, needle: &str) -> SourcePosition {
    nth_position_of(source, needle, 0)
}

/// Position of the `n`th (0-based) occurrence of `needle` in `source`.
///
/// # Panics
///
/// Panics if there are fewer than `n + 1` occurrences.
pub fn nth_position_of(source: &str, needle: &str, n: usize) -> SourcePosition {
    let offset = source
        .match_indices(needle)
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or_else(|| panic!("position_of: '{needle}' occurrence {n} not found"));
    LineIndex::new(source).position(source, offset)
}

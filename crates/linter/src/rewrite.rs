//! Whitespace-exact application of fixes to source text.
//!
//! Edits address byte ranges of the original file. Everything outside those
//! ranges is copied through untouched, so indentation, line endings and
//! comment markers survive every fix.

use crate::diagnostics::{LintDiagnostic, TextEdit};
use doclint_syntax::OffsetRange;

/// Why an edit script could not be applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error("edit range {range} is out of bounds for source of length {len}")]
    OutOfBounds { range: OffsetRange, len: usize },

    #[error("edit range {range} does not fall on character boundaries")]
    NotCharBoundary { range: OffsetRange },

    #[error("edit range {range} ends before it starts")]
    InvertedRange { range: OffsetRange },

    #[error("edit ranges {first} and {second} overlap")]
    Overlap {
        first: OffsetRange,
        second: OffsetRange,
    },
}

/// Apply `edits` to `source` in one linear pass.
///
/// Edits are ordered by `(start, end)` with a stable sort, so several
/// insertions at one offset keep their given order. Ranges may touch but
/// must not overlap.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, RewriteError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| (edit.offset_range.start, edit.offset_range.end));

    let mut previous: Option<OffsetRange> = None;
    for edit in &sorted {
        let range = edit.offset_range;
        if range.end < range.start {
            return Err(RewriteError::InvertedRange { range });
        }
        if range.end > source.len() {
            return Err(RewriteError::OutOfBounds {
                range,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
            return Err(RewriteError::NotCharBoundary { range });
        }
        if let Some(prev) = previous {
            if prev.end > range.start {
                return Err(RewriteError::Overlap {
                    first: prev,
                    second: range,
                });
            }
        }
        previous = Some(range);
    }

    let mut output = String::with_capacity(
        source.len() + sorted.iter().map(|edit| edit.new_text.len()).sum::<usize>(),
    );
    let mut cursor = 0;
    for edit in sorted {
        output.push_str(&source[cursor..edit.offset_range.start]);
        output.push_str(&edit.new_text);
        cursor = edit.offset_range.end;
    }
    output.push_str(&source[cursor..]);

    tracing::trace!(edits = edits.len(), "Applied edit script");
    Ok(output)
}

/// Apply the fixes of all `diagnostics` (those that have one) to `source`
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> Result<String, RewriteError> {
    let edits: Vec<TextEdit> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.fix.as_ref())
        .flat_map(|fix| fix.edits.iter().cloned())
        .collect();
    apply_edits(source, &edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CodeFix;
    use doclint_syntax::SourcePosition;

    #[test]
    fn test_untouched_text_is_preserved() {
        let source = "\t/// <summary>Runs.</summary>\r\n\tvoid Run();\r\n";
        let start = source.find("Runs.").unwrap();
        let end = start + "Runs.".len();
        let edits = vec![
            TextEdit::insert(end, "</para>"),
            TextEdit::insert(start, "<para>"),
        ];
        assert_eq!(
            apply_edits(source, &edits).unwrap(),
            "\t/// <summary><para>Runs.</para></summary>\r\n\tvoid Run();\r\n"
        );
    }

    #[test]
    fn test_insertions_at_one_offset_keep_order() {
        let edits = vec![TextEdit::insert(1, "b"), TextEdit::insert(1, "c")];
        assert_eq!(apply_edits("ad", &edits).unwrap(), "abcd");
    }

    #[test]
    fn test_insert_before_adjacent_delete() {
        let edits = vec![TextEdit::delete(1, 3), TextEdit::insert(1, "X"), TextEdit::insert(3, "Y")];
        assert_eq!(apply_edits("abcd", &edits).unwrap(), "aXYd");
    }

    #[test]
    fn test_overlap_is_an_error() {
        let edits = vec![TextEdit::delete(0, 3), TextEdit::new(2, 4, "x")];
        assert_eq!(
            apply_edits("abcdef", &edits),
            Err(RewriteError::Overlap {
                first: OffsetRange::new(0, 3),
                second: OffsetRange::new(2, 4),
            })
        );
    }

    #[test]
    fn test_bounds_are_checked() {
        assert!(matches!(
            apply_edits("abc", &[TextEdit::delete(1, 9)]),
            Err(RewriteError::OutOfBounds { len: 3, .. })
        ));
        assert!(matches!(
            apply_edits("é", &[TextEdit::insert(1, "x")]),
            Err(RewriteError::NotCharBoundary { .. })
        ));
        assert!(matches!(
            apply_edits("abc", &[TextEdit::delete(2, 1)]),
            Err(RewriteError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_no_edits() {
        assert_eq!(apply_edits("same", &[]).unwrap(), "same");
    }

    #[test]
    fn test_apply_fixes_merges_diagnostics() {
        let source = "<placeholder>x</placeholder>";
        let diagnostics = vec![
            LintDiagnostic::warning(SourcePosition::default(), "a", "rule")
                .with_fix(CodeFix::delete("open", 0, 13)),
            LintDiagnostic::warning(SourcePosition::default(), "b", "rule"),
            LintDiagnostic::warning(SourcePosition::default(), "c", "rule")
                .with_fix(CodeFix::delete("close", 14, 28)),
        ];
        assert_eq!(apply_fixes(source, &diagnostics).unwrap(), "x");
    }
}

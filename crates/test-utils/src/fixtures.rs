//! Shared source fixtures for documentation comment tests.
//!
//! Use these when the exact source does not matter, just that it carries a
//! realistic documentation comment. Prefer inline fixtures when the comment
//! shape is what the test is about.

use crate::locate::position_of;
use doclint_syntax::{CommentBlock, CommentMarker};

/// A documented class with a method, a property and an enum.
pub const DOCUMENTED_TYPES: &str = r#"namespace Sample
{
    /// <summary>
    /// Represents a widget.
    /// </summary>
    public class Widget
    {
        /// <summary>
        /// Gets the widget name.
        /// </summary>
        /// <value>The widget name.</value>
        public string Name { get; }

        /// <summary>
        /// Combines two widgets.
        /// </summary>
        /// <param name="other">The other widget.</param>
        /// <returns>The combined widget.</returns>
        public Widget Combine(Widget other) => this;
    }
}
"#;

/// The `///` documentation block directly above the line containing `needle`.
///
/// # Panics
///
/// Panics if `needle` does not occur in `source`.
pub fn documentation_before(source: &str, needle: &str) -> Option<CommentBlock> {
    let line = position_of(source, needle).line;
    CommentBlock::preceding(source, line, CommentMarker::Documentation)
}

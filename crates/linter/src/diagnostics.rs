use doclint_syntax::{OffsetRange, SourcePosition};

/// A text edit representing a change to apply to fix a lint issue
///
/// Offsets are byte offsets into the original source file, never into the
/// normalized comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte offset range in the file
    pub offset_range: OffsetRange,
    /// The text to replace the range with (empty string means deletion)
    pub new_text: String,
}

/// The primitive an edit performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

impl TextEdit {
    /// Create a new text edit
    #[must_use]
    pub fn new(start: usize, end: usize, new_text: impl Into<String>) -> Self {
        Self {
            offset_range: OffsetRange::new(start, end),
            new_text: new_text.into(),
        }
    }

    /// Create a deletion edit (replace range with empty string)
    #[must_use]
    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            offset_range: OffsetRange::new(start, end),
            new_text: String::new(),
        }
    }

    /// Create an insertion edit (insert text at position)
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            offset_range: OffsetRange::at(position),
            new_text: text.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EditKind {
        if self.offset_range.is_empty() {
            EditKind::Insert
        } else if self.new_text.is_empty() {
            EditKind::Delete
        } else {
            EditKind::Replace
        }
    }
}

/// A code fix that can be applied to resolve a lint diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFix {
    /// Human-readable description of what the fix does
    pub label: String,
    /// The text edits to apply, sorted by start offset and non-overlapping
    pub edits: Vec<TextEdit>,
}

impl CodeFix {
    /// Create a new code fix
    #[must_use]
    pub fn new(label: impl Into<String>, mut edits: Vec<TextEdit>) -> Self {
        edits.sort_by_key(|edit| (edit.offset_range.start, edit.offset_range.end));
        Self {
            label: label.into(),
            edits,
        }
    }

    /// Create a simple deletion fix
    #[must_use]
    pub fn delete(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            edits: vec![TextEdit::delete(start, end)],
        }
    }
}

/// A documentation diagnostic located in the original source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    /// Primary location (1-based line/column plus byte offset)
    pub location: SourcePosition,
    /// Further locations involved, e.g. the second copy of duplicated content
    pub related: Vec<SourcePosition>,
    /// Severity (from rule default or config override)
    pub severity: LintSeverity,
    /// Human-readable message
    pub message: String,
    /// Rule identifier (e.g., `"require_summary"`)
    pub rule: String,
    /// Optional auto-fix for this diagnostic
    pub fix: Option<CodeFix>,
}

impl LintDiagnostic {
    /// Create a new lint diagnostic
    #[must_use]
    pub fn new(
        location: SourcePosition,
        severity: LintSeverity,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            location,
            related: Vec::new(),
            severity,
            message: message.into(),
            rule: rule.into(),
            fix: None,
        }
    }

    /// Create a warning diagnostic
    #[must_use]
    pub fn warning(
        location: SourcePosition,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self::new(location, LintSeverity::Warning, message, rule)
    }

    /// Create a hidden diagnostic
    #[must_use]
    pub fn hidden(
        location: SourcePosition,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self::new(location, LintSeverity::Hidden, message, rule)
    }

    /// Add an auto-fix to this diagnostic
    #[must_use]
    pub fn with_fix(mut self, fix: CodeFix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Attach a related location
    #[must_use]
    pub fn with_related(mut self, location: SourcePosition) -> Self {
        self.related.push(location);
        self
    }

    /// Returns true if this diagnostic has an auto-fix available
    #[must_use]
    pub const fn has_fix(&self) -> bool {
        self.fix.is_some()
    }
}

impl std::fmt::Display for LintDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.location, self.rule, self.message)
    }
}

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintSeverity {
    Error,
    Warning,
    /// Reported to hosts but never shown by default and never configurable
    Hidden,
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Hidden => write!(f, "hidden"),
        }
    }
}

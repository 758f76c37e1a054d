//! Declaration manifest.
//!
//! The host that knows the language (compiler plugin, build task, editor)
//! writes a JSON file describing every declaration of each source file and
//! the lines of the `///` block above it:
//!
//! ```json
//! { "files": [ { "path": "src/Widget.cs", "declarations": [
//!     { "kind": "type", "typeKeyword": "class", "name": "Widget",
//!       "visibility": "public", "nameLocation": { "line": 12, "column": 18 },
//!       "comment": { "startLine": 8, "endLine": 11 } } ] } ] }
//! ```

use doclint_linter::{
    CommentBlock, CommentMarker, DeclarationDescriptor, DeclarationKind, DocumentedDeclaration,
    PropertyAccessors, SourcePosition, TypeKeyword, Visibility,
};
use doclint_syntax::LineIndex;
use serde::Deserialize;
use std::sync::Arc;

/// Why a manifest could not be turned into declarations
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Declaration {index} names parent {parent}, which is not an earlier declaration")]
    InvalidParent { index: usize, parent: usize },

    #[error("Declaration '{name}' has kind 'type' but no typeKeyword")]
    MissingTypeKeyword { name: String },

    #[error("Comment lines {start_line}-{end_line} of '{name}' are outside the file")]
    InvalidComment {
        name: String,
        start_line: usize,
        end_line: usize,
    },

    #[error("Location {line}:{column} of '{name}' is outside the file")]
    InvalidLocation {
        name: String,
        line: usize,
        column: usize,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub files: Vec<ManifestFile>,
}

impl Manifest {
    pub fn parse(contents: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestFile {
    /// Source path, relative to the manifest
    pub path: String,
    #[serde(default)]
    pub declarations: Vec<ManifestDeclaration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManifestKind {
    Type,
    Method,
    Property,
    Field,
    Event,
    Delegate,
    EnumMember,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ManifestLocation {
    /// 1-based line
    pub line: usize,
    /// 1-based character column
    pub column: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestComment {
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestAccessors {
    #[serde(default)]
    pub get: Option<Visibility>,
    #[serde(default)]
    pub set: Option<Visibility>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestDeclaration {
    pub kind: ManifestKind,
    #[serde(default)]
    pub type_keyword: Option<TypeKeyword>,
    pub name: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub has_return_value: bool,
    #[serde(default)]
    pub accessors: Option<ManifestAccessors>,
    /// Index of the enclosing declaration within the same file
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default = "default_partial_parts")]
    pub partial_parts: usize,
    pub name_location: ManifestLocation,
    /// Visibility keyword, or the declaration keyword when there is none
    #[serde(default)]
    pub keyword_location: Option<ManifestLocation>,
    #[serde(default)]
    pub comment: Option<ManifestComment>,
}

const fn default_visibility() -> Visibility {
    Visibility::Public
}

const fn default_partial_parts() -> usize {
    1
}

impl ManifestFile {
    /// Build the declarations of this file against its source text
    pub fn documented(&self, source: &str) -> Result<Vec<DocumentedDeclaration>, ManifestError> {
        let index = LineIndex::new(source);
        let mut built: Vec<Arc<DeclarationDescriptor>> = Vec::with_capacity(self.declarations.len());
        let mut documented = Vec::with_capacity(self.declarations.len());

        for (position, entry) in self.declarations.iter().enumerate() {
            let kind = match entry.kind {
                ManifestKind::Type => DeclarationKind::Type(entry.type_keyword.ok_or_else(|| {
                    ManifestError::MissingTypeKeyword {
                        name: entry.name.clone(),
                    }
                })?),
                ManifestKind::Method => DeclarationKind::Method,
                ManifestKind::Property => DeclarationKind::Property,
                ManifestKind::Field => DeclarationKind::Field,
                ManifestKind::Event => DeclarationKind::Event,
                ManifestKind::Delegate => DeclarationKind::Delegate,
                ManifestKind::EnumMember => DeclarationKind::EnumMember,
            };

            let name_location = locate(source, &index, &entry.name, entry.name_location)?;
            let keyword_location = match entry.keyword_location {
                Some(location) => locate(source, &index, &entry.name, location)?,
                None => name_location,
            };

            let mut descriptor = DeclarationDescriptor::new(kind, entry.name.clone())
                .with_parameters(entry.parameters.iter().cloned())
                .with_return_value(entry.has_return_value)
                .with_visibility(entry.visibility)
                .with_partial_parts(entry.partial_parts)
                .with_name_location(name_location)
                .with_keyword_location(keyword_location);
            if let Some(accessors) = entry.accessors {
                descriptor = descriptor.with_accessors(PropertyAccessors {
                    get: accessors.get,
                    set: accessors.set,
                });
            }
            if let Some(parent) = entry.parent {
                let parent_descriptor =
                    built
                        .get(parent)
                        .ok_or(ManifestError::InvalidParent {
                            index: position,
                            parent,
                        })?;
                descriptor = descriptor.with_parent(Arc::clone(parent_descriptor));
            }

            let comment = entry
                .comment
                .map(|comment| {
                    CommentBlock::from_source(
                        source,
                        comment.start_line,
                        comment.end_line,
                        CommentMarker::Documentation,
                    )
                    .ok_or_else(|| ManifestError::InvalidComment {
                        name: entry.name.clone(),
                        start_line: comment.start_line,
                        end_line: comment.end_line,
                    })
                })
                .transpose()?;

            let descriptor = Arc::new(descriptor);
            documented.push(DocumentedDeclaration::new((*descriptor).clone(), comment));
            built.push(descriptor);
        }

        tracing::debug!(
            path = %self.path,
            declarations = documented.len(),
            "Built declarations from manifest"
        );
        Ok(documented)
    }
}

fn locate(
    source: &str,
    index: &LineIndex,
    name: &str,
    location: ManifestLocation,
) -> Result<SourcePosition, ManifestError> {
    let offset = index
        .offset(source, location.line, location.column)
        .ok_or_else(|| ManifestError::InvalidLocation {
            name: name.to_string(),
            line: location.line,
            column: location.column,
        })?;
    Ok(SourcePosition {
        line: location.line,
        column: location.column,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "namespace Sample\n{\n    /// <summary>A widget.</summary>\n    internal class Widget\n    {\n        public int Count { get; private set; }\n    }\n}\n";

    fn manifest() -> Manifest {
        Manifest::parse(
            r#"{ "files": [ { "path": "Widget.cs", "declarations": [
                { "kind": "type", "typeKeyword": "class", "name": "Widget",
                  "visibility": "internal",
                  "nameLocation": { "line": 4, "column": 20 },
                  "keywordLocation": { "line": 4, "column": 5 },
                  "comment": { "startLine": 3, "endLine": 3 } },
                { "kind": "property", "name": "Count", "parent": 0,
                  "accessors": { "get": "public", "set": "private" },
                  "nameLocation": { "line": 6, "column": 20 } }
            ] } ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_declarations() {
        let declarations = manifest().files[0].documented(SOURCE).unwrap();
        assert_eq!(declarations.len(), 2);

        let widget = &declarations[0];
        assert_eq!(widget.declaration.name(), "Widget");
        assert_eq!(widget.declaration.keyword_location().column, 5);
        assert_eq!(widget.comment.as_ref().unwrap().lines().len(), 1);

        let count = &declarations[1];
        assert_eq!(count.declaration.kind(), DeclarationKind::Property);
        assert_eq!(count.declaration.effective_visibility(), Visibility::Internal);
        assert!(!count.declaration.is_write_only());
        assert!(count.comment.is_none());
        assert_eq!(count.declaration.name_location().offset, SOURCE.find("Count").unwrap());
    }

    #[test]
    fn test_keyword_defaults_to_name() {
        let declarations = manifest().files[0].documented(SOURCE).unwrap();
        assert_eq!(
            declarations[1].declaration.keyword_location(),
            declarations[1].declaration.name_location()
        );
    }

    #[test]
    fn test_invalid_parent() {
        let mut manifest = manifest();
        manifest.files[0].declarations[1].parent = Some(1);
        assert!(matches!(
            manifest.files[0].documented(SOURCE),
            Err(ManifestError::InvalidParent {
                index: 1,
                parent: 1
            })
        ));
    }

    #[test]
    fn test_comment_outside_file() {
        let mut manifest = manifest();
        manifest.files[0].declarations[0].comment = Some(ManifestComment {
            start_line: 7,
            end_line: 40,
        });
        assert!(matches!(
            manifest.files[0].documented(SOURCE),
            Err(ManifestError::InvalidComment { .. })
        ));
    }

    #[test]
    fn test_type_requires_keyword() {
        let mut manifest = manifest();
        manifest.files[0].declarations[0].type_keyword = None;
        assert!(matches!(
            manifest.files[0].documented(SOURCE),
            Err(ManifestError::MissingTypeKeyword { .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Manifest::parse(r#"{ "files": [], "extra": 1 }"#);
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }
}

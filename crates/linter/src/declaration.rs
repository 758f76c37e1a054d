//! Read-only view of the host's declaration model.
//!
//! Rules never see the host's symbol table directly. They receive a
//! [`DeclarationInfo`] and ask it for exactly what they need: kind, name,
//! parameters, visibility and the locations diagnostics are reported at.

use doclint_syntax::SourcePosition;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Keyword that introduces a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKeyword {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
}

/// The shape of a documented declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Type(TypeKeyword),
    Method,
    Property,
    Field,
    Event,
    Delegate,
    EnumMember,
}

impl DeclarationKind {
    /// Human-readable name used in diagnostic messages
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Type(TypeKeyword::Class) => "class",
            Self::Type(TypeKeyword::Struct) => "struct",
            Self::Type(TypeKeyword::Interface) => "interface",
            Self::Type(TypeKeyword::Enum) => "enumeration",
            Self::Type(TypeKeyword::Record) => "record",
            Self::Method => "method",
            Self::Property => "property",
            Self::Field => "field",
            Self::Event => "event",
            Self::Delegate => "delegate",
            Self::EnumMember => "enumeration item",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Declared accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    PrivateProtected,
    Internal,
    Protected,
    ProtectedInternal,
    Public,
}

/// Which documentation setting governs a visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityScope {
    /// Visible outside the assembly (`public`, `protected`, `protected internal`)
    Exposed,
    /// Visible only inside the assembly
    Internal,
    Private,
}

impl Visibility {
    /// The accessibility left when a member with `self` is nested in a
    /// container with `outer`: the intersection of both domains.
    #[must_use]
    pub const fn combine(self, outer: Self) -> Self {
        use Visibility::{Internal, Private, PrivateProtected, Protected, ProtectedInternal, Public};
        match (self, outer) {
            (Private, _) | (_, Private) => Private,
            (Public, other) | (other, Public) => other,
            (PrivateProtected, _)
            | (_, PrivateProtected)
            | (Internal, Protected)
            | (Protected, Internal) => PrivateProtected,
            (Internal, Internal | ProtectedInternal) | (ProtectedInternal, Internal) => Internal,
            (Protected, Protected | ProtectedInternal) | (ProtectedInternal, Protected) => {
                Protected
            }
            (ProtectedInternal, ProtectedInternal) => ProtectedInternal,
        }
    }

    #[must_use]
    pub const fn scope(self) -> VisibilityScope {
        match self {
            Self::Public | Self::Protected | Self::ProtectedInternal => VisibilityScope::Exposed,
            Self::Internal | Self::PrivateProtected => VisibilityScope::Internal,
            Self::Private => VisibilityScope::Private,
        }
    }
}

/// Accessor visibility of a property; `None` means the accessor is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyAccessors {
    pub get: Option<Visibility>,
    pub set: Option<Visibility>,
}

/// The capability rules consume to learn about a declaration
pub trait DeclarationInfo: Send + Sync {
    fn kind(&self) -> DeclarationKind;

    fn name(&self) -> &str;

    /// Parameter names in declaration order
    fn parameters(&self) -> &[String];

    fn has_return_value(&self) -> bool;

    /// Declared visibility of the declaration itself
    fn visibility(&self) -> Visibility;

    /// Most restrictive visibility along the parent chain
    fn effective_visibility(&self) -> Visibility;

    /// Property accessors; `None` for anything that is not a property
    fn accessors(&self) -> Option<PropertyAccessors>;

    /// Number of parts of a partial declaration (1 when not partial)
    fn partial_parts(&self) -> usize;

    /// Location of the name token
    fn name_location(&self) -> SourcePosition;

    /// Location of the visibility keyword or, absent one, the declaration keyword
    fn keyword_location(&self) -> SourcePosition;

    /// A property whose getter is absent, or private while the property
    /// itself is more visible.
    fn is_write_only(&self) -> bool {
        let Some(accessors) = self.accessors() else {
            return false;
        };
        if accessors.set.is_none() {
            return false;
        }
        match accessors.get {
            None => true,
            Some(Visibility::Private) => self.visibility() != Visibility::Private,
            Some(_) => false,
        }
    }
}

/// Owned declaration description, the provided [`DeclarationInfo`] implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationDescriptor {
    kind: DeclarationKind,
    name: String,
    parameters: Vec<String>,
    has_return_value: bool,
    visibility: Visibility,
    accessors: Option<PropertyAccessors>,
    parent: Option<Arc<DeclarationDescriptor>>,
    partial_parts: usize,
    name_location: SourcePosition,
    keyword_location: SourcePosition,
}

impl DeclarationDescriptor {
    /// A public, non-partial declaration with no parameters and no return value
    #[must_use]
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            parameters: Vec::new(),
            has_return_value: false,
            visibility: Visibility::Public,
            accessors: None,
            parent: None,
            partial_parts: 1,
            name_location: SourcePosition::default(),
            keyword_location: SourcePosition::default(),
        }
    }

    #[must_use]
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_return_value(mut self, has_return_value: bool) -> Self {
        self.has_return_value = has_return_value;
        self
    }

    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub const fn with_accessors(mut self, accessors: PropertyAccessors) -> Self {
        self.accessors = Some(accessors);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Arc<Self>) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub const fn with_partial_parts(mut self, parts: usize) -> Self {
        self.partial_parts = parts;
        self
    }

    #[must_use]
    pub const fn with_name_location(mut self, location: SourcePosition) -> Self {
        self.name_location = location;
        self
    }

    #[must_use]
    pub const fn with_keyword_location(mut self, location: SourcePosition) -> Self {
        self.keyword_location = location;
        self
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }
}

impl DeclarationInfo for DeclarationDescriptor {
    fn kind(&self) -> DeclarationKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[String] {
        &self.parameters
    }

    fn has_return_value(&self) -> bool {
        self.has_return_value
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn effective_visibility(&self) -> Visibility {
        let mut visibility = self.visibility;
        let mut parent = self.parent.as_deref();
        while let Some(outer) = parent {
            visibility = visibility.combine(outer.visibility);
            parent = outer.parent.as_deref();
        }
        visibility
    }

    fn accessors(&self) -> Option<PropertyAccessors> {
        self.accessors
    }

    fn partial_parts(&self) -> usize {
        self.partial_parts
    }

    fn name_location(&self) -> SourcePosition {
        self.name_location
    }

    fn keyword_location(&self) -> SourcePosition {
        self.keyword_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(
            DeclarationKind::Type(TypeKeyword::Enum).description(),
            "enumeration"
        );
        assert_eq!(DeclarationKind::EnumMember.to_string(), "enumeration item");
        assert_eq!(DeclarationKind::Type(TypeKeyword::Class).to_string(), "class");
    }

    #[test]
    fn test_combine_is_intersection() {
        use Visibility::{Internal, Private, Protected, ProtectedInternal, PrivateProtected, Public};
        assert_eq!(Public.combine(Internal), Internal);
        assert_eq!(Protected.combine(Internal), PrivateProtected);
        assert_eq!(ProtectedInternal.combine(Protected), Protected);
        assert_eq!(ProtectedInternal.combine(Internal), Internal);
        assert_eq!(Public.combine(Private), Private);
        assert_eq!(Public.combine(Public), Public);
    }

    #[test]
    fn test_effective_visibility_walks_parents() {
        let outer = Arc::new(
            DeclarationDescriptor::new(DeclarationKind::Type(TypeKeyword::Class), "Outer")
                .with_visibility(Visibility::Internal),
        );
        let inner = Arc::new(
            DeclarationDescriptor::new(DeclarationKind::Type(TypeKeyword::Class), "Inner")
                .with_parent(outer),
        );
        let method = DeclarationDescriptor::new(DeclarationKind::Method, "Run").with_parent(inner);

        assert_eq!(method.visibility(), Visibility::Public);
        assert_eq!(method.effective_visibility(), Visibility::Internal);
        assert_eq!(method.effective_visibility().scope(), VisibilityScope::Internal);
    }

    #[test]
    fn test_write_only_properties() {
        let setter_only = DeclarationDescriptor::new(DeclarationKind::Property, "Value")
            .with_accessors(PropertyAccessors {
                get: None,
                set: Some(Visibility::Public),
            });
        assert!(setter_only.is_write_only());

        let private_getter = DeclarationDescriptor::new(DeclarationKind::Property, "Value")
            .with_accessors(PropertyAccessors {
                get: Some(Visibility::Private),
                set: Some(Visibility::Public),
            });
        assert!(private_getter.is_write_only());

        let private_property = private_getter.clone().with_visibility(Visibility::Private);
        assert!(!private_property.is_write_only());

        let read_write = DeclarationDescriptor::new(DeclarationKind::Property, "Value")
            .with_accessors(PropertyAccessors {
                get: Some(Visibility::Public),
                set: Some(Visibility::Public),
            });
        assert!(!read_write.is_write_only());

        let method = DeclarationDescriptor::new(DeclarationKind::Method, "Run");
        assert!(!method.is_write_only());
    }
}

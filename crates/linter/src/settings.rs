use crate::declaration::{DeclarationKind, Visibility, VisibilityScope};

/// Placeholder substituted with the company name in the copyright template
pub const COMPANY_NAME_TOKEN: &str = "{companyName}";

/// Analyzer settings shared by every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerSettings {
    /// Expected `company` attribute of the file header
    pub company_name: Option<String>,
    /// Expected copyright text; may contain `{companyName}`
    pub copyright_text: Option<String>,
    /// Header lines equal to this decoration are ignored
    pub header_decoration: Option<String>,
    /// `false` disables every file header rule
    pub xml_header: bool,
    pub document_exposed_elements: bool,
    pub document_internal_elements: bool,
    pub document_private_elements: bool,
    pub document_private_fields: bool,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            company_name: None,
            copyright_text: None,
            header_decoration: None,
            xml_header: true,
            document_exposed_elements: true,
            document_internal_elements: true,
            document_private_elements: false,
            document_private_fields: false,
        }
    }
}

impl AnalyzerSettings {
    /// The copyright text a header must carry, with the company substituted.
    ///
    /// `None` when no template is configured, or when the template refers to
    /// the company name and none is configured.
    #[must_use]
    pub fn expected_copyright(&self) -> Option<String> {
        let template = self.copyright_text.as_deref()?;
        if template.contains(COMPANY_NAME_TOKEN) {
            let company = self.company_name.as_deref()?;
            Some(template.replace(COMPANY_NAME_TOKEN, company))
        } else {
            Some(template.to_string())
        }
    }

    /// Whether an undocumented declaration of this kind and effective
    /// visibility must be reported.
    #[must_use]
    pub const fn requires_documentation(
        &self,
        kind: DeclarationKind,
        visibility: Visibility,
    ) -> bool {
        match visibility.scope() {
            VisibilityScope::Exposed => self.document_exposed_elements,
            VisibilityScope::Internal => self.document_internal_elements,
            VisibilityScope::Private => match kind {
                DeclarationKind::Field => self.document_private_fields,
                _ => self.document_private_elements,
            },
        }
    }

    /// Whether a comment line is a configured header decoration line
    #[must_use]
    pub fn is_decoration(&self, content: &str) -> bool {
        self.header_decoration.as_deref().is_some_and(|decoration| {
            !decoration.trim().is_empty() && content.trim() == decoration.trim()
        })
    }
}

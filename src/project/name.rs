//! Legacy element names and namespace-aware matching.

use xot::Node;

use super::tree::Document;

/// Namespace of every element in a pre-SDK project file.
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

pub const REFERENCE: &str = "Reference";
pub const HINT_PATH: &str = "HintPath";
pub const COMPILE: &str = "Compile";
pub const IMPORT: &str = "Import";
pub const PROJECT_REFERENCE: &str = "ProjectReference";
pub const PACKAGE_REFERENCE: &str = "PackageReference";
pub const TARGET: &str = "Target";
pub const ERROR_TEXT: &str = "ErrorText";
pub const ITEM_GROUP: &str = "ItemGroup";
pub const PROPERTY_GROUP: &str = "PropertyGroup";
pub const TARGET_FRAMEWORK: &str = "TargetFramework";
pub const VERSION: &str = "Version";

pub const INCLUDE_ATTR: &str = "Include";
pub const PROJECT_ATTR: &str = "Project";
pub const NAME_ATTR: &str = "Name";
pub const SDK_ATTR: &str = "Sdk";
pub const TOOLS_VERSION_ATTR: &str = "ToolsVersion";

/// Matches elements by local name within the legacy namespace.
///
/// Elements without a namespace match too, so trees that were already
/// stripped of the legacy namespace go through the same stages.
#[derive(Debug, Clone)]
pub struct Matcher {
    namespace: String,
}

impl Matcher {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether the name `(local, uri)` is `expected` in the legacy namespace
    /// or unqualified.
    pub fn is(&self, (local, uri): (&str, &str), expected: &str) -> bool {
        local == expected && (uri.is_empty() || uri == self.namespace)
    }

    /// Whether `node` is an element named `local`.
    pub fn is_node(&self, doc: &Document, node: Node, local: &str) -> bool {
        doc.element_name(node).is_some_and(|name| self.is(name, local))
    }

    /// Attached descendants of `node` named `local`, snapshotted in document order.
    pub fn descendants(&self, doc: &Document, node: Node, local: &str) -> Vec<Node> {
        doc.descendants(node)
            .into_iter()
            .filter(|&d| self.is_node(doc, d, local))
            .collect()
    }

    /// First direct child element named `local`.
    pub fn first_child(&self, doc: &Document, node: Node, local: &str) -> Option<Node> {
        doc.child_elements(node).find(|&c| self.is_node(doc, c, local))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MSBUILD_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::load::parse_document;

    #[test]
    fn test_matcher_accepts_legacy_and_unqualified() {
        let m = Matcher::default();
        assert!(m.is((COMPILE, MSBUILD_NAMESPACE), COMPILE));
        assert!(m.is((COMPILE, ""), COMPILE));
    }

    #[test]
    fn test_matcher_rejects_foreign_namespace() {
        let m = Matcher::default();
        assert!(!m.is((COMPILE, "urn:other"), COMPILE));
        assert!(!m.is(("Content", ""), COMPILE));
    }

    #[test]
    fn test_matcher_on_parsed_tree() {
        let doc = parse_document(&format!(
            r#"<Project xmlns="{MSBUILD_NAMESPACE}"><ItemGroup><Compile/><o:Compile xmlns:o="urn:other"/></ItemGroup></Project>"#
        ))
        .unwrap();
        let m = Matcher::default();
        assert_eq!(m.descendants(&doc, doc.root(), COMPILE).len(), 1);
        let group = m.first_child(&doc, doc.root(), ITEM_GROUP).unwrap();
        assert!(m.is_node(&doc, group, ITEM_GROUP));
        assert!(m.first_child(&doc, group, REFERENCE).is_none());
    }
}

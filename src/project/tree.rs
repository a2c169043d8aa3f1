//! Project documents held in a `xot` tree.
//!
//! [`Document`] owns the [`Xot`] arena for one file along with the handles of
//! the document node and its root element. Stages walk the tree through
//! [`Document::xot`] or the helpers below.
//!
//! Edits only ever detach nodes, never free them, so handles snapshotted
//! before an edit stay valid for the rest of the migration.

use std::fmt;

use xot::{NameId, Node, PrefixId, Value, Xot};

use super::error::DocumentError;

/// The `<?xml ...?>` declaration, as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// One parsed XML file.
pub struct Document {
    xot: Xot,
    node: Node,
    root: Node,
    pub declaration: Option<Declaration>,
}

impl Document {
    /// Wrap a parsed document node.
    pub fn new(xot: Xot, node: Node, declaration: Option<Declaration>) -> Result<Self, DocumentError> {
        let root = xot
            .children(node)
            .find(|&child| xot.is_element(child))
            .ok_or(DocumentError::MissingRoot)?;
        Ok(Self {
            xot,
            node,
            root,
            declaration,
        })
    }

    #[inline]
    pub fn xot(&self) -> &Xot {
        &self.xot
    }

    #[inline]
    pub fn xot_mut(&mut self) -> &mut Xot {
        &mut self.xot
    }

    /// The document node: prolog comments, the root element, epilog.
    #[inline]
    pub fn node(&self) -> Node {
        self.node
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> Node {
        self.root
    }

    // ------------------------------------------------------------------------
    // Names and values
    // ------------------------------------------------------------------------

    /// Local name and namespace URI of an element. The URI is empty for
    /// unqualified names.
    pub fn element_name(&self, node: Node) -> Option<(&str, &str)> {
        self.xot
            .element(node)
            .map(|element| self.xot.name_ns_str(element.name()))
    }

    pub fn local_name(&self, node: Node) -> Option<&str> {
        self.element_name(node).map(|(local, _)| local)
    }

    /// Unqualified attribute value; `None` for non-elements.
    pub fn attr(&self, node: Node, name: &str) -> Option<&str> {
        if !self.xot.is_element(node) {
            return None;
        }
        let name = self.xot.name(name)?;
        self.xot.attributes(node).get(name).map(String::as_str)
    }

    /// Set an unqualified attribute, replacing an existing value.
    pub fn set_attr(&mut self, node: Node, name: &str, value: &str) {
        let name = self.xot.add_name(name);
        self.xot.attributes_mut(node).insert(name, value.to_string());
    }

    /// Remove every attribute and namespace declaration of `node`, returning
    /// how many went.
    pub fn clear_attributes(&mut self, node: Node) -> usize {
        let names: Vec<NameId> = self.xot.attributes(node).keys().collect();
        let prefixes: Vec<PrefixId> = self.xot.namespaces(node).keys().collect();

        {
            let mut attributes = self.xot.attributes_mut(node);
            for &name in &names {
                attributes.remove(name);
            }
        }
        let mut namespaces = self.xot.namespaces_mut(node);
        for &prefix in &prefixes {
            namespaces.remove(prefix);
        }
        names.len() + prefixes.len()
    }

    /// Element, text, comment and processing-instruction children, in order.
    pub fn content_children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.xot.children(node).filter(|&child| {
            matches!(
                self.xot.value(child),
                Value::Element(_) | Value::Text(_) | Value::Comment(_) | Value::ProcessingInstruction(_)
            )
        })
    }

    /// Child nodes that are elements, in order.
    pub fn child_elements(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.xot
            .children(node)
            .filter(|&child| self.xot.is_element(child))
    }

    /// Snapshot of the descendants of `node` in document order, excluding it.
    pub fn descendants(&self, node: Node) -> Vec<Node> {
        self.xot
            .descendants(node)
            .filter(|&descendant| descendant != node)
            .collect()
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self, node: Node) -> String {
        self.xot
            .descendants(node)
            .filter_map(|descendant| self.xot.text_str(descendant))
            .collect()
    }

    /// Whether `node` is a text node made only of whitespace.
    pub fn is_whitespace(&self, node: Node) -> bool {
        self.xot
            .text_str(node)
            .is_some_and(|text| text.chars().all(char::is_whitespace))
    }

    /// Whether `node` is still reachable from the root element.
    pub fn is_attached(&self, node: Node) -> bool {
        std::iter::successors(Some(node), |&n| self.xot.parent(n)).any(|n| n == self.root)
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Create a detached, unqualified element.
    pub fn new_element(&mut self, local: &str) -> Node {
        let name = self.xot.add_name(local);
        self.xot.new_element(name)
    }

    /// Append `child` as the last child of `parent`, moving it if attached.
    pub fn append(&mut self, parent: Node, child: Node) -> Result<(), DocumentError> {
        if self.xot.parent(child).is_some() {
            self.xot.detach(child)?;
        }
        self.xot.append(parent, child)?;
        Ok(())
    }

    /// Create `<local>text</local>` under `parent`.
    pub fn append_text_element(
        &mut self,
        parent: Node,
        local: &str,
        text: &str,
    ) -> Result<Node, DocumentError> {
        let element = self.new_element(local);
        let text = self.xot.new_text(text);
        self.xot.append(element, text)?;
        self.append(parent, element)?;
        Ok(element)
    }

    /// Detach `node` together with a preceding whitespace-only sibling.
    ///
    /// The node stays usable and can be appended elsewhere.
    pub fn remove(&mut self, node: Node) -> Result<(), DocumentError> {
        if let Some(previous) = self.xot.previous_sibling(node)
            && self.is_whitespace(previous)
        {
            self.xot.detach(previous)?;
        }
        self.xot.detach(node)?;
        Ok(())
    }

    /// Detach every content child of `node`. Attributes stay.
    pub fn clear_children(&mut self, node: Node) -> Result<(), DocumentError> {
        let children: Vec<Node> = self.content_children(node).collect();
        for child in children {
            self.xot.detach(child)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.element_name(self.root))
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

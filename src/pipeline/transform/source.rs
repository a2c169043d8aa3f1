//! `Compile` item classification.
//!
//! SDK-style projects glob source files implicitly, so most explicit
//! `Compile` entries go away. Items carrying metadata (`DependentUpon`,
//! `Link`, ...) still need an explicit entry and are collected into their
//! own `ItemGroup` at the root.

use xot::Node;

use super::super::{StageState, Transform, TransformRules};
use crate::project::name::{COMPILE, INCLUDE_ATTR, ITEM_GROUP};
use crate::project::{Document, DocumentError};

/// How a single `Compile` item is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceItem {
    /// Marked as tool-generated: removed.
    Generated,
    /// Has child elements: relocated into the source-items group.
    Complex,
    /// Bare include of a globbed extension: removed.
    Implicit,
    /// Anything else: left in place.
    Keep,
}

/// Removes or relocates `Compile` items.
pub struct SourceItemPruner<'a> {
    rules: &'a TransformRules,
}

impl<'a> SourceItemPruner<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }

    /// Classify one item. Checks run in order; the first match wins.
    pub fn classify(&self, doc: &Document, item: Node) -> SourceItem {
        let matcher = &self.rules.matcher;
        if !matcher
            .descendants(doc, item, &self.rules.generated_marker)
            .is_empty()
        {
            SourceItem::Generated
        } else if doc.child_elements(item).next().is_some() {
            SourceItem::Complex
        } else if doc
            .attr(item, INCLUDE_ATTR)
            .is_some_and(|include| self.rules.is_source_file(include))
        {
            SourceItem::Implicit
        } else {
            SourceItem::Keep
        }
    }
}

impl Transform for SourceItemPruner<'_> {
    const NAME: &'static str = "source-items";

    fn transform(
        &self,
        doc: &mut Document,
        state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let root = doc.root();
        let items = self.rules.matcher.descendants(doc, root, COMPILE);
        let mut group = None;
        let mut touched = 0;

        for item in items {
            if !doc.is_attached(item) {
                continue;
            }
            match self.classify(doc, item) {
                SourceItem::Generated | SourceItem::Implicit => {
                    doc.remove(item)?;
                    touched += 1;
                }
                SourceItem::Complex => {
                    let target = match group {
                        Some(target) => target,
                        None => {
                            let created = doc.new_element(ITEM_GROUP);
                            doc.append(root, created)?;
                            state.pin(created);
                            *group.insert(created)
                        }
                    };
                    doc.remove(item)?;
                    doc.append(target, item)?;
                    touched += 1;
                }
                SourceItem::Keep => {}
            }
        }
        Ok(touched)
    }
}

//! Legacy `Import` removal.

use super::super::{StageState, Transform, TransformRules};
use super::remove_attached;
use crate::project::{Document, DocumentError};
use crate::project::name::{IMPORT, PROJECT_ATTR};

/// Removes imports of build scripts the SDK already provides.
pub struct LegacyImportPruner<'a> {
    rules: &'a TransformRules,
}

impl<'a> LegacyImportPruner<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for LegacyImportPruner<'_> {
    const NAME: &'static str = "legacy-imports";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let legacy: Vec<_> = self
            .rules
            .matcher
            .descendants(doc, doc.root(), IMPORT)
            .into_iter()
            .filter(|&import| {
                doc.attr(import, PROJECT_ATTR)
                    .is_some_and(|project| self.rules.is_legacy_import(project))
            })
            .collect();
        remove_attached(doc, legacy)
    }
}

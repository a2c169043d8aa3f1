//! Root attribute normalization.

use super::super::{StageState, Transform, TransformRules};
use crate::project::{Document, DocumentError};
use crate::project::name::{SDK_ATTR, TOOLS_VERSION_ATTR};

/// Replaces the root attributes with the SDK and tools-version markers.
pub struct RootNormalizer<'a> {
    rules: &'a TransformRules,
}

impl<'a> RootNormalizer<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for RootNormalizer<'_> {
    const NAME: &'static str = "root";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let root = doc.root();
        let removed = doc.clear_attributes(root);
        doc.set_attr(root, SDK_ATTR, &self.rules.sdk);
        doc.set_attr(root, TOOLS_VERSION_ATTR, &self.rules.tools_version);
        Ok(removed)
    }
}

//! Restore-guard target and stale `ErrorText` removal.

use super::super::{StageState, Transform, TransformRules};
use super::remove_attached;
use crate::project::{Document, DocumentError};
use crate::project::name::{ERROR_TEXT, NAME_ATTR, TARGET};

/// Removes the target that only enforced packages.config restore.
pub struct RestoreGuardRemover<'a> {
    rules: &'a TransformRules,
}

impl<'a> RestoreGuardRemover<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for RestoreGuardRemover<'_> {
    const NAME: &'static str = "restore-guard";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let guards: Vec<_> = self
            .rules
            .matcher
            .descendants(doc, doc.root(), TARGET)
            .into_iter()
            .filter(|&target| {
                doc.attr(target, NAME_ATTR) == Some(self.rules.restore_guard_target.as_str())
            })
            .collect();
        remove_attached(doc, guards)
    }
}

/// Removes every `ErrorText` placeholder.
pub struct ErrorTextRemover<'a> {
    rules: &'a TransformRules,
}

impl<'a> ErrorTextRemover<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for ErrorTextRemover<'_> {
    const NAME: &'static str = "error-text";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let texts = self.rules.matcher.descendants(doc, doc.root(), ERROR_TEXT);
        remove_attached(doc, texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{count, legacy_project};

    const GUARD: &str = r#"<Target Name="EnsureNuGetPackageBuildImports" BeforeTargets="PrepareForBuild">
    <PropertyGroup>
      <ErrorText>This project references NuGet package(s) that are missing on this computer.</ErrorText>
    </PropertyGroup>
    <Error Condition="!Exists('..\packages\x.targets')" Text="$([System.String]::Format('$(ErrorText)', 'x'))" />
  </Target>
  <Target Name="AfterBuild" />
  <PropertyGroup>
    <ErrorText>stray</ErrorText>
  </PropertyGroup>"#;

    #[test]
    fn test_restore_guard_removed() {
        let mut doc = legacy_project(GUARD);
        let rules = TransformRules::default();
        let removed = RestoreGuardRemover::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        assert_eq!(removed, 1);
        let targets = rules.matcher.descendants(&doc, doc.root(), TARGET);
        assert_eq!(targets.len(), 1);
        assert_eq!(doc.attr(targets[0], NAME_ATTR), Some("AfterBuild"));
    }

    #[test]
    fn test_error_text_removed_everywhere() {
        let mut doc = legacy_project(GUARD);
        let rules = TransformRules::default();
        let removed = ErrorTextRemover::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(count(&doc, ERROR_TEXT), 0);
    }
}

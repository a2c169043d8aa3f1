//! `Reference` and `ProjectReference` cleanup.

use super::super::{StageState, Transform, TransformRules};
use super::remove_attached;
use crate::project::{Document, DocumentError};
use crate::project::name::{HINT_PATH, PROJECT_REFERENCE, REFERENCE};

/// Drops binary references whose hint path resolves into the package cache.
///
/// Those binaries come back as package references, so the `Reference` is
/// redundant. References without a hint path, or with one elsewhere, stay.
pub struct PackageCacheReferencePruner<'a> {
    rules: &'a TransformRules,
}

impl<'a> PackageCacheReferencePruner<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for PackageCacheReferencePruner<'_> {
    const NAME: &'static str = "package-cache-references";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let matcher = &self.rules.matcher;
        let cached: Vec<_> = matcher
            .descendants(doc, doc.root(), REFERENCE)
            .into_iter()
            .filter(|&reference| {
                matcher
                    .first_child(doc, reference, HINT_PATH)
                    .is_some_and(|hint| self.rules.is_package_cache_path(&doc.text_content(hint)))
            })
            .collect();
        remove_attached(doc, cached)
    }
}

/// Strips the metadata children (`Project`, `Name`, ...) of project references.
pub struct ProjectReferenceSimplifier<'a> {
    rules: &'a TransformRules,
}

impl<'a> ProjectReferenceSimplifier<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for ProjectReferenceSimplifier<'_> {
    const NAME: &'static str = "project-references";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let references = self
            .rules
            .matcher
            .descendants(doc, doc.root(), PROJECT_REFERENCE);

        let mut simplified = 0;
        for reference in references {
            if doc.child_elements(reference).next().is_some() {
                simplified += 1;
            }
            doc.clear_children(reference)?;
        }
        Ok(simplified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{count, legacy_project};
    use crate::project::name::INCLUDE_ATTR;

    #[test]
    fn test_package_cache_reference_removed() {
        let mut doc = legacy_project(
            r#"<ItemGroup>
    <Reference Include="Foo">
      <HintPath>..\packages\Foo.1.0\lib\Foo.dll</HintPath>
    </Reference>
    <Reference Include="Bar">
      <HintPath>..\lib\Bar.dll</HintPath>
    </Reference>
    <Reference Include="System" />
  </ItemGroup>"#,
        );
        let rules = TransformRules::default();
        let removed = PackageCacheReferencePruner::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        assert_eq!(removed, 1);
        let left: Vec<_> = rules
            .matcher
            .descendants(&doc, doc.root(), REFERENCE)
            .into_iter()
            .filter_map(|r| doc.attr(r, INCLUDE_ATTR).map(str::to_string))
            .collect();
        assert_eq!(left, ["Bar", "System"]);
    }

    #[test]
    fn test_removed_reference_takes_its_indentation() {
        let mut doc = legacy_project(
            r#"<ItemGroup>
    <Reference Include="Foo"><HintPath>..\packages\Foo\Foo.dll</HintPath></Reference>
  </ItemGroup>"#,
        );
        let rules = TransformRules::default();
        PackageCacheReferencePruner::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        let group = doc.child_elements(doc.root()).next().unwrap();
        // only the whitespace before </ItemGroup> is left
        let left: Vec<_> = doc.content_children(group).collect();
        assert_eq!(left.len(), 1);
        assert!(doc.is_whitespace(left[0]));
    }

    #[test]
    fn test_project_reference_children_removed() {
        let mut doc = legacy_project(
            r#"<ItemGroup>
    <ProjectReference Include="..\Lib\Lib.csproj">
      <Project>{6f3c0e42-0000-0000-0000-000000000000}</Project>
      <Name>Lib</Name>
    </ProjectReference>
    <ProjectReference Include="..\Other\Other.csproj" />
  </ItemGroup>"#,
        );
        let rules = TransformRules::default();
        let simplified = ProjectReferenceSimplifier::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        assert_eq!(simplified, 1);
        for reference in rules.matcher.descendants(&doc, doc.root(), PROJECT_REFERENCE) {
            assert_eq!(doc.content_children(reference).count(), 0);
            assert!(doc.attr(reference, INCLUDE_ATTR).is_some());
        }
        assert_eq!(count(&doc, "Name"), 0);
    }
}

//! `ItemGroup` and `PropertyGroup` consolidation.
//!
//! Both stages build one fresh group, move the qualifying content of every
//! existing group into it, discard the originals and append the new group at
//! the root. `ItemGroup`s pinned by earlier stages are left alone.

use super::super::{StageState, Transform, TransformRules};
use crate::project::name::{
    ITEM_GROUP, PACKAGE_REFERENCE, PROJECT_REFERENCE, PROPERTY_GROUP, REFERENCE, TARGET_FRAMEWORK,
};
use crate::project::{Document, DocumentError};

/// Items carried into the consolidated `ItemGroup`, in this order per group.
const REFERENCE_ITEMS: [&str; 3] = [REFERENCE, PROJECT_REFERENCE, PACKAGE_REFERENCE];

/// Gathers references from every `ItemGroup` into a single one.
///
/// Other item kinds left in those groups are discarded with them.
pub struct ReferenceGroupConsolidator<'a> {
    rules: &'a TransformRules,
}

impl<'a> ReferenceGroupConsolidator<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for ReferenceGroupConsolidator<'_> {
    const NAME: &'static str = "reference-groups";

    fn transform(
        &self,
        doc: &mut Document,
        state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let matcher = &self.rules.matcher;
        let root = doc.root();
        let united = doc.new_element(ITEM_GROUP);
        let mut moved = 0;

        for group in matcher.descendants(doc, root, ITEM_GROUP) {
            if !doc.is_attached(group) || state.is_pinned(group) {
                continue;
            }
            for kind in REFERENCE_ITEMS {
                for item in matcher.descendants(doc, group, kind) {
                    doc.remove(item)?;
                    doc.append(united, item)?;
                    moved += 1;
                }
            }
            doc.remove(group)?;
        }

        doc.append(root, united)?;
        Ok(moved)
    }
}

/// Merges every `PropertyGroup` into one.
///
/// The merged group opens with the configured target framework unless the
/// project already sets `TargetFramework`, in which case that property is
/// carried over like any other.
pub struct PropertyGroupConsolidator<'a> {
    rules: &'a TransformRules,
}

impl<'a> PropertyGroupConsolidator<'a> {
    pub fn new(rules: &'a TransformRules) -> Self {
        Self { rules }
    }
}

impl Transform for PropertyGroupConsolidator<'_> {
    const NAME: &'static str = "property-groups";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let matcher = &self.rules.matcher;
        let root = doc.root();
        let groups = matcher.descendants(doc, root, PROPERTY_GROUP);

        let united = doc.new_element(PROPERTY_GROUP);
        let has_framework = groups
            .iter()
            .any(|&group| matcher.first_child(doc, group, TARGET_FRAMEWORK).is_some());
        if !has_framework {
            doc.append_text_element(united, TARGET_FRAMEWORK, &self.rules.target_framework)?;
        }

        let mut moved = 0;
        for group in groups {
            if !doc.is_attached(group) {
                continue;
            }
            let properties: Vec<_> = doc.child_elements(group).collect();
            for property in properties {
                doc.append(united, property)?;
                moved += 1;
            }
            doc.remove(group)?;
        }

        doc.append(root, united)?;
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use xot::Node;

    use super::*;
    use crate::pipeline::tests::{count, legacy_project};
    use crate::project::name::INCLUDE_ATTR;

    fn root_groups(doc: &Document, local: &str) -> Vec<Node> {
        let matcher = TransformRules::default().matcher;
        doc.child_elements(doc.root())
            .filter(|&node| matcher.is_node(doc, node, local))
            .collect()
    }

    fn properties(doc: &Document, group: Node) -> Vec<(String, String)> {
        doc.child_elements(group)
            .map(|node| {
                (
                    doc.local_name(node).unwrap().to_string(),
                    doc.text_content(node),
                )
            })
            .collect()
    }

    fn consolidate_properties(doc: &mut Document) -> usize {
        let rules = TransformRules::default();
        PropertyGroupConsolidator::new(&rules)
            .transform(doc, &mut StageState::default())
            .unwrap()
    }

    #[test]
    fn test_references_consolidated_per_group_order() {
        let mut doc = legacy_project(
            r#"<ItemGroup>
    <ProjectReference Include="..\A\A.csproj" />
    <Reference Include="System" />
    <None Include="app.config" />
  </ItemGroup>
  <ItemGroup>
    <Reference Include="System.Xml" />
  </ItemGroup>"#,
        );
        let rules = TransformRules::default();
        let moved = ReferenceGroupConsolidator::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        assert_eq!(moved, 3);
        let groups = root_groups(&doc, ITEM_GROUP);
        assert_eq!(groups.len(), 1);
        let includes: Vec<_> = doc
            .child_elements(groups[0])
            .filter_map(|node| doc.attr(node, INCLUDE_ATTR))
            .collect();
        assert_eq!(includes, ["System", r"..\A\A.csproj", "System.Xml"]);
        assert_eq!(count(&doc, "None"), 0);
    }

    #[test]
    fn test_pinned_group_survives_consolidation() {
        let mut doc = legacy_project(r#"<ItemGroup><Reference Include="System" /></ItemGroup>"#);
        let root = doc.root();
        let pinned = doc.new_element(ITEM_GROUP);
        doc.append(root, pinned).unwrap();
        let mut state = StageState::default();
        state.pin(pinned);

        let rules = TransformRules::default();
        ReferenceGroupConsolidator::new(&rules)
            .transform(&mut doc, &mut state)
            .unwrap();

        let groups = root_groups(&doc, ITEM_GROUP);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], pinned);
    }

    #[test]
    fn test_empty_reference_group_still_emitted() {
        let mut doc = legacy_project("");
        let rules = TransformRules::default();
        ReferenceGroupConsolidator::new(&rules)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();

        let groups = root_groups(&doc, ITEM_GROUP);
        assert_eq!(groups.len(), 1);
        assert_eq!(doc.child_elements(groups[0]).count(), 0);
    }

    #[test]
    fn test_properties_merged_after_target_framework() {
        let mut doc = legacy_project(
            r#"<PropertyGroup>
    <OutputType>Library</OutputType>
    <RootNamespace>Foo</RootNamespace>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">
    <DebugSymbols>true</DebugSymbols>
  </PropertyGroup>"#,
        );
        assert_eq!(consolidate_properties(&mut doc), 3);

        let groups = root_groups(&doc, PROPERTY_GROUP);
        assert_eq!(groups.len(), 1);
        let names: Vec<_> = properties(&doc, groups[0])
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, [TARGET_FRAMEWORK, "OutputType", "RootNamespace", "DebugSymbols"]);
        assert_eq!(properties(&doc, groups[0])[0].1, "net47");
    }

    #[test]
    fn test_existing_target_framework_kept() {
        let mut doc = legacy_project(
            "<PropertyGroup><TargetFramework>netstandard2.0</TargetFramework><OutputType>Library</OutputType></PropertyGroup>",
        );
        assert_eq!(consolidate_properties(&mut doc), 2);

        let group = root_groups(&doc, PROPERTY_GROUP)[0];
        assert_eq!(
            properties(&doc, group),
            [
                (TARGET_FRAMEWORK.to_string(), "netstandard2.0".to_string()),
                ("OutputType".to_string(), "Library".to_string()),
            ]
        );
    }

    #[test]
    fn test_target_framework_in_later_group_suppresses_seed() {
        let mut doc = legacy_project(
            r#"<PropertyGroup><OutputType>Exe</OutputType></PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)' == 'Release' ">
    <TargetFramework>net48</TargetFramework>
  </PropertyGroup>"#,
        );
        assert_eq!(consolidate_properties(&mut doc), 2);

        assert_eq!(count(&doc, TARGET_FRAMEWORK), 1);
        let group = root_groups(&doc, PROPERTY_GROUP)[0];
        assert_eq!(properties(&doc, group)[1].1, "net48");
    }
}

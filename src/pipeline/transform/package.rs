//! `PackageReference` emission.

use super::super::{StageState, Transform};
use crate::manifest::PackageEntry;
use crate::project::name::{INCLUDE_ATTR, ITEM_GROUP, PACKAGE_REFERENCE, VERSION};
use crate::project::{Document, DocumentError};

/// Appends one `ItemGroup` holding a `PackageReference` per manifest entry,
/// in manifest order.
pub struct PackageReferenceEmitter<'a> {
    packages: &'a [PackageEntry],
}

impl<'a> PackageReferenceEmitter<'a> {
    pub fn new(packages: &'a [PackageEntry]) -> Self {
        Self { packages }
    }
}

impl Transform for PackageReferenceEmitter<'_> {
    const NAME: &'static str = "package-references";

    fn transform(
        &self,
        doc: &mut Document,
        _state: &mut StageState,
    ) -> Result<usize, DocumentError> {
        let root = doc.root();
        let group = doc.new_element(ITEM_GROUP);

        for package in self.packages {
            let reference = doc.new_element(PACKAGE_REFERENCE);
            doc.set_attr(reference, INCLUDE_ATTR, &package.id);
            doc.append_text_element(reference, VERSION, &package.version)?;
            doc.append(group, reference)?;
        }

        doc.append(root, group)?;
        Ok(self.packages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::legacy_project;

    #[test]
    fn test_packages_emitted_in_manifest_order() {
        let packages = [
            PackageEntry::new("Zeta", "2.0.0"),
            PackageEntry::new("Alpha", "1.0.0"),
            PackageEntry::new("Zeta", "2.0.0"),
        ];
        let mut doc = legacy_project("");
        let emitted = PackageReferenceEmitter::new(&packages)
            .transform(&mut doc, &mut StageState::default())
            .unwrap();
        assert_eq!(emitted, 3);

        let group = doc.child_elements(doc.root()).last().unwrap();
        let emitted: Vec<_> = doc
            .child_elements(group)
            .map(|id| {
                let version = doc.child_elements(id).next().unwrap();
                (
                    doc.attr(id, INCLUDE_ATTR).unwrap().to_string(),
                    doc.text_content(version),
                )
            })
            .collect();
        assert_eq!(
            emitted,
            [
                ("Zeta".to_string(), "2.0.0".to_string()),
                ("Alpha".to_string(), "1.0.0".to_string()),
                ("Zeta".to_string(), "2.0.0".to_string()),
            ]
        );
    }
}

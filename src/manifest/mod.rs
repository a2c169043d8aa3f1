//! `packages.config` reading.
//!
//! ```xml
//! <packages>
//!   <package id="Newtonsoft.Json" version="10.0.3" targetFramework="net47" />
//! </packages>
//! ```
//!
//! Entries keep their file order, duplicates included. Attributes other than
//! `id` and `version` are ignored.

use thiserror::Error;

use crate::project::{Document, DocumentError, load_document};

const PACKAGE: &str = "package";
const ID_ATTR: &str = "id";
const VERSION_ATTR: &str = "version";

/// One `<package>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub id: String,
    pub version: String,
}

impl PackageEntry {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// `index` counts `<package>` entries from zero.
    #[error("package entry {index} has no `{attribute}` attribute")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },
}

/// Decode and read a manifest file's bytes.
pub fn load_manifest(bytes: &[u8]) -> Result<Vec<PackageEntry>, ManifestError> {
    entries(&load_document(bytes)?)
}

fn entries(doc: &Document) -> Result<Vec<PackageEntry>, ManifestError> {
    doc.child_elements(doc.root())
        .filter(|&node| doc.local_name(node) == Some(PACKAGE))
        .enumerate()
        .map(|(index, node)| -> Result<PackageEntry, ManifestError> {
            let attr = |attribute: &'static str| {
                doc.attr(node, attribute)
                    .map(str::to_string)
                    .ok_or(ManifestError::MissingAttribute { index, attribute })
            };
            Ok(PackageEntry {
                id: attr(ID_ATTR)?,
                version: attr(VERSION_ATTR)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::load::parse_document;

    fn parse_manifest(text: &str) -> Result<Vec<PackageEntry>, ManifestError> {
        entries(&parse_document(text)?)
    }

    #[test]
    fn test_parse_manifest_in_order() {
        let packages = parse_manifest(
            r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="Newtonsoft.Json" version="10.0.3" targetFramework="net47" />
  <!-- pinned -->
  <package id="Castle.Core" version="4.2.1" targetFramework="net47" />
  <package id="Newtonsoft.Json" version="10.0.3" />
</packages>"#,
        )
        .unwrap();

        assert_eq!(
            packages,
            [
                PackageEntry::new("Newtonsoft.Json", "10.0.3"),
                PackageEntry::new("Castle.Core", "4.2.1"),
                PackageEntry::new("Newtonsoft.Json", "10.0.3"),
            ]
        );
    }

    #[test]
    fn test_empty_manifest() {
        assert!(parse_manifest("<packages />").unwrap().is_empty());
    }

    #[test]
    fn test_missing_version() {
        let err = parse_manifest(
            r#"<packages><package id="A" version="1.0" /><package id="B" /></packages>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingAttribute {
                index: 1,
                attribute: "version"
            }
        ));
        assert_eq!(err.to_string(), "package entry 1 has no `version` attribute");
    }

    #[test]
    fn test_missing_id() {
        let err = parse_manifest(r#"<packages><package version="1.0" /></packages>"#).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingAttribute { index: 0, attribute: "id" }
        ));
    }

    #[test]
    fn test_malformed_manifest() {
        let err = parse_manifest("<packages><package id=\"A\"").unwrap_err();
        assert!(matches!(err, ManifestError::Document(_)));
    }

    #[test]
    fn test_load_manifest_utf16() {
        let text = r#"<packages><package id="A" version="1.0" /></packages>"#;
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        assert_eq!(load_manifest(&bytes).unwrap(), [PackageEntry::new("A", "1.0")]);
    }
}

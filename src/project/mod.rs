//! Project documents: a `xot` tree loaded from and saved back to XML.
//!
//! | Module    | Purpose                                             |
//! |-----------|-----------------------------------------------------|
//! | `tree`    | `Document` wrapper over a `xot` tree                |
//! | `name`    | Legacy element names and the namespace `Matcher`    |
//! | `load`    | Byte decoding, declaration split, `xot` parsing     |
//! | `save`    | Re-indenting `quick-xml` serializer, line endings   |
//! | `cleanup` | Text fixups on the serialized output                |
//! | `error`   | `DocumentError`                                     |

pub mod cleanup;
pub mod error;
pub mod load;
pub mod name;
pub mod save;
pub mod tree;

use anyhow::Result;

use crate::config::OutputConfig;

pub use error::DocumentError;
pub use load::load_document;
pub use name::Matcher;
pub use save::LineEnding;
pub use tree::Document;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize a migrated project into the bytes written to disk.
///
/// The legacy `namespace` declaration is stripped from the text, whatever
/// the transform left on the tree.
pub fn render_project(doc: &Document, output: &OutputConfig, namespace: &str) -> Result<Vec<u8>> {
    let text = save::serialize_document(doc, output.indent)?;
    let text = cleanup::tidy(&text, namespace);
    let text = save::normalize_line_endings(&text, output.line_ending);

    let mut bytes = Vec::with_capacity(text.len() + UTF8_BOM.len());
    if output.bom {
        bytes.extend_from_slice(UTF8_BOM);
    }
    bytes.extend_from_slice(text.as_bytes());
    Ok(bytes)
}

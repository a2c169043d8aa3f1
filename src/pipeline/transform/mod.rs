//! Project transform stages.
//!
//! One [`Transform`](super::Transform) per pipeline stage:
//!
//! - `root`: root attribute normalization
//! - `reference`: package-cache `Reference` pruning, `ProjectReference` metadata removal
//! - `source`: `Compile` item classification
//! - `import`: legacy `Import` denylist
//! - `target`: restore-guard target and `ErrorText` removal
//! - `group`: `ItemGroup` / `PropertyGroup` consolidation
//! - `package`: `PackageReference` emission

mod group;
mod import;
mod package;
mod reference;
mod root;
mod source;
mod target;

pub use group::{PropertyGroupConsolidator, ReferenceGroupConsolidator};
pub use import::LegacyImportPruner;
pub use package::PackageReferenceEmitter;
pub use reference::{PackageCacheReferencePruner, ProjectReferenceSimplifier};
pub use root::RootNormalizer;
pub use source::SourceItemPruner;
pub use target::{ErrorTextRemover, RestoreGuardRemover};

use xot::Node;

use crate::project::{Document, DocumentError};

/// Remove every still-attached node in `nodes`, returning how many went.
fn remove_attached(
    doc: &mut Document,
    nodes: impl IntoIterator<Item = Node>,
) -> Result<usize, DocumentError> {
    let mut removed = 0;
    for node in nodes {
        if doc.is_attached(node) {
            doc.remove(node)?;
            removed += 1;
        }
    }
    Ok(removed)
}

//! Project discovery under the migration root.

use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use crate::config::DiscoveryConfig;
use crate::debug;

/// A project file and the manifest path expected next to it.
///
/// The manifest may not exist; that project is then skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub project: PathBuf,
    pub manifest: PathBuf,
}

impl ProjectFile {
    pub fn new(project: PathBuf, manifest_name: &str) -> Self {
        let manifest = project
            .parent()
            .map(|dir| dir.join(manifest_name))
            .unwrap_or_else(|| PathBuf::from(manifest_name));
        Self { project, manifest }
    }
}

/// Recursively collect project files under `root` in a stable, sorted order.
///
/// Hidden files and directories are walked like any other. The extension is
/// compared ASCII case-insensitively.
pub fn find_projects(root: &Path, discovery: &DiscoveryConfig) -> Vec<ProjectFile> {
    WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|entry| {
            entry
                .inspect_err(|e| debug!("scan"; "skipping unreadable entry: {}", e))
                .ok()
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| has_extension(path, &discovery.project_extension))
        .map(|path| ProjectFile::new(path, &discovery.manifest_name))
        .collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

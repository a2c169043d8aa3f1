//! `[discovery]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [discovery]
//! project_extension = "csproj"         # Matched case-insensitively
//! manifest_name = "packages.config"    # Sibling of the project file
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_EXTENSION: &str = "csproj";
pub const DEFAULT_MANIFEST_NAME: &str = "packages.config";

/// Which files the directory walk picks up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Project file extension, without the dot.
    pub project_extension: String,

    /// Manifest file name looked up next to each project.
    pub manifest_name: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            project_extension: DEFAULT_PROJECT_EXTENSION.to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
        }
    }
}

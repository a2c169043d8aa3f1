//! `[rules]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [rules]
//! package_cache_marker = '\packages\'      # HintPath segment of restored binaries
//! generated_marker = "AutoGen"             # Compile metadata marking generated code
//! source_extensions = [".cs", ".resx"]     # Includes the SDK globs implicitly
//! legacy_imports = ["NuGet.targets"]       # Imports removed by suffix
//! restore_guard_target = "EnsureNuGetPackageBuildImports"
//! ```

use serde::{Deserialize, Serialize};

use crate::pipeline::rules::{
    DEFAULT_GENERATED_MARKER, DEFAULT_LEGACY_IMPORTS, DEFAULT_PACKAGE_CACHE_MARKER,
    DEFAULT_RESTORE_GUARD_TARGET, DEFAULT_SOURCE_EXTENSIONS,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub package_cache_marker: String,
    pub generated_marker: String,
    pub source_extensions: Vec<String>,
    pub legacy_imports: Vec<String>,
    pub restore_guard_target: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            package_cache_marker: DEFAULT_PACKAGE_CACHE_MARKER.to_string(),
            generated_marker: DEFAULT_GENERATED_MARKER.to_string(),
            source_extensions: DEFAULT_SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            legacy_imports: DEFAULT_LEGACY_IMPORTS.iter().map(|s| s.to_string()).collect(),
            restore_guard_target: DEFAULT_RESTORE_GUARD_TARGET.to_string(),
        }
    }
}

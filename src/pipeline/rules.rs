//! Data the transform stages match against.
//!
//! Defaults reproduce the stock packages.config → PackageReference migration;
//! every value can be overridden from `pkgref.toml`.

use crate::config::MigrateConfig;
use crate::project::Matcher;
use crate::project::name::MSBUILD_NAMESPACE;

pub const DEFAULT_SDK: &str = "Microsoft.NET.Sdk";
pub const DEFAULT_TOOLS_VERSION: &str = "15.0";
pub const DEFAULT_TARGET_FRAMEWORK: &str = "net47";
pub const DEFAULT_PACKAGE_CACHE_MARKER: &str = r"\packages\";
pub const DEFAULT_GENERATED_MARKER: &str = "AutoGen";
pub const DEFAULT_RESTORE_GUARD_TARGET: &str = "EnsureNuGetPackageBuildImports";

/// Include extensions that the SDK globs pick up on their own.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[".cs", ".resx"];

/// Imports that SDK-style projects get implicitly or no longer need.
pub const DEFAULT_LEGACY_IMPORTS: &[&str] = &[
    "Microsoft.Common.props",
    "Microsoft.CSharp.targets",
    "NuGet.targets",
    "WebApplication.targets",
    "Microsoft.TestTools.targets",
];

/// Everything the pipeline needs besides the tree and the packages.
#[derive(Debug, Clone)]
pub struct TransformRules {
    pub matcher: Matcher,
    pub sdk: String,
    pub tools_version: String,
    pub target_framework: String,
    /// Hint-path segment identifying binaries restored into the package cache.
    pub package_cache_marker: String,
    /// Element marking a `Compile` item as designer-generated.
    pub generated_marker: String,
    pub source_extensions: Vec<String>,
    pub legacy_imports: Vec<String>,
    pub restore_guard_target: String,
}

impl TransformRules {
    /// Whether a hint path points into the package cache.
    ///
    /// Forward slashes count as backslashes.
    pub fn is_package_cache_path(&self, hint_path: &str) -> bool {
        let marker = self.package_cache_marker.replace('/', "\\");
        hint_path.replace('/', "\\").contains(&marker)
    }

    /// Whether an `Include` path is a source or resource file.
    pub fn is_source_file(&self, include: &str) -> bool {
        self.source_extensions.iter().any(|ext| include.ends_with(ext.as_str()))
    }

    /// Whether an `Import` project path is on the legacy denylist.
    pub fn is_legacy_import(&self, project: &str) -> bool {
        self.legacy_imports.iter().any(|name| project.ends_with(name.as_str()))
    }
}

impl Default for TransformRules {
    fn default() -> Self {
        Self {
            matcher: Matcher::new(MSBUILD_NAMESPACE),
            sdk: DEFAULT_SDK.to_string(),
            tools_version: DEFAULT_TOOLS_VERSION.to_string(),
            target_framework: DEFAULT_TARGET_FRAMEWORK.to_string(),
            package_cache_marker: DEFAULT_PACKAGE_CACHE_MARKER.to_string(),
            generated_marker: DEFAULT_GENERATED_MARKER.to_string(),
            source_extensions: DEFAULT_SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            legacy_imports: DEFAULT_LEGACY_IMPORTS.iter().map(|s| s.to_string()).collect(),
            restore_guard_target: DEFAULT_RESTORE_GUARD_TARGET.to_string(),
        }
    }
}

impl From<&MigrateConfig> for TransformRules {
    fn from(config: &MigrateConfig) -> Self {
        let project = &config.project;
        let rules = &config.rules;
        Self {
            matcher: Matcher::new(project.namespace.clone()),
            sdk: project.sdk.clone(),
            tools_version: project.tools_version.clone(),
            target_framework: project.target_framework.clone(),
            package_cache_marker: rules.package_cache_marker.clone(),
            generated_marker: rules.generated_marker.clone(),
            source_extensions: rules.source_extensions.clone(),
            legacy_imports: rules.legacy_imports.clone(),
            restore_guard_target: rules.restore_guard_target.clone(),
        }
    }
}

//! `[project]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [project]
//! namespace = "http://schemas.microsoft.com/developer/msbuild/2003"
//! sdk = "Microsoft.NET.Sdk"
//! tools_version = "15.0"
//! target_framework = "net47"
//! ```

use serde::{Deserialize, Serialize};

use crate::pipeline::rules::{DEFAULT_SDK, DEFAULT_TARGET_FRAMEWORK, DEFAULT_TOOLS_VERSION};
use crate::project::name::MSBUILD_NAMESPACE;

/// Markers written onto the migrated project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Namespace of legacy project elements.
    pub namespace: String,

    /// Value of the root `Sdk` attribute.
    pub sdk: String,

    /// Value of the root `ToolsVersion` attribute.
    pub tools_version: String,

    /// Framework moniker seeded into the consolidated `PropertyGroup`.
    pub target_framework: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            namespace: MSBUILD_NAMESPACE.to_string(),
            sdk: DEFAULT_SDK.to_string(),
            tools_version: DEFAULT_TOOLS_VERSION.to_string(),
            target_framework: DEFAULT_TARGET_FRAMEWORK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_project_config() {
        let config = test_parse_config(
            "[project]\nsdk = \"Microsoft.NET.Sdk.Web\"\ntarget_framework = \"net48\"",
        );
        assert_eq!(config.project.sdk, "Microsoft.NET.Sdk.Web");
        assert_eq!(config.project.target_framework, "net48");
        assert_eq!(config.project.tools_version, "15.0");
    }

    #[test]
    fn test_project_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.project.sdk, "Microsoft.NET.Sdk");
        assert_eq!(
            config.project.namespace,
            "http://schemas.microsoft.com/developer/msbuild/2003"
        );
    }
}

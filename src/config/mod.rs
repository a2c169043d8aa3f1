//! Migration configuration for `pkgref.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── project    # [project]
//! │   ├── rules      # [rules]
//! │   ├── discovery  # [discovery]
//! │   └── output     # [output]
//! ├── types/         # ConfigError, diagnostics, field paths
//! └── mod.rs         # MigrateConfig (this file)
//! ```
//!
//! The file is optional. Without one, every section takes its defaults and
//! the tool behaves like the stock migration.

pub mod section;
pub mod types;

pub use section::{DiscoveryConfig, OutputConfig, ProjectConfig, RulesConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::Cli;
use crate::debug;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "pkgref.toml";

/// Deepest indentation accepted in `[output]`.
const MAX_INDENT: usize = 16;

// ============================================================================
// root configuration
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Config file the values came from, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory walked for projects (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl MigrateConfig {
    /// Load configuration for the root and config path given on the command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to get current working directory")?,
        };
        Ok(Self::load_from(&root, cli.config.as_deref())?)
    }

    /// Resolve and load the config for `root`.
    ///
    /// An explicit path must exist; the implicit `pkgref.toml` is optional.
    pub fn load_from(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Some(root.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
        };

        let mut config = match &path {
            Some(path) => {
                debug!("config"; "loading {}", path.display());
                Self::from_path(path)?
            }
            None => Self::default(),
        };
        config.config_path = path;
        config.root = root.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Read a config file, rejecting fields no section knows.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            return Err(ConfigError::UnknownFields(path.to_path_buf(), ignored));
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check values that parse but cannot drive a migration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        let required = [
            (FieldPath::new("project.sdk"), &self.project.sdk),
            (FieldPath::new("project.tools_version"), &self.project.tools_version),
            (FieldPath::new("project.target_framework"), &self.project.target_framework),
            (FieldPath::new("rules.package_cache_marker"), &self.rules.package_cache_marker),
            (FieldPath::new("rules.generated_marker"), &self.rules.generated_marker),
            (FieldPath::new("discovery.project_extension"), &self.discovery.project_extension),
            (FieldPath::new("discovery.manifest_name"), &self.discovery.manifest_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                diag.error(field, "must not be empty");
            }
        }

        for ext in &self.rules.source_extensions {
            if !ext.starts_with('.') {
                diag.error_with_hint(
                    FieldPath::new("rules.source_extensions"),
                    format!("`{ext}` does not start with a dot"),
                    format!("write \".{ext}\""),
                );
            }
        }

        if self.discovery.project_extension.starts_with('.') {
            diag.error_with_hint(
                FieldPath::new("discovery.project_extension"),
                "extension is written without the dot",
                format!(
                    "write \"{}\"",
                    self.discovery.project_extension.trim_start_matches('.')
                ),
            );
        }

        if self.discovery.manifest_name.contains(['/', '\\']) {
            diag.error(
                FieldPath::new("discovery.manifest_name"),
                "must be a file name, not a path",
            );
        }

        if self.output.indent > MAX_INDENT {
            diag.error(
                FieldPath::new("output.indent"),
                format!("{} exceeds the maximum of {MAX_INDENT}", self.output.indent),
            );
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Parse a config snippet for section tests, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> MigrateConfig {
    let (parsed, ignored) = MigrateConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = MigrateConfig::parse_with_ignored("[project\nsdk = \"x\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[rules]\nsource_extension = [\".cs\"]\n[unknown_section]\nfield = 1";
        let (_, ignored) = MigrateConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f == "rules.source_extension"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = MigrateConfig::load_from(dir.path(), None).unwrap();
        assert!(config.config_path.is_none());
        assert_eq!(config.root, dir.path());
        assert_eq!(config.project.target_framework, "net47");
    }

    #[test]
    fn test_load_implicit_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[project]\ntarget_framework = \"net48\"",
        )
        .unwrap();

        let config = MigrateConfig::load_from(dir.path(), None).unwrap();
        assert_eq!(config.project.target_framework, "net48");
        assert_eq!(config.config_path, Some(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("custom.toml");
        let result = MigrateConfig::load_from(dir.path(), Some(&missing));
        assert!(matches!(result, Err(ConfigError::NotFound(path)) if path == missing));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[output]\nindnet = 4").unwrap();

        let result = MigrateConfig::load_from(dir.path(), Some(&path));
        assert!(
            matches!(&result, Err(ConfigError::UnknownFields(_, fields)) if fields == &["output.indnet"]),
            "{result:?}"
        );
    }

    #[test]
    fn test_validate_defaults() {
        assert!(MigrateConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = MigrateConfig::default();
        config.project.sdk = String::new();
        config.rules.source_extensions = vec!["cs".to_string()];
        config.discovery.project_extension = ".csproj".to_string();
        config.discovery.manifest_name = "nuget/packages.config".to_string();
        config.output.indent = 40;

        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "project.sdk",
                "rules.source_extensions",
                "discovery.project_extension",
                "discovery.manifest_name",
                "output.indent",
            ]
        );
    }
}

//! Migration driver: one project at a time, then a batch over the root.
//!
//! Per project, everything is read and transformed before anything is
//! written. The project file is replaced through a temporary file in its own
//! directory, and the manifest is deleted only once that succeeded.

mod report;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::config::MigrateConfig;
use crate::discover::{ProjectFile, find_projects};
use crate::logger::ProgressLine;
use crate::manifest::load_manifest;
use crate::pipeline::{self, TransformRules, TransformSummary};
use crate::project::{load_document, render_project};
use crate::utils::path::{display_relative, normalize_path};
use crate::utils::plural_count;
use crate::{debug, log};

pub use report::MigrationReport;

/// What happened to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rewritten, manifest deleted.
    Migrated {
        packages: usize,
        summary: TransformSummary,
    },
    /// Transformed in memory only.
    DryRun {
        packages: usize,
        summary: TransformSummary,
    },
    /// No manifest next to the project.
    Skipped,
}

/// Batch behavior switches taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub fail_fast: bool,
}

/// Replaces a project file with its rendered bytes.
type WriteFn = fn(&Path, &[u8]) -> Result<()>;

/// Migrates single projects with one set of rules.
pub struct Migrator<'a> {
    config: &'a MigrateConfig,
    rules: TransformRules,
    dry_run: bool,
    write: WriteFn,
}

impl<'a> Migrator<'a> {
    pub fn new(config: &'a MigrateConfig, dry_run: bool) -> Self {
        Self {
            config,
            rules: TransformRules::from(config),
            dry_run,
            write: replace_file,
        }
    }

    #[cfg(test)]
    fn with_writer(mut self, write: WriteFn) -> Self {
        self.write = write;
        self
    }

    /// Migrate one project and its sibling manifest.
    pub fn migrate(&self, file: &ProjectFile) -> Result<Outcome> {
        if !file.manifest.is_file() {
            return Ok(Outcome::Skipped);
        }

        let manifest = fs::read(&file.manifest)
            .with_context(|| format!("failed to read {}", file.manifest.display()))?;
        let packages = load_manifest(&manifest)
            .with_context(|| format!("invalid manifest {}", file.manifest.display()))?;

        let source = fs::read(&file.project)
            .with_context(|| format!("failed to read {}", file.project.display()))?;
        let mut doc = load_document(&source)
            .with_context(|| format!("invalid project {}", file.project.display()))?;

        let summary = pipeline::transform(&mut doc, &packages, &self.rules)
            .with_context(|| format!("failed to transform {}", file.project.display()))?;
        debug!("stage"; "{}: {}", file.project.display(), summary);

        let output = render_project(&doc, &self.config.output, self.rules.matcher.namespace())
            .with_context(|| format!("failed to serialize {}", file.project.display()))?;

        if self.dry_run {
            return Ok(Outcome::DryRun {
                packages: packages.len(),
                summary,
            });
        }

        (self.write)(&file.project, &output)
            .with_context(|| format!("failed to write {}", file.project.display()))?;
        fs::remove_file(&file.manifest)
            .with_context(|| format!("failed to delete {}", file.manifest.display()))?;

        Ok(Outcome::Migrated {
            packages: packages.len(),
            summary,
        })
    }
}

/// Atomically replace `path` with `contents`, keeping its permissions.
fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Migrate every project under the configured root.
///
/// Failures are recorded and the batch continues, unless `fail_fast` is set,
/// in which case the first error is returned.
pub fn run(config: &MigrateConfig, options: RunOptions) -> Result<MigrationReport> {
    let root = normalize_path(&config.root);
    let projects = find_projects(&root, &config.discovery);
    let mut report = MigrationReport::new(options.dry_run);

    if projects.is_empty() {
        log!("scan"; "no project files found in {}", root.display());
        return Ok(report);
    }
    log!("scan"; "found {}", plural_count(projects.len(), "project"));

    let migrator = Migrator::new(config, options.dry_run);
    let progress = ProgressLine::new("migrate", projects.len());

    for file in &projects {
        let name = display_relative(&file.project, &root);
        match migrator.migrate(file) {
            Ok(Outcome::Migrated { packages, .. }) => {
                log!("migrate"; "{} ({})", name, plural_count(packages, "package"));
                report.migrated(name, packages);
            }
            Ok(Outcome::DryRun { packages, summary }) => {
                log!("dry-run"; "{} ({}; {})", name, plural_count(packages, "package"), summary);
                report.migrated(name, packages);
            }
            Ok(Outcome::Skipped) => {
                debug!("skip"; "{}: no {}", name, config.discovery.manifest_name);
                report.skipped(name);
            }
            Err(err) if options.fail_fast => {
                progress.finish();
                return Err(err);
            }
            Err(err) => {
                log!("error"; "{}: {:#}", name, err);
                report.failed(name, format!("{err:#}"));
            }
        }
        progress.inc();
    }

    progress.finish();
    report.print();
    log!("done"; "{}", report);
    Ok(report)
}

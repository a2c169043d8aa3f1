//! Batch migration report.

use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A project that could not be migrated.
#[derive(Debug, Clone)]
pub struct MigrationFailure {
    pub project: String,
    pub reason: String,
}

/// Per-project results of one batch, in walk order.
#[derive(Debug, Default)]
pub struct MigrationReport {
    dry_run: bool,
    migrated: Vec<(String, usize)>,
    skipped: Vec<String>,
    failures: Vec<MigrationFailure>,
}

impl MigrationReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn migrated(&mut self, project: String, packages: usize) {
        self.migrated.push((project, packages));
    }

    pub fn skipped(&mut self, project: String) {
        self.skipped.push(project);
    }

    pub fn failed(&mut self, project: String, reason: String) {
        self.failures.push(MigrationFailure { project, reason });
    }

    pub fn migrated_count(&self) -> usize {
        self.migrated.len()
    }

    #[cfg(test)]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Package references emitted across all migrated projects.
    pub fn package_count(&self) -> usize {
        self.migrated.iter().map(|(_, n)| n).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    #[cfg(test)]
    pub fn failures(&self) -> &[MigrationFailure] {
        &self.failures
    }

    /// Print the failed projects to stderr.
    pub fn print(&self) {
        if self.failures.is_empty() {
            return;
        }
        eprintln!();

        let count = self.failures.len();
        eprintln!(
            "{} {}",
            "failed".red().bold(),
            format!("({count} project{})", plural_s(count)).dimmed()
        );
        for failure in &self.failures {
            eprintln!("{}{}{}", "[".dimmed(), failure.project.cyan(), "]".dimmed());
            eprintln!("{} {}", "→".red(), failure.reason);
        }
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "would migrate" } else { "migrated" };
        let migrated = self.migrated_count();
        let packages = self.package_count();
        write!(
            f,
            "{} {} {}",
            verb,
            migrated.to_string().green().bold(),
            format!(
                "project{} ({packages} package{})",
                plural_s(migrated),
                plural_s(packages)
            )
            .dimmed()
        )?;

        if !self.skipped.is_empty() {
            write!(f, ", {} skipped", self.skipped.len())?;
        }
        if self.has_failures() {
            write!(
                f,
                ", {} {}",
                self.failures.len().to_string().red().bold(),
                "failed".red()
            )?;
        }
        Ok(())
    }
}

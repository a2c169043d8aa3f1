//! Project transform pipeline.
//!
//! Converts a legacy project tree into SDK style through a fixed sequence of
//! in-place edits. Later stages rely on earlier cleanups having run, so the
//! order below is part of the contract:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ root → package-cache-references → source-items               │
//! │      → legacy-imports → project-references → restore-guard   │
//! │      → error-text → reference-groups → property-groups       │
//! │      → package-references                                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage snapshots the nodes it matches before editing. Missing
//! structure simply means nothing to do; only a rejected tree edit fails a
//! stage, and the stages after it are skipped.

pub mod rules;
pub mod transform;

use std::fmt;

use thiserror::Error;
use xot::Node;

use crate::manifest::PackageEntry;
use crate::project::{Document, DocumentError};

pub use rules::TransformRules;
pub use transform::{
    ErrorTextRemover, LegacyImportPruner, PackageCacheReferencePruner, PackageReferenceEmitter,
    ProjectReferenceSimplifier, PropertyGroupConsolidator, ReferenceGroupConsolidator,
    RestoreGuardRemover, RootNormalizer, SourceItemPruner,
};

/// Stage names in execution order.
pub const STAGES: [&str; 10] = [
    "root",
    "package-cache-references",
    "source-items",
    "legacy-imports",
    "project-references",
    "restore-guard",
    "error-text",
    "reference-groups",
    "property-groups",
    "package-references",
];

// =============================================================================
// Transform trait
// =============================================================================

/// A single in-place edit of a project tree.
pub trait Transform {
    /// Stage name, as listed in [`STAGES`].
    const NAME: &'static str;

    /// Apply the edit. Returns how many nodes were touched.
    fn transform(
        &self,
        doc: &mut Document,
        state: &mut StageState,
    ) -> Result<usize, DocumentError>;
}

/// A stage whose tree edit was rejected.
#[derive(Debug, Error)]
#[error("stage `{stage}` failed")]
pub struct StageError {
    pub stage: &'static str,
    #[source]
    pub source: DocumentError,
}

/// State handed from one stage to the next.
#[derive(Debug, Default)]
pub struct StageState {
    pinned: Vec<Node>,
}

impl StageState {
    /// Keep `node` out of later group consolidation.
    pub fn pin(&mut self, node: Node) {
        if !self.pinned.contains(&node) {
            self.pinned.push(node);
        }
    }

    pub fn is_pinned(&self, node: Node) -> bool {
        self.pinned.contains(&node)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs transforms against one document, recording what each touched.
///
/// After a stage fails, later stages are not applied and [`finish`](Self::finish)
/// returns that failure.
pub struct Pipeline<'d> {
    doc: &'d mut Document,
    state: StageState,
    summary: TransformSummary,
    failed: Option<StageError>,
}

impl<'d> Pipeline<'d> {
    pub fn new(doc: &'d mut Document) -> Self {
        Self {
            doc,
            state: StageState::default(),
            summary: TransformSummary::default(),
            failed: None,
        }
    }

    /// Apply `stage` and record its count.
    pub fn pipe<T: Transform>(mut self, stage: T) -> Self {
        if self.failed.is_some() {
            return self;
        }
        match stage.transform(self.doc, &mut self.state) {
            Ok(touched) => self.summary.stages.push((T::NAME, touched)),
            Err(source) => {
                self.failed = Some(StageError {
                    stage: T::NAME,
                    source,
                })
            }
        }
        self
    }

    pub fn finish(self) -> Result<TransformSummary, StageError> {
        match self.failed {
            Some(err) => Err(err),
            None => Ok(self.summary),
        }
    }
}

/// Per-stage counts of a finished pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransformSummary {
    stages: Vec<(&'static str, usize)>,
}

impl TransformSummary {
    /// Stage names in the order they ran.
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|(name, _)| *name).collect()
    }

    /// Nodes touched by the stage called `name`.
    #[cfg(test)]
    pub fn touched(&self, name: &str) -> Option<usize> {
        self.stages
            .iter()
            .find(|(stage, _)| *stage == name)
            .map(|(_, n)| *n)
    }
}

impl fmt::Display for TransformSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .stages
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(name, n)| format!("{name}({n})"))
            .collect();
        if parts.is_empty() {
            f.write_str("no changes")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// Run every stage over `doc`, emitting `packages` as package references.
pub fn transform(
    doc: &mut Document,
    packages: &[PackageEntry],
    rules: &TransformRules,
) -> Result<TransformSummary, StageError> {
    let summary = Pipeline::new(doc)
        .pipe(RootNormalizer::new(rules))
        .pipe(PackageCacheReferencePruner::new(rules))
        .pipe(SourceItemPruner::new(rules))
        .pipe(LegacyImportPruner::new(rules))
        .pipe(ProjectReferenceSimplifier::new(rules))
        .pipe(RestoreGuardRemover::new(rules))
        .pipe(ErrorTextRemover::new(rules))
        .pipe(ReferenceGroupConsolidator::new(rules))
        .pipe(PropertyGroupConsolidator::new(rules))
        .pipe(PackageReferenceEmitter::new(packages))
        .finish()?;
    debug_assert_eq!(summary.names(), STAGES);
    Ok(summary)
}

//! Sequential read → transform → write loop over a fixed file list.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::rules::RuleSet;
use crate::error::{Error, Result};
use crate::local_files::{self, FileSystem};

/// What happened to one path in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Path did not exist.
    Skipped,
    /// No rule matched; nothing written.
    Unchanged,
    /// Content changed (and was written, unless in check mode).
    Changed,
    Failed { reason: String },
}

impl FileOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// What to do after a file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Halt,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Write,
    /// Report what would change without touching any file.
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of one pass over the file list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fixed_count: usize,
    pub files: Vec<FileReport>,
    /// True when the run stopped early on a failure.
    pub halted: bool,
}

impl RunSummary {
    pub fn changed_paths(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Changed)
            .map(|f| f.path.as_str())
    }

    pub fn first_failure(&self) -> Option<&FileReport> {
        self.files.iter().find(|f| f.outcome.is_failed())
    }

    fn record(&mut self, path: &Path, outcome: FileOutcome) {
        if outcome == FileOutcome::Changed {
            self.fixed_count += 1;
        }
        self.files.push(FileReport {
            path: path.display().to_string(),
            outcome,
        });
    }
}

pub struct Rewriter<'a, F: FileSystem> {
    fs: &'a F,
    rules: &'a RuleSet,
    policy: FailurePolicy,
    mode: RunMode,
}

impl<'a, F: FileSystem> Rewriter<'a, F> {
    pub fn new(fs: &'a F, rules: &'a RuleSet) -> Self {
        Self {
            fs,
            rules,
            policy: FailurePolicy::default(),
            mode: RunMode::default(),
        }
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Process every path in order, stopping at the first failure under `FailurePolicy::Halt`.
    pub fn run(&self, files: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();

        for path in files {
            let outcome = match self.process_file(path) {
                Ok(outcome) => outcome,
                Err(err) => {
                    let reason = err.describe();
                    log_status!("rewrite", "Failed {}: {}", path.display(), reason);
                    FileOutcome::Failed { reason }
                }
            };

            let failed = outcome.is_failed();
            summary.record(path, outcome);

            if failed && self.policy == FailurePolicy::Halt {
                summary.halted = true;
                break;
            }
        }

        summary
    }

    /// Read, transform and (if changed) write a single file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        if !self.fs.exists(path) {
            return Ok(FileOutcome::Skipped);
        }

        let original = self.fs.read(path)?;
        let rewritten = self.rules.apply(&original);

        if rewritten == original {
            return Ok(FileOutcome::Unchanged);
        }

        if self.mode == RunMode::Write {
            self.fs.write(path, &rewritten)?;
        }

        Ok(FileOutcome::Changed)
    }
}

/// Rewrite `files` on the local filesystem with the built-in rules.
///
/// Halts at the first failing file and returns it as an error; files before it
/// stay rewritten. Returns the number of files changed.
pub fn run(files: &[PathBuf]) -> Result<usize> {
    let rules = RuleSet::builtin()?;
    let fs = local_files::local();
    let summary = Rewriter::new(&fs, &rules).run(files);

    match summary.first_failure() {
        Some(FileReport {
            path,
            outcome: FileOutcome::Failed { reason },
        }) => Err(Error::rewrite_failed(path.clone(), reason.clone())),
        _ => Ok(summary.fixed_count),
    }
}

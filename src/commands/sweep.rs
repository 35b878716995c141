use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use anysweep::config;
use anysweep::local_files;
use anysweep::rewrite::{FailurePolicy, FileOutcome, Rewriter, RuleSet, RunMode, RunSummary};
use anysweep::{log_status, Error};

use super::CmdResult;
use crate::output::TextReport;

#[derive(Args)]
pub struct SweepArgs {
    /// Files to process, in order (overrides the "files" list from config)
    paths: Vec<String>,

    /// Config file to read the file list from (default: ./anysweep.json if present).
    /// Only read when no paths are given, or when it is passed explicitly.
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Keep going after a file fails instead of stopping at the first failure
    #[arg(long)]
    keep_going: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum SweepOutput {
    #[serde(rename = "fix")]
    Fix {
        #[serde(flatten)]
        summary: RunSummary,
    },
    #[serde(rename = "check")]
    Check {
        #[serde(flatten)]
        summary: RunSummary,
    },
}

impl SweepOutput {
    fn summary(&self) -> &RunSummary {
        match self {
            SweepOutput::Fix { summary } | SweepOutput::Check { summary } => summary,
        }
    }
}

impl TextReport for SweepOutput {
    fn stdout_lines(&self) -> Vec<String> {
        let summary = self.summary();
        let (marker, total) = match self {
            SweepOutput::Fix { .. } => (
                "✅ Fixed:",
                format!("Fixed {} file(s)", summary.fixed_count),
            ),
            SweepOutput::Check { .. } => (
                "Would fix:",
                format!("{} file(s) would be fixed", summary.fixed_count),
            ),
        };

        let mut lines: Vec<String> = summary
            .changed_paths()
            .map(|path| format!("{} {}", marker, path))
            .collect();
        lines.push(total);
        lines
    }

    fn stderr_lines(&self) -> Vec<String> {
        let summary = self.summary();
        let mut lines: Vec<String> = summary
            .files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Failed { reason } => {
                    Some(format!("❌ Failed: {}: {}", f.path, reason))
                }
                _ => None,
            })
            .collect();

        if summary.halted {
            lines.push(
                "Stopped at the first failure; later files were not processed".to_string(),
            );
        }
        lines
    }
}

pub fn run(args: SweepArgs, mode: RunMode) -> CmdResult<SweepOutput> {
    let fs = local_files::local();
    let config = load_config(&fs, &args)?;

    let files = resolve_file_list(&args.paths, &config)?;

    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        config.failure_policy()
    };

    let rules = RuleSet::builtin()?;
    log_status!("rewrite", "Processing {} file(s)", files.len());

    let summary = Rewriter::new(&fs, &rules)
        .policy(policy)
        .mode(mode)
        .run(&files);

    let exit_code = exit_code_for(&summary, mode);
    let output = match mode {
        RunMode::Write => SweepOutput::Fix { summary },
        RunMode::Check => SweepOutput::Check { summary },
    };

    Ok((output, exit_code))
}

/// Positional paths replace the config list, so the implicit config file is
/// not read at all then. An explicit `--config` is always loaded.
fn load_config(
    fs: &local_files::LocalFs,
    args: &SweepArgs,
) -> anysweep::Result<config::SweepConfig> {
    match args.config.as_deref() {
        Some(explicit) => config::load(fs, Some(Path::new(explicit))),
        None if !args.paths.is_empty() => Ok(config::SweepConfig::default()),
        None => config::load(fs, None),
    }
}

/// CLI paths win over the config list; an empty result is an error.
fn resolve_file_list(
    paths: &[String],
    config: &config::SweepConfig,
) -> anysweep::Result<Vec<PathBuf>> {
    if paths.iter().any(|p| p.trim().is_empty()) {
        return Err(Error::validation_invalid_argument(
            "paths",
            "File paths must not be empty",
            None,
        ));
    }

    let files: Vec<PathBuf> = if paths.is_empty() {
        config.file_list()
    } else {
        paths.iter().map(PathBuf::from).collect()
    };

    if files.is_empty() {
        return Err(Error::validation_missing_argument(vec!["paths".to_string()])
            .with_hint("Pass file paths or list them under \"files\" in anysweep.json"));
    }

    Ok(files)
}

fn exit_code_for(summary: &RunSummary, mode: RunMode) -> i32 {
    if summary.first_failure().is_some() {
        return 1;
    }

    match mode {
        RunMode::Check if summary.fixed_count > 0 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anysweep::rewrite::FileReport;

    fn summary_with(outcomes: &[(&str, FileOutcome)], halted: bool) -> RunSummary {
        let files: Vec<FileReport> = outcomes
            .iter()
            .map(|(path, outcome)| FileReport {
                path: path.to_string(),
                outcome: outcome.clone(),
            })
            .collect();
        let fixed_count = files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Changed)
            .count();

        RunSummary {
            fixed_count,
            files,
            halted,
        }
    }

    #[test]
    fn fix_text_lists_changed_files_then_total() {
        let output = SweepOutput::Fix {
            summary: summary_with(
                &[
                    ("a.ts", FileOutcome::Changed),
                    ("b.ts", FileOutcome::Unchanged),
                    ("c.ts", FileOutcome::Skipped),
                    ("d.ts", FileOutcome::Changed),
                ],
                false,
            ),
        };

        assert_eq!(
            output.stdout_lines(),
            vec!["✅ Fixed: a.ts", "✅ Fixed: d.ts", "Fixed 2 file(s)"]
        );
        assert!(output.stderr_lines().is_empty());
    }

    #[test]
    fn failures_go_to_stderr() {
        let output = SweepOutput::Fix {
            summary: summary_with(
                &[(
                    "a.ts",
                    FileOutcome::Failed {
                        reason: "IO error: denied".to_string(),
                    },
                )],
                true,
            ),
        };

        let stderr = output.stderr_lines();
        assert_eq!(stderr[0], "❌ Failed: a.ts: IO error: denied");
        assert_eq!(stderr.len(), 2);
        assert_eq!(output.stdout_lines(), vec!["Fixed 0 file(s)"]);
    }

    #[test]
    fn check_exit_code_signals_pending_fixes() {
        let dirty = summary_with(&[("a.ts", FileOutcome::Changed)], false);
        let clean = summary_with(&[("a.ts", FileOutcome::Unchanged)], false);

        assert_eq!(exit_code_for(&dirty, RunMode::Check), 1);
        assert_eq!(exit_code_for(&clean, RunMode::Check), 0);
        assert_eq!(exit_code_for(&dirty, RunMode::Write), 0);
    }

    #[test]
    fn failure_exit_code_is_nonzero() {
        let failed = summary_with(
            &[(
                "a.ts",
                FileOutcome::Failed {
                    reason: "x".to_string(),
                },
            )],
            true,
        );
        assert_eq!(exit_code_for(&failed, RunMode::Write), 1);
    }

    #[test]
    fn cli_paths_override_config_list() {
        let config = config::SweepConfig {
            files: vec!["from-config.ts".to_string()],
            ..Default::default()
        };

        let files = resolve_file_list(&["cli.ts".to_string()], &config).unwrap();
        assert_eq!(files, vec![PathBuf::from("cli.ts")]);

        let files = resolve_file_list(&[], &config).unwrap();
        assert_eq!(files, vec![PathBuf::from("from-config.ts")]);
    }

    #[test]
    fn cli_paths_skip_implicit_config() {
        let args = SweepArgs {
            paths: vec!["a.ts".to_string()],
            config: None,
            keep_going: false,
        };

        let config = load_config(&local_files::local(), &args).unwrap();
        assert!(config.files.is_empty());
        assert!(config.stop_on_failure);
    }

    #[test]
    fn explicit_config_is_loaded_even_with_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let args = SweepArgs {
            paths: vec!["a.ts".to_string()],
            config: Some(path.display().to_string()),
            keep_going: false,
        };

        let err = load_config(&local_files::local(), &args).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let err = resolve_file_list(&[], &config::SweepConfig::default()).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");

        let err = resolve_file_list(&[" ".to_string()], &config::SweepConfig::default())
            .unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn output_serializes_with_command_tag() {
        let output = SweepOutput::Check {
            summary: summary_with(&[("a.ts", FileOutcome::Changed)], false),
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["command"], "check");
        assert_eq!(value["fixed_count"], 1);
        assert_eq!(value["files"][0]["status"], "changed");
    }
}

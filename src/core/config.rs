use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::local_files::FileSystem;
use crate::rewrite::FailurePolicy;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "anysweep.json";

/// Root configuration structure for anysweep.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepConfig {
    /// Files to rewrite, in order. Relative paths resolve against the working directory.
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default = "default_stop_on_failure")]
    pub stop_on_failure: bool,
}

fn default_stop_on_failure() -> bool {
    true
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            stop_on_failure: default_stop_on_failure(),
        }
    }
}

impl SweepConfig {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.stop_on_failure {
            FailurePolicy::Halt
        } else {
            FailurePolicy::Continue
        }
    }

    pub fn file_list(&self) -> Vec<PathBuf> {
        self.files.iter().map(PathBuf::from).collect()
    }
}

/// Parse config JSON. `origin` is only used in error details.
pub fn parse(content: &str, origin: &str) -> Result<SweepConfig> {
    serde_json::from_str(content).map_err(|e| Error::config_invalid_json(origin, e))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `anysweep.json` in the working
/// directory is used when present and defaults otherwise.
pub fn load<F: FileSystem>(fs: &F, explicit: Option<&Path>) -> Result<SweepConfig> {
    let path = match explicit {
        Some(path) => {
            if !fs.exists(path) {
                return Err(Error::config_not_found(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fs.exists(&path) {
                return Ok(SweepConfig::default());
            }
            path
        }
    };

    let content = fs.read(&path)?;
    log_status!("config", "Loaded {}", path.display());
    parse(&content, &path.display().to_string())
}

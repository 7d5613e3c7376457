//! Configuration for the normalizer subprocess

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the external normalizer is launched
///
/// The word list literal is appended as the last argument, after `args`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Executable to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the word list
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Working directory of the child process
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Upper bound for one normalization run in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_program() -> String {
    "python3".to_string()
}

fn default_args() -> Vec<String> {
    vec!["script.py".to_string()]
}

fn default_working_dir() -> PathBuf {
    PathBuf::from("resources/estnltk")
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: default_working_dir(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl NormalizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("Normalizer program must not be empty".to_string());
        }

        if self.working_dir.as_os_str().is_empty() {
            return Err("Normalizer working directory must not be empty".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

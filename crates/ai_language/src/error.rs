//! Error types for sentence normalization

use thiserror::Error;

/// Most characters of tool output kept in an error
pub const MAX_OUTPUT_EXCERPT_CHARS: usize = 500;

/// Errors from running the normalizer
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The process could not be started
    #[error("Failed to start normalizer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading output or waiting for exit failed
    #[error("Normalizer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The run did not finish in time and was killed
    #[error("Normalizer did not finish within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The process exited unsuccessfully
    #[error("Normalizer exited with {}: {output}", describe_code(*.code))]
    Failed { code: Option<i32>, output: String },

    /// Output is not a list literal
    #[error("Malformed normalizer output: {0}")]
    MalformedOutput(String),

    /// Output word count differs from the input
    #[error("Normalizer returned {actual} words for {expected} inputs")]
    ContractViolation { expected: usize, actual: usize },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("code {c}"))
}

/// Truncate tool output for inclusion in an error
pub fn excerpt(output: &str) -> String {
    output.trim().chars().take(MAX_OUTPUT_EXCERPT_CHARS).collect()
}

//! Normalizer adapter - Implements NormalizationPort using the ai_language crate

use std::sync::Arc;

use ai_language::{NormalizationError, Normalizer, NormalizerConfig, SubprocessNormalizer};
use application::{error::ApplicationError, ports::NormalizationPort};
use async_trait::async_trait;
use tracing::instrument;

/// Adapter for sentence normalization
pub struct NormalizerAdapter {
    normalizer: Arc<dyn Normalizer>,
    program: String,
}

impl std::fmt::Debug for NormalizerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerAdapter")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl NormalizerAdapter {
    /// Create an adapter running the configured subprocess
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: NormalizerConfig) -> Result<Self, ApplicationError> {
        let program = config.program.clone();
        let normalizer = SubprocessNormalizer::new(config).map_err(Self::map_error)?;
        Ok(Self {
            normalizer: Arc::new(normalizer),
            program,
        })
    }

    /// Wrap an existing normalizer
    pub fn with_normalizer(normalizer: Arc<dyn Normalizer>, program: impl Into<String>) -> Self {
        Self {
            normalizer,
            program: program.into(),
        }
    }

    /// Program this adapter runs
    pub fn program(&self) -> &str {
        &self.program
    }

    fn map_error(err: NormalizationError) -> ApplicationError {
        match err {
            NormalizationError::ContractViolation { expected, actual } => {
                ApplicationError::NormalizationContractViolation { expected, actual }
            },
            NormalizationError::Configuration(e) => ApplicationError::Configuration(e),
            NormalizationError::Spawn { .. }
            | NormalizationError::Io(_)
            | NormalizationError::Timeout { .. }
            | NormalizationError::Failed { .. }
            | NormalizationError::MalformedOutput(_) => {
                ApplicationError::NormalizationFailed(err.to_string())
            },
        }
    }
}

#[async_trait]
impl NormalizationPort for NormalizerAdapter {
    #[instrument(skip(self, words), fields(words = words.len()))]
    async fn normalize(&self, words: &[String]) -> Result<Vec<String>, ApplicationError> {
        self.normalizer
            .normalize(words)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violation_keeps_counts() {
        let err = NormalizerAdapter::map_error(NormalizationError::ContractViolation {
            expected: 3,
            actual: 2,
        });
        assert!(matches!(
            err,
            ApplicationError::NormalizationContractViolation {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn tool_failures_map_to_normalization_failed() {
        let failures = [
            NormalizationError::Failed {
                code: Some(1),
                output: "Traceback".into(),
            },
            NormalizationError::Timeout { timeout_ms: 10 },
            NormalizationError::MalformedOutput("x".into()),
        ];
        for failure in failures {
            assert!(matches!(
                NormalizerAdapter::map_error(failure),
                ApplicationError::NormalizationFailed(_)
            ));
        }
    }

    #[test]
    fn invalid_config_fails_construction() {
        let config = NormalizerConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            NormalizerAdapter::new(config),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_subprocess_through_port() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = NormalizerAdapter::new(NormalizerConfig {
            program: "sh".into(),
            args: vec!["-c".into(), r#"echo "['Ma tahan', 'mängida']""#.into(), "n".into()],
            working_dir: dir.path().to_path_buf(),
            timeout_ms: 5000,
        })
        .unwrap();

        let words = adapter
            .normalize(&["Ma tahan".into(), "mängima".into()])
            .await
            .unwrap();

        assert_eq!(words, vec!["Ma tahan", "mängida"]);
        assert_eq!(adapter.program(), "sh");
    }
}

//! Subprocess normalizer
//!
//! Runs `program args... "['w1', 'w2']"` in the configured working
//! directory and parses the list literal the tool prints. Standard output
//! and standard error are drained concurrently into one buffer, so a chatty
//! tool can never block on a full pipe and its diagnostics end up next to
//! the result.

use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{
    io::AsyncReadExt,
    process::{Child, ChildStderr, ChildStdout, Command},
};
use tracing::{debug, error, instrument, warn};

use crate::{
    config::NormalizerConfig,
    error::{NormalizationError, excerpt},
    literal,
    ports::Normalizer,
};

const READ_CHUNK: usize = 4096;

/// Normalizer backed by an external program
#[derive(Debug, Clone)]
pub struct SubprocessNormalizer {
    config: NormalizerConfig,
}

impl SubprocessNormalizer {
    /// Create a new normalizer
    ///
    /// # Errors
    ///
    /// Returns `NormalizationError::Configuration` if the configuration is invalid.
    pub fn new(config: NormalizerConfig) -> Result<Self, NormalizationError> {
        config
            .validate()
            .map_err(NormalizationError::Configuration)?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn command(&self, words: &[String]) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(literal::encode(words))
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Run the tool to completion and return its merged output
    async fn run(&self, words: &[String]) -> Result<String, NormalizationError> {
        let mut cmd = self.command(words);
        debug!("Running normalizer: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|source| NormalizationError::Spawn {
            program: self.config.program.clone(),
            source,
        })?;

        let timeout_ms = self.config.timeout_ms;
        let completed = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            collect(&mut child),
        )
        .await;

        let Ok(completed) = completed else {
            // kill_on_drop would do this too, but only once the child is dropped
            if let Err(e) = child.start_kill() {
                warn!(error = %e, "Failed to kill timed out normalizer");
            }
            error!(timeout_ms, "Normalizer timed out");
            return Err(NormalizationError::Timeout { timeout_ms });
        };

        let (status, output) = completed?;
        let output = String::from_utf8_lossy(&output).into_owned();

        if !status.success() {
            error!(code = ?status.code(), output = %excerpt(&output), "Normalizer failed");
            return Err(NormalizationError::Failed {
                code: status.code(),
                output: excerpt(&output),
            });
        }

        Ok(output)
    }
}

/// Drain both output streams, then wait for exit
async fn collect(
    child: &mut Child,
) -> Result<(std::process::ExitStatus, Vec<u8>), NormalizationError> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let output = drain_merged(stdout, stderr).await?;
    let status = child.wait().await?;
    Ok((status, output))
}

/// Read two streams until both close, appending chunks in arrival order
async fn drain_merged(
    mut stdout: Option<ChildStdout>,
    mut stderr: Option<ChildStderr>,
) -> std::io::Result<Vec<u8>> {
    let mut merged = Vec::new();
    let mut out_buf = [0u8; READ_CHUNK];
    let mut err_buf = [0u8; READ_CHUNK];

    loop {
        tokio::select! {
            read = read_chunk(stdout.as_mut(), &mut out_buf), if stdout.is_some() => {
                match read? {
                    0 => stdout = None,
                    n => merged.extend_from_slice(&out_buf[..n]),
                }
            },
            read = read_chunk(stderr.as_mut(), &mut err_buf), if stderr.is_some() => {
                match read? {
                    0 => stderr = None,
                    n => merged.extend_from_slice(&err_buf[..n]),
                }
            },
            else => break,
        }
    }

    Ok(merged)
}

async fn read_chunk<R>(stream: Option<&mut R>, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncReadExt + Unpin,
{
    match stream {
        Some(stream) => stream.read(buf).await,
        None => Ok(0),
    }
}

#[async_trait]
impl Normalizer for SubprocessNormalizer {
    #[instrument(skip(self, words), fields(words = words.len()))]
    async fn normalize(&self, words: &[String]) -> Result<Vec<String>, NormalizationError> {
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let output = self.run(words).await?;
        let normalized = literal::parse(&output)?;

        if normalized.len() != words.len() {
            warn!(
                expected = words.len(),
                actual = normalized.len(),
                "Normalizer output does not line up with input"
            );
            return Err(NormalizationError::ContractViolation {
                expected: words.len(),
                actual: normalized.len(),
            });
        }

        debug!(?normalized, "Words normalized");
        Ok(normalized)
    }
}

//! Listener, CORS and logging settings of the API process.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// `[server]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; an empty list allows any origin
    pub allowed_origins: Vec<String>,
    /// Seconds in-flight requests get after a shutdown signal
    pub shutdown_timeout_secs: u64,
    pub log_format: LogFormat,
    /// Upper bound on request bodies
    pub max_body_size_json_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: 30,
            log_format: LogFormat::Text,
            max_body_size_json_bytes: 1 << 20,
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".into());
        }
        if self.max_body_size_json_bytes == 0 {
            return Err("max_body_size_json_bytes must be positive".into());
        }
        Ok(())
    }
}

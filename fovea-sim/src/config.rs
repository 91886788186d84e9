//! Configuration for the simulator driver.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Output layout settings.
    pub output: OutputConfig,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
}

/// Output layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Subdirectory for encoded-buffer diagnostic images.
    pub encoded_subdir: String,
    /// Subdirectory for per-frame and total statistics.
    pub stats_subdir: String,
    /// File name for the cumulative totals CSV.
    pub total_file: String,
    /// File name for the JSON run summary.
    pub summary_file: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoded_subdir: "encoded".into(),
            stats_subdir: "stats".into(),
            total_file: "total.csv".into(),
            summary_file: "summary.json".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl SimConfig {
    /// Load configuration from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────

//! Indexer configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stele_governance::CreationPolicy;

use crate::logging::LogFormat;
use crate::IndexerError;

/// Configuration for an indexer run.
///
/// Loaded from a TOML file via [`IndexerConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). Every field has a default, so an empty
/// file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Directory of the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Handling of a second creation event for the same proposal.
    #[serde(default)]
    pub creation_policy: CreationPolicy,

    /// Where to write Prometheus metrics in text format after a run.
    #[serde(default)]
    pub metrics_file: Option<PathBuf>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./stele_data")
}

fn default_map_size_mb() -> usize {
    1024
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl IndexerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, IndexerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| IndexerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, IndexerError> {
        toml::from_str(s).map_err(|e| IndexerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, IndexerError> {
        toml::to_string_pretty(self).map_err(|e| IndexerError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, IndexerError> {
        self.log_format.parse()
    }

    /// LMDB map size in bytes.
    pub fn map_size(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            creation_policy: CreationPolicy::default(),
            metrics_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = IndexerConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = IndexerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = IndexerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.data_dir, PathBuf::from("./stele_data"));
        assert_eq!(config.map_size(), 1024 * 1024 * 1024);
        assert_eq!(config.creation_policy, CreationPolicy::Reset);
        assert_eq!(config.log_format().unwrap(), LogFormat::Human);
        assert!(config.metrics_file.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            data_dir = "/var/lib/stele"
            creation_policy = "keep_existing"
            log_format = "json"
            metrics_file = "/var/lib/node_exporter/stele.prom"
        "#;
        let config = IndexerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/stele"));
        assert_eq!(config.creation_policy, CreationPolicy::KeepExisting);
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.metrics_file,
            Some(PathBuf::from("/var/lib/node_exporter/stele.prom"))
        );
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = IndexerConfig::from_toml_str(r#"creation_policy = "merge""#).unwrap_err();
        assert!(matches!(err, IndexerError::Config(_)));
    }
}

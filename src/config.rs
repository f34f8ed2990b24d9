//! Configuration file support.
//!
//! Provides YAML-based configuration with every setting namespaced under a
//! top-level `intel` key, including data structures, file loading and
//! validation.

use anyhow::{bail, Context};
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use rand::RngCore;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::shared::Result;

/// Default cap on a layer manifest (200 MiB).
pub const DEFAULT_MAX_MANIFEST_BYTES: u64 = 200 * 1024 * 1024;

/// Symmetric key sealing pagination tokens.
///
/// Every instance that issues or accepts tokens must share the same key.
#[derive(Clone, PartialEq, Eq)]
pub struct PaginationKey([u8; 32]);

impl PaginationKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generates a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parses URL-safe base64, padded or not, decoding to exactly 32 bytes.
    pub fn parse(encoded: &str) -> Result<Self> {
        let trimmed = encoded.trim();
        let bytes = URL_SAFE
            .decode(trimmed)
            .or_else(|_| URL_SAFE_NO_PAD.decode(trimmed))
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok());

        match bytes {
            Some(bytes) => Ok(Self(bytes)),
            None => bail!(
                "Invalid pagination key; must be 32-byte URL-safe base64\n\n\
                 💡 Hint: Generate one with `image-vuln-intel keygen`."
            ),
        }
    }

    /// URL-safe base64 (padded) encoding, accepted back by [`PaginationKey::parse`].
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PaginationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PaginationKey(..)")
    }
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub intel: RawConfig,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Settings as written in the file, before validation.
#[derive(Debug, Deserialize, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub pagination: PaginationSection,
    #[serde(default)]
    pub ingestion: IngestionSection,
    #[serde(default)]
    pub log: LogSection,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PaginationSection {
    pub key: Option<String>,
    pub token_ttl_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct IngestionSection {
    #[serde(default = "default_supported_formats")]
    pub supported_formats: Vec<String>,
    #[serde(default = "default_max_manifest_bytes")]
    pub max_manifest_bytes: u64,
}

impl Default for IngestionSection {
    fn default() -> Self {
        Self {
            supported_formats: default_supported_formats(),
            max_manifest_bytes: default_max_manifest_bytes(),
        }
    }
}

fn default_supported_formats() -> Vec<String> {
    vec!["Docker".to_string(), "ACI".to_string()]
}

fn default_max_manifest_bytes() -> u64 {
    DEFAULT_MAX_MANIFEST_BYTES
}

/// Output format of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Validated process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub pagination_key: PaginationKey,
    /// Whether the key was generated because none was configured
    pub pagination_key_generated: bool,
    pub token_ttl: Option<Duration>,
    pub supported_formats: Vec<String>,
    pub max_manifest_bytes: u64,
    pub log: LogSection,
}

impl Config {
    /// Builds the validated configuration, generating a pagination key when
    /// none is configured.
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        let (pagination_key, pagination_key_generated) = match raw.pagination.key.as_deref() {
            Some(encoded) if !encoded.trim().is_empty() => (PaginationKey::parse(encoded)?, false),
            _ => (PaginationKey::generate(), true),
        };

        if raw.ingestion.supported_formats.is_empty() {
            bail!(
                "Invalid config: intel.ingestion.supported_formats must not be empty.\n\n\
                 💡 Hint: List at least one image format (e.g. Docker)."
            );
        }

        if raw.ingestion.max_manifest_bytes == 0 {
            bail!("Invalid config: intel.ingestion.max_manifest_bytes must be greater than 0.");
        }

        if raw.pagination.token_ttl_secs == Some(0) {
            bail!(
                "Invalid config: intel.pagination.token_ttl_secs must be greater than 0.\n\n\
                 💡 Hint: Omit the field for tokens that never expire."
            );
        }

        Ok(Self {
            pagination_key,
            pagination_key_generated,
            token_ttl: raw.pagination.token_ttl_secs.map(Duration::from_secs),
            supported_formats: raw.ingestion.supported_formats,
            max_manifest_bytes: raw.ingestion.max_manifest_bytes,
            log: raw.log,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pagination_key: PaginationKey::generate(),
            pagination_key_generated: true,
            token_ttl: None,
            supported_formats: default_supported_formats(),
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
            log: LogSection::default(),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let file: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&file);
    Config::from_raw(file.intel)
}

/// Loads the file at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config_from_path(path),
        None => Ok(Config::default()),
    }
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(file: &ConfigFile) {
    let top = file.unknown_fields.keys().cloned();
    let nested = file
        .intel
        .unknown_fields
        .keys()
        .map(|key| format!("intel.{}", key));

    for key in top.chain(nested) {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

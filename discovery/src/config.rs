//! Generator configuration file.
//!
//! Defines the YAML-serializable settings for a generation run: the API
//! options written into the artifact and the discovery settings used to find
//! reports. Every field is optional in the file. Keys are snake_case;
//! `apiRoot` is accepted as well so a value copied from a generated artifact
//! still applies.
//!
//! # Example YAML
//!
//! ```yaml
//! api:
//!   api_root: /reports
//!   host: 0.0.0.0
//!   port: 8080
//! discovery:
//!   extension: rdef
//!   max_depth: 3
//!   jobs: 4
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use report_api_core::ApiOptions;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::xml::DEFAULT_REPORT_EXTENSION;

/// Settings controlling how report files are discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Report-definition file extension, without the leading dot.
    pub extension: String,
    /// Maximum traversal depth; absent or negative means unbounded.
    pub max_depth: Option<i64>,
    /// Number of parallel extraction jobs; absent or `1` extracts sequentially.
    pub jobs: Option<usize>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_REPORT_EXTENSION.to_string(),
            max_depth: None,
            jobs: None,
        }
    }
}

/// Top-level generator configuration.
///
/// # Examples
///
/// ```
/// use report_api_discovery::config::GeneratorConfig;
///
/// let config: GeneratorConfig = serde_yaml::from_str("api:\n  port: 9000\n").unwrap();
/// assert_eq!(config.api.port, 9000);
/// assert_eq!(config.api.api_root, "/api");
/// assert_eq!(config.discovery.extension, "rdef");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Values written into the generated artifact.
    pub api: ApiOptions,
    /// Discovery settings.
    pub discovery: DiscoveryConfig,
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Read`] if the file cannot be opened or
    /// parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| GenerateError::read(path, e))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|e| GenerateError::read(path, e))
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Write`] if the file cannot be created or
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| GenerateError::write(path, e))?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self).map_err(|e| GenerateError::write(path, e))
    }
}

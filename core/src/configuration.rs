use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Method, OutputType, ParameterDefinition};

/// Default mount prefix for every generated route.
pub const DEFAULT_API_ROOT: &str = "/api";
/// Default bind host for the downstream server.
pub const DEFAULT_HOST: &str = "localhost";
/// Default bind port for the downstream server.
pub const DEFAULT_PORT: u16 = 4567;

/// Knobs applied when synthesizing an [`ApiConfiguration`].
///
/// Every field has a documented default, so a partially specified YAML
/// section deserializes cleanly.
///
/// # Examples
///
/// ```
/// use report_api_core::ApiOptions;
///
/// let options = ApiOptions::default();
/// assert_eq!(options.api_root, "/api");
/// assert_eq!(options.host, "localhost");
/// assert_eq!(options.port, 4567);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiOptions {
    /// Mount prefix for all routes. Also read as `apiRoot`, the spelling
    /// used in generated artifacts.
    #[serde(alias = "apiRoot")]
    pub api_root: String,
    /// Bind host for the downstream server.
    pub host: String,
    /// Bind port for the downstream server.
    pub port: u16,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// One generated API route serving a single report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    /// Route path relative to the API root, always starting with `/`.
    pub path: String,
    pub report_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    pub report_file_path: PathBuf,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    /// HTTP methods the route accepts.
    pub methods: Vec<Method>,
    /// Output formats the route offers, in enumeration order.
    pub extensions: Vec<OutputType>,
}

impl ReportConfiguration {
    /// Returns `true` when the route accepts `method`.
    pub fn supports_method(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Returns `true` when the route offers `output`.
    pub fn supports_output(&self, output: OutputType) -> bool {
        self.extensions.contains(&output)
    }
}

/// Complete generated API configuration.
///
/// Serialized as the single artifact consumed by the report server.
///
/// # Examples
///
/// ```
/// use report_api_core::{ApiConfiguration, ApiOptions};
///
/// let config = ApiConfiguration::new(&ApiOptions::default());
/// assert_eq!(config.api_root, "/api");
/// assert_eq!(config.report_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfiguration {
    pub api_root: String,
    pub host: String,
    pub port: u16,
    /// Routes in discovery order.
    #[serde(default)]
    pub reports: Vec<ReportConfiguration>,
}

impl ApiConfiguration {
    /// Creates an empty configuration bound to `options`.
    pub fn new(options: &ApiOptions) -> Self {
        Self {
            api_root: options.api_root.clone(),
            host: options.host.clone(),
            port: options.port,
            reports: Vec::new(),
        }
    }

    /// Returns the number of routes.
    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Finds the first route registered under `path`.
    pub fn find_route(&self, path: &str) -> Option<&ReportConfiguration> {
        self.reports.iter().find(|r| r.path == path)
    }
}

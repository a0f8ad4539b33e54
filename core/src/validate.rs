//! Configuration validation.
//!
//! Checks structural invariants of a generated [`ApiConfiguration`]: route
//! shape, parameter naming, method and output sets, and route collisions.
//! Validation only reports problems; it never rewrites the configuration.
//!
//! # Examples
//!
//! ```
//! use report_api_core::*;
//!
//! let config = ApiConfiguration::new(&ApiOptions::default());
//! assert!(validate_configuration(&config).is_empty());
//!
//! let mut bad = config.clone();
//! bad.api_root = "api".into();
//! assert_eq!(
//!     validate_configuration(&bad),
//!     vec![ValidationError::InvalidApiRoot("api".into())]
//! );
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{ApiConfiguration, OutputType, ReportConfiguration};

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// API root does not start with `/`.
    #[error("api root must start with '/': {0}")]
    InvalidApiRoot(String),
    /// Host is empty or whitespace-only.
    #[error("host cannot be empty")]
    EmptyHost,
    /// Port is zero.
    #[error("port must be non-zero")]
    InvalidPort,
    /// Route path does not start with `/`.
    #[error("route path must start with '/': {0}")]
    InvalidRoutePath(String),
    /// Two reports normalize to the same route path; the later one shadows
    /// the earlier one in the server.
    #[error("route {path} is claimed by both '{first}' and '{second}'")]
    DuplicateRoutePath {
        path: String,
        first: String,
        second: String,
    },
    /// Report name is empty or whitespace-only.
    #[error("report at {0} has an empty name")]
    EmptyReportName(String),
    /// A parameter has an empty name.
    #[error("report '{0}' declares a parameter with an empty name")]
    EmptyParameterName(String),
    /// Two parameters of one report share a name.
    #[error("report '{report}' declares parameter '{name}' more than once")]
    DuplicateParameter { report: String, name: String },
    /// Route accepts no HTTP method.
    #[error("report '{0}' accepts no HTTP method")]
    NoMethods(String),
    /// Route offers no output format.
    #[error("report '{0}' offers no output format")]
    NoExtensions(String),
    /// Route lists the `NONE` output sentinel.
    #[error("report '{0}' lists the NONE output sentinel")]
    SentinelExtension(String),
}

/// Validates a complete configuration.
///
/// Unlike per-report checks, route collisions are only visible here. All
/// problems are collected; the result is empty for a valid configuration.
///
/// # Examples
///
/// ```
/// use report_api_core::*;
///
/// let mut config = ApiConfiguration::new(&ApiOptions::default());
/// for name in ["Sales Report", "sales report"] {
///     config.reports.push(ReportConfiguration {
///         path: "/sales_report".into(),
///         report_name: name.into(),
///         description: String::new(),
///         version: String::new(),
///         report_file_path: format!("{name}.rdef").into(),
///         parameters: Vec::new(),
///         methods: Method::ALL.to_vec(),
///         extensions: OutputType::renderable().collect(),
///     });
/// }
/// let errors = validate_configuration(&config);
/// assert!(matches!(errors[0], ValidationError::DuplicateRoutePath { .. }));
/// ```
pub fn validate_configuration(config: &ApiConfiguration) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !config.api_root.starts_with('/') {
        errors.push(ValidationError::InvalidApiRoot(config.api_root.clone()));
    }
    if config.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    let mut owners: HashMap<&str, &str> = HashMap::new();
    for report in &config.reports {
        if let Some(first) = owners.get(report.path.as_str()) {
            errors.push(ValidationError::DuplicateRoutePath {
                path: report.path.clone(),
                first: first.to_string(),
                second: report.report_name.clone(),
            });
        } else {
            owners.insert(report.path.as_str(), report.report_name.as_str());
        }
        errors.extend(validate_report(report));
    }

    errors
}

/// Validates a single route.
pub fn validate_report(report: &ReportConfiguration) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let label = report.report_name.clone();

    if report.report_name.trim().is_empty() {
        errors.push(ValidationError::EmptyReportName(
            report.report_file_path.display().to_string(),
        ));
    }
    if !report.path.starts_with('/') {
        errors.push(ValidationError::InvalidRoutePath(report.path.clone()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for param in &report.parameters {
        if param.name.trim().is_empty() {
            errors.push(ValidationError::EmptyParameterName(label.clone()));
            continue;
        }
        if !seen.insert(param.name.as_str()) {
            errors.push(ValidationError::DuplicateParameter {
                report: label.clone(),
                name: param.name.clone(),
            });
        }
    }

    if report.methods.is_empty() {
        errors.push(ValidationError::NoMethods(label.clone()));
    }
    if report.extensions.is_empty() {
        errors.push(ValidationError::NoExtensions(label.clone()));
    }
    if report.extensions.contains(&OutputType::None) {
        errors.push(ValidationError::SentinelExtension(label));
    }

    errors
}

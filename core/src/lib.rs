//! Core types and validation for generated report API configurations.
//!
//! This crate defines the engine-agnostic model shared by report discovery
//! and the report server:
//!
//! - [`ParameterDefinition`] — one typed report input with an optional
//!   resolved default.
//! - [`ReportDefinition`] — metadata extracted from one report-definition
//!   file.
//! - [`ReportConfiguration`] — one API route serving a report.
//! - [`ApiConfiguration`] — the complete generated artifact.
//! - [`ApiOptions`] — API root, host and port defaults used during
//!   generation.
//!
//! Validation ([`validate_configuration`], [`validate_report`]) catches
//! structural problems such as route collisions and duplicate parameters.
//!
//! # Example
//!
//! ```
//! use report_api_core::*;
//!
//! let mut report = ReportDefinition::new("Sales Report", "reports/sales.rdef");
//! report.parameters.push(ParameterDefinition::required("from", ValueType::Date));
//!
//! let mut config = ApiConfiguration::new(&ApiOptions::default());
//! config.reports.push(ReportConfiguration {
//!     path: "/sales_report".into(),
//!     report_name: report.report_name.clone(),
//!     description: report.description.clone(),
//!     version: report.version.clone(),
//!     report_file_path: report.report_file_path.clone(),
//!     parameters: report.parameters.clone(),
//!     methods: Method::ALL.to_vec(),
//!     extensions: OutputType::renderable().collect(),
//! });
//!
//! assert!(validate_configuration(&config).is_empty());
//! ```

mod configuration;
mod types;
mod validate;

pub use configuration::{
    ApiConfiguration, ApiOptions, DEFAULT_API_ROOT, DEFAULT_HOST, DEFAULT_PORT,
    ReportConfiguration,
};
pub use types::*;
pub use validate::{ValidationError, validate_configuration, validate_report};

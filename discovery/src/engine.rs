//! Adapter surface for the external report engine.
//!
//! The rest of the pipeline only reaches report metadata through these
//! traits, so engine-specific types never leak into [`ReportDefinition`]s.
//! An engine exposes three narrow capabilities:
//!
//! - [`ReportEngine`] recognizes and loads report-definition files.
//! - [`LoadedReport`] exposes report-level metadata and declared parameters.
//! - [`ParameterMetadata`] exposes one parameter's name, type and mandatory
//!   flag, and attempts default-value resolution inside a report-scoped
//!   [`ParameterContext`].
//!
//! [`ReportDefinition`]: report_api_core::ReportDefinition

use std::path::Path;

use report_api_core::{ParameterValue, ValueType};
use thiserror::Error;

/// Failure to open or parse a report-definition file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a well-formed report definition.
    #[error("parse error: {0}")]
    Parse(String),

    /// The file parsed but declares inconsistent metadata.
    #[error("invalid report definition: {0}")]
    Invalid(String),
}

/// Failure to resolve a parameter's default value.
///
/// Always recoverable: the mapper logs it and treats the default as absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Resolution needs a live data-source connection that is not available.
    #[error("data source '{0}' requires a live connection")]
    ConnectionUnavailable(String),

    /// The default refers to a data source the report does not declare.
    #[error("unknown data source '{0}'")]
    UnknownDataSource(String),

    /// The default is computed by a formula the engine cannot evaluate.
    #[error("unsupported formula '{0}'")]
    UnsupportedFormula(String),

    /// The declared default cannot be read as the parameter's type.
    #[error("default '{value}' is not a valid {value_type}: {reason}")]
    InvalidLiteral {
        value: String,
        value_type: ValueType,
        reason: String,
    },
}

/// Report-scoped context handed to default-value resolution.
#[derive(Debug)]
pub struct ParameterContext<'a, R> {
    report: &'a R,
}

impl<'a, R> ParameterContext<'a, R> {
    /// Creates a context scoped to `report`.
    pub fn new(report: &'a R) -> Self {
        Self { report }
    }

    /// Returns the report this context is scoped to.
    pub fn report(&self) -> &'a R {
        self.report
    }
}

/// Loads report-definition files.
pub trait ReportEngine {
    /// Engine-specific handle for a loaded report.
    type Report: LoadedReport;

    /// Returns `true` when `path` looks like a report-definition file.
    fn recognizes(&self, path: &Path) -> bool;

    /// Opens and parses one report-definition file.
    fn load(&self, path: &Path) -> Result<Self::Report, LoadError>;
}

/// Metadata of one loaded report.
pub trait LoadedReport: Sized {
    /// Engine-specific parameter metadata.
    type Parameter: ParameterMetadata<Report = Self>;

    /// Declared report title.
    fn title(&self) -> Option<&str>;

    /// Declared free-text description.
    fn description(&self) -> Option<&str>;

    /// Declared version string.
    fn version(&self) -> Option<&str>;

    /// Declared parameters in declaration order.
    fn parameters(&self) -> &[Self::Parameter];
}

/// Metadata of one declared parameter.
pub trait ParameterMetadata {
    /// Report type this parameter belongs to.
    type Report;

    fn name(&self) -> &str;

    fn value_type(&self) -> ValueType;

    fn is_mandatory(&self) -> bool;

    /// Attempts to resolve the default value.
    ///
    /// `Ok(None)` means no default is declared. Implementations must not
    /// block on external resources they cannot reach.
    fn resolve_default(
        &self,
        context: &ParameterContext<'_, Self::Report>,
    ) -> Result<Option<ParameterValue>, ResolutionError>;
}

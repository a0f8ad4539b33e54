//! Report descriptor extraction from a single report-definition file.

use std::path::Path;

use report_api_core::ReportDefinition;
use tracing::debug;

use crate::engine::{LoadedReport, ReportEngine};
use crate::error::ExtractionError;
use crate::mapper::map_parameter;

/// Loads `path` through `engine` and builds its [`ReportDefinition`].
///
/// Missing name, description or version become empty strings. Parameters
/// keep their declaration order. A file the engine cannot load yields an
/// [`ExtractionError`] for that file alone.
///
/// # Examples
///
/// ```no_run
/// use report_api_discovery::extractor::extract_report;
/// use report_api_discovery::xml::XmlReportEngine;
///
/// let engine = XmlReportEngine::new();
/// let report = extract_report(&engine, "reports/sales.rdef".as_ref()).unwrap();
/// println!("{} takes {} parameter(s)", report.report_name, report.parameters.len());
/// ```
pub fn extract_report<E>(engine: &E, path: &Path) -> Result<ReportDefinition, ExtractionError>
where
    E: ReportEngine + ?Sized,
{
    let report = engine.load(path).map_err(|source| ExtractionError {
        path: path.to_path_buf(),
        source,
    })?;

    let parameters = report
        .parameters()
        .iter()
        .map(|param| map_parameter(param, &report))
        .collect();

    let definition = ReportDefinition {
        report_name: report.title().unwrap_or_default().to_string(),
        description: report.description().unwrap_or_default().to_string(),
        version: report.version().unwrap_or_default().to_string(),
        report_file_path: path.to_path_buf(),
        parameters,
    };

    debug!(
        path = %path.display(),
        report = %definition.report_name,
        parameters = definition.parameters.len(),
        "Extracted report definition"
    );

    Ok(definition)
}

//! End-to-end generation: discover reports, synthesize, write.

use std::path::{Path, PathBuf};

use report_api_core::{ApiConfiguration, ApiOptions, ReportDefinition, validate_configuration};
use tracing::{info, warn};

use crate::engine::ReportEngine;
use crate::error::{ExtractionError, GenerateError, Result};
use crate::extractor::extract_report;
use crate::output::write_configuration;
use crate::synthesize::synthesize;
use crate::walker::ReportWalker;

/// Options for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Values written into the artifact.
    pub api: ApiOptions,
    /// Maximum traversal depth (`None` = unbounded).
    pub max_depth: Option<usize>,
    /// Number of parallel extraction jobs (`None` or `1` = sequential).
    pub jobs: Option<usize>,
}

/// Aggregated output of a generation run.
#[derive(Debug)]
pub struct GenerateOutcome {
    /// The synthesized configuration.
    pub configuration: ApiConfiguration,
    /// Files that could not be extracted.
    pub failures: Vec<ExtractionError>,
    /// Validation findings on the synthesized configuration, such as route
    /// collisions. They do not prevent the artifact from being written.
    pub warnings: Vec<String>,
}

/// Discovers reports under `source` and synthesizes a configuration.
///
/// Nothing is written to disk. Extraction failures are collected in the
/// outcome; only an unusable `source` or worker pool aborts the run.
///
/// # Examples
///
/// ```no_run
/// use report_api_discovery::generate::{GenerateOptions, build_configuration};
/// use report_api_discovery::xml::XmlReportEngine;
///
/// let outcome = build_configuration(
///     &XmlReportEngine::new(),
///     "reports/".as_ref(),
///     &GenerateOptions::default(),
/// )
/// .unwrap();
/// println!("{} route(s)", outcome.configuration.reports.len());
/// ```
pub fn build_configuration<E>(
    engine: &E,
    source: &Path,
    options: &GenerateOptions,
) -> Result<GenerateOutcome>
where
    E: ReportEngine + Sync,
{
    let walker = ReportWalker::new(engine, source)?.with_max_depth(options.max_depth);
    let mut failures = Vec::new();

    let configuration = match options.jobs.filter(|jobs| *jobs > 1) {
        Some(jobs) => {
            let results = extract_parallel(engine, walker.candidates().collect(), jobs)?;
            let definitions = results
                .into_iter()
                .filter_map(|result| absorb_failure(result, &mut failures));
            synthesize(definitions, &options.api)
        }
        None => {
            let definitions = walker
                .walk_results()
                .filter_map(|result| absorb_failure(result, &mut failures));
            synthesize(definitions, &options.api)
        }
    };

    let warnings: Vec<String> = validate_configuration(&configuration)
        .into_iter()
        .map(|finding| finding.to_string())
        .collect();
    for warning in &warnings {
        warn!(warning = %warning, "Generated configuration has a problem");
    }

    Ok(GenerateOutcome {
        configuration,
        failures,
        warnings,
    })
}

/// Runs the full pipeline and writes the artifact to `destination`.
///
/// # Errors
///
/// - [`GenerateError::InvalidInvocation`] if `source` is not a directory or
///   `destination` is an existing directory. Nothing is discovered or
///   written.
/// - [`GenerateError::Write`] if the artifact cannot be written.
pub fn generate<E>(
    engine: &E,
    source: &Path,
    destination: &Path,
    options: &GenerateOptions,
) -> Result<GenerateOutcome>
where
    E: ReportEngine + Sync,
{
    if destination.is_dir() {
        return Err(GenerateError::InvalidInvocation(format!(
            "destination '{}' is a directory",
            destination.display()
        )));
    }

    let outcome = build_configuration(engine, source, options)?;
    write_configuration(&outcome.configuration, destination)?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        reports = outcome.configuration.reports.len(),
        failures = outcome.failures.len(),
        "Generated API configuration"
    );
    Ok(outcome)
}

fn absorb_failure(
    result: std::result::Result<ReportDefinition, ExtractionError>,
    failures: &mut Vec<ExtractionError>,
) -> Option<ReportDefinition> {
    match result {
        Ok(definition) => Some(definition),
        Err(err) => {
            warn!(path = %err.path.display(), error = %err.source, "Skipping report definition");
            failures.push(err);
            None
        }
    }
}

/// Extracts `paths` on a dedicated pool, returning results in input order.
fn extract_parallel<E>(
    engine: &E,
    paths: Vec<PathBuf>,
    jobs: usize,
) -> Result<Vec<std::result::Result<ReportDefinition, ExtractionError>>>
where
    E: ReportEngine + Sync,
{
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.min(paths.len().max(1)))
        .build()
        .map_err(|e| GenerateError::Workers(e.to_string()))?;

    Ok(pool.install(|| {
        paths
            .par_iter()
            .map(|path| extract_report(engine, path))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::output::load_configuration;
    use crate::xml::XmlReportEngine;

    fn write_report(dir: &Path, file: &str, body: &str) {
        fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn test_empty_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = build_configuration(
            &XmlReportEngine::new(),
            dir.path(),
            &GenerateOptions::default(),
        )
        .unwrap();

        assert!(outcome.configuration.reports.is_empty());
        assert_eq!(outcome.configuration.api_root, "/api");
        assert_eq!(outcome.configuration.host, "localhost");
        assert_eq!(outcome.configuration.port, 4567);
        assert!(outcome.failures.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_route_count_matches_successful_extractions() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), "a.rdef", r#"<report name="Alpha"/>"#);
        write_report(dir.path(), "b.rdef", r#"<report name="Beta"/>"#);
        write_report(dir.path(), "broken.rdef", r#"<report name="X"><p></report>"#);

        let outcome = build_configuration(
            &XmlReportEngine::new(),
            dir.path(),
            &GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.configuration.reports.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].path.ends_with("broken.rdef"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..12 {
            write_report(
                dir.path(),
                &format!("r{i}.rdef"),
                &format!(r#"<report name="Report {i}"/>"#),
            );
        }
        let engine = XmlReportEngine::new();

        let sequential =
            build_configuration(&engine, dir.path(), &GenerateOptions::default()).unwrap();
        let parallel = build_configuration(
            &engine,
            dir.path(),
            &GenerateOptions {
                jobs: Some(4),
                ..GenerateOptions::default()
            },
        )
        .unwrap();

        assert_eq!(parallel.configuration, sequential.configuration);
    }

    #[test]
    fn test_collisions_are_reported_as_warnings() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), "a.rdef", r#"<report name="Sales Report"/>"#);
        write_report(dir.path(), "b.rdef", r#"<report name="sales report"/>"#);

        let outcome = build_configuration(
            &XmlReportEngine::new(),
            dir.path(),
            &GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.configuration.reports.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("/sales_report"));
    }

    #[test]
    fn test_generate_writes_loadable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("reports");
        fs::create_dir_all(&source).unwrap();
        write_report(&source, "sales.rdef", r#"<report name="Sales"/>"#);
        let destination = dir.path().join("api.yml");

        let options = GenerateOptions {
            api: ApiOptions {
                port: 9000,
                ..ApiOptions::default()
            },
            ..GenerateOptions::default()
        };
        let outcome = generate(&XmlReportEngine::new(), &source, &destination, &options).unwrap();

        let loaded = load_configuration(&destination).unwrap();
        assert_eq!(loaded, outcome.configuration);
        assert_eq!(loaded.port, 9000);
    }

    #[test]
    fn test_invalid_invocation_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("api.yml");

        let missing_source = generate(
            &XmlReportEngine::new(),
            &dir.path().join("missing"),
            &destination,
            &GenerateOptions::default(),
        );
        assert!(matches!(
            missing_source,
            Err(GenerateError::InvalidInvocation(_))
        ));
        assert!(!destination.exists());

        let directory_destination = generate(
            &XmlReportEngine::new(),
            dir.path(),
            dir.path(),
            &GenerateOptions::default(),
        );
        assert!(matches!(
            directory_destination,
            Err(GenerateError::InvalidInvocation(_))
        ));
    }

    #[test]
    fn test_unwritable_destination_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("missing").join("api.yml");

        let result = generate(
            &XmlReportEngine::new(),
            dir.path(),
            &destination,
            &GenerateOptions::default(),
        );
        assert!(matches!(result, Err(GenerateError::Write { .. })));
        assert!(!destination.exists());
    }
}

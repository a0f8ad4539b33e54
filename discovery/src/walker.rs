//! Lazy, restartable discovery of report-definition files.

use std::path::PathBuf;

use report_api_core::ReportDefinition;
use tracing::warn;
use walkdir::WalkDir;

use crate::engine::ReportEngine;
use crate::error::{ExtractionError, GenerateError};
use crate::extractor::extract_report;

/// Converts a signed depth bound into a walker depth.
///
/// Negative values mean unbounded.
///
/// # Examples
///
/// ```
/// use report_api_discovery::walker::max_depth_from_signed;
///
/// assert_eq!(max_depth_from_signed(-1), None);
/// assert_eq!(max_depth_from_signed(0), Some(0));
/// assert_eq!(max_depth_from_signed(3), Some(3));
/// ```
pub fn max_depth_from_signed(depth: i64) -> Option<usize> {
    usize::try_from(depth).ok()
}

/// Walks a directory tree and extracts every recognized report.
///
/// Each call to [`walk`](ReportWalker::walk) starts a fresh traversal and
/// re-reads the files, so changes on disk between calls are visible. Entries
/// are produced in filesystem-enumeration order.
///
/// # Examples
///
/// ```no_run
/// use report_api_discovery::walker::ReportWalker;
/// use report_api_discovery::xml::XmlReportEngine;
///
/// let engine = XmlReportEngine::new();
/// let walker = ReportWalker::new(&engine, "reports/").unwrap().with_max_depth(Some(2));
/// for report in walker.walk() {
///     println!("{}", report.report_name);
/// }
/// ```
#[derive(Debug)]
pub struct ReportWalker<'e, E: ?Sized> {
    engine: &'e E,
    root: PathBuf,
    max_depth: Option<usize>,
}

impl<'e, E> ReportWalker<'e, E>
where
    E: ReportEngine + ?Sized,
{
    /// Creates an unbounded walker over `root`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidInvocation`] if `root` is missing or
    /// not a directory.
    pub fn new(engine: &'e E, root: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(GenerateError::InvalidInvocation(format!(
                "source directory '{}' does not exist or is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            engine,
            root,
            max_depth: None,
        })
    }

    /// Bounds the traversal depth; `None` is unbounded. The root is depth 0,
    /// so `Some(1)` visits only files directly inside it.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Lists recognized report-definition files without loading them.
    pub fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut walker = WalkDir::new(&self.root);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(move |path| self.engine.recognizes(path))
    }

    /// Extracts every candidate, yielding per-file results.
    pub fn walk_results(
        &self,
    ) -> impl Iterator<Item = Result<ReportDefinition, ExtractionError>> + '_ {
        self.candidates()
            .map(move |path| extract_report(self.engine, &path))
    }

    /// Extracts every candidate, logging and skipping files that fail.
    pub fn walk(&self) -> impl Iterator<Item = ReportDefinition> + '_ {
        self.walk_results().filter_map(|result| match result {
            Ok(definition) => Some(definition),
            Err(err) => {
                warn!(path = %err.path.display(), error = %err.source, "Skipping report definition");
                None
            }
        })
    }
}

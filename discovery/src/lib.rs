//! Report discovery and API configuration synthesis.
//!
//! This crate walks a directory tree for report-definition files, extracts
//! each report's metadata into a [`ReportDefinition`], and synthesizes an
//! [`ApiConfiguration`] with one route per report. Reports are never
//! rendered.
//!
//! # Pipeline
//!
//! - [`walker::ReportWalker`] — lazy, restartable traversal that extracts
//!   every recognized file and skips the ones that fail.
//! - [`extractor::extract_report`] — loads one file through a
//!   [`engine::ReportEngine`] and maps its metadata.
//! - [`mapper::map_parameter`] — converts one engine parameter, tolerating
//!   default-value resolution failures.
//! - [`synthesize::synthesize`] — derives route paths, methods and output
//!   formats.
//! - [`output::write_configuration`] — serializes and atomically writes the
//!   artifact.
//!
//! [`generate::generate`] runs the whole pipeline. The built-in
//! [`xml::XmlReportEngine`] reads XML report definitions; other engines plug
//! in through the traits in [`engine`].
//!
//! # Example
//!
//! ```
//! use report_api_core::ApiOptions;
//! use report_api_discovery::walker::ReportWalker;
//! use report_api_discovery::synthesize::synthesize;
//! use report_api_discovery::xml::XmlReportEngine;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(
//!     dir.path().join("sales.rdef"),
//!     r#"<report name="Sales Report"><parameters>
//!          <parameter name="from" type="date" mandatory="true"/>
//!        </parameters></report>"#,
//! )
//! .unwrap();
//!
//! let engine = XmlReportEngine::new();
//! let walker = ReportWalker::new(&engine, dir.path()).unwrap();
//! let config = synthesize(walker.walk(), &ApiOptions::default());
//!
//! assert_eq!(config.reports.len(), 1);
//! assert_eq!(config.reports[0].path, "/sales_report");
//! assert!(config.reports[0].parameters[0].required);
//! ```
//!
//! [`ReportDefinition`]: report_api_core::ReportDefinition
//! [`ApiConfiguration`]: report_api_core::ApiConfiguration

pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod generate;
pub mod mapper;
pub mod output;
pub mod synthesize;
pub mod walker;
pub mod xml;

pub use error::{ExtractionError, GenerateError};
pub use generate::{GenerateOptions, GenerateOutcome, build_configuration, generate};

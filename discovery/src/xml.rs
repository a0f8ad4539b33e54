//! Built-in engine for XML report-definition files.
//!
//! Report definitions are XML documents with a `report` root element. Only
//! metadata is read; layout and style elements are ignored.
//!
//! ```xml
//! <report name="Sales Report" version="1.2">
//!   <description>Monthly sales by region</description>
//!   <parameters>
//!     <parameter name="from" type="date" mandatory="true" default="2024-01-01"/>
//!     <parameter name="until" type="date" default-formula="TODAY()"/>
//!     <parameter name="region" type="list" default-query="regions"/>
//!   </parameters>
//!   <data-sources>
//!     <data-source name="regions" kind="inline"><row>North</row><row>South</row></data-source>
//!   </data-sources>
//! </report>
//! ```
//!
//! Defaults come from a typed `default` literal, a `default-formula`, or a
//! `default-query` against a declared data source. Only `inline` data sources
//! can be queried; every other kind needs a live connection and fails
//! resolution immediately instead of connecting.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use report_api_core::{ParameterValue, ValueType};
use serde::Deserialize;

use crate::engine::{
    LoadError, LoadedReport, ParameterContext, ParameterMetadata, ReportEngine, ResolutionError,
};

/// File extension recognized by default.
pub const DEFAULT_REPORT_EXTENSION: &str = "rdef";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct ReportDocument {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@version")]
    version: Option<String>,
    description: Option<String>,
    #[serde(default)]
    parameters: ParameterList,
    #[serde(rename = "data-sources", default)]
    data_sources: DataSourceList,
}

#[derive(Debug, Default, Deserialize)]
struct ParameterList {
    #[serde(rename = "parameter", default)]
    items: Vec<ParameterElement>,
}

#[derive(Debug, Deserialize)]
struct ParameterElement {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    value_type: Option<String>,
    #[serde(rename = "@mandatory", default)]
    mandatory: bool,
    #[serde(rename = "@default")]
    default: Option<String>,
    #[serde(rename = "@default-formula")]
    default_formula: Option<String>,
    #[serde(rename = "@default-query")]
    default_query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DataSourceList {
    #[serde(rename = "data-source", default)]
    items: Vec<DataSourceElement>,
}

#[derive(Debug, Deserialize)]
struct DataSourceElement {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@kind", default)]
    kind: String,
    #[serde(rename = "row", default)]
    rows: Vec<String>,
}

/// Where a parameter's default value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSource {
    /// No default declared.
    None,
    /// Literal text, typed according to the parameter.
    Literal(String),
    /// Formula evaluated at resolution time.
    Formula(String),
    /// Query against a named data source.
    Query(String),
}

/// A data source declared by a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub name: String,
    pub kind: String,
    pub rows: Vec<String>,
}

impl DataSource {
    /// Returns `true` for data sources whose rows live in the report file.
    pub fn is_inline(&self) -> bool {
        self.kind.eq_ignore_ascii_case("inline")
    }
}

/// A parameter declared in an XML report definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlParameter {
    pub name: String,
    pub value_type: ValueType,
    pub mandatory: bool,
    pub default: DefaultSource,
}

/// A parsed XML report definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlReport {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub parameters: Vec<XmlParameter>,
    pub data_sources: Vec<DataSource>,
}

impl XmlReport {
    /// Looks up a declared data source by name.
    pub fn data_source(&self, name: &str) -> Option<&DataSource> {
        self.data_sources.iter().find(|source| source.name == name)
    }
}

/// Report engine reading XML report definitions from disk.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use report_api_discovery::engine::ReportEngine;
/// use report_api_discovery::xml::XmlReportEngine;
///
/// let engine = XmlReportEngine::new();
/// assert!(engine.recognizes(Path::new("reports/sales.rdef")));
/// assert!(engine.recognizes(Path::new("reports/SALES.RDEF")));
/// assert!(!engine.recognizes(Path::new("reports/notes.txt")));
/// ```
#[derive(Debug, Clone)]
pub struct XmlReportEngine {
    extension: String,
}

impl Default for XmlReportEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlReportEngine {
    /// Creates an engine recognizing [`DEFAULT_REPORT_EXTENSION`] files.
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_REPORT_EXTENSION)
    }

    /// Creates an engine recognizing files with `extension` (leading dot
    /// optional).
    pub fn with_extension(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Extension this engine recognizes, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Parses report-definition XML held in memory.
    pub fn parse_str(&self, raw: &str) -> Result<XmlReport, LoadError> {
        let document: ReportDocument =
            quick_xml::de::from_str(raw).map_err(|e| LoadError::Parse(e.to_string()))?;
        build_report(document)
    }
}

impl ReportEngine for XmlReportEngine {
    type Report = XmlReport;

    fn recognizes(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn load(&self, path: &Path) -> Result<XmlReport, LoadError> {
        let raw = fs::read_to_string(path)?;
        self.parse_str(&raw)
    }
}

impl LoadedReport for XmlReport {
    type Parameter = XmlParameter;

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn parameters(&self) -> &[XmlParameter] {
        &self.parameters
    }
}

impl ParameterMetadata for XmlParameter {
    type Report = XmlReport;

    fn name(&self) -> &str {
        &self.name
    }

    fn value_type(&self) -> ValueType {
        self.value_type
    }

    fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    fn resolve_default(
        &self,
        context: &ParameterContext<'_, XmlReport>,
    ) -> Result<Option<ParameterValue>, ResolutionError> {
        match &self.default {
            DefaultSource::None => Ok(None),
            DefaultSource::Literal(raw) => parse_literal(raw, self.value_type).map(Some),
            DefaultSource::Formula(formula) => evaluate_formula(formula).map(Some),
            DefaultSource::Query(name) => {
                let source = context
                    .report()
                    .data_source(name)
                    .ok_or_else(|| ResolutionError::UnknownDataSource(name.clone()))?;
                if !source.is_inline() {
                    return Err(ResolutionError::ConnectionUnavailable(name.clone()));
                }
                if source.rows.is_empty() {
                    return Ok(None);
                }
                match self.value_type {
                    ValueType::List => Ok(Some(ParameterValue::Array(
                        source
                            .rows
                            .iter()
                            .map(|row| ParameterValue::String(row.trim().to_string()))
                            .collect(),
                    ))),
                    value_type => source
                        .rows
                        .first()
                        .map(|row| parse_literal(row, value_type))
                        .transpose(),
                }
            }
        }
    }
}

fn build_report(document: ReportDocument) -> Result<XmlReport, LoadError> {
    let mut seen = HashSet::new();
    let mut parameters = Vec::with_capacity(document.parameters.items.len());

    for (position, element) in document.parameters.items.into_iter().enumerate() {
        let name = element.name.trim().to_string();
        if name.is_empty() {
            return Err(LoadError::Invalid(format!(
                "parameter #{} has an empty name",
                position + 1
            )));
        }
        if !seen.insert(name.clone()) {
            return Err(LoadError::Invalid(format!(
                "parameter '{name}' is declared more than once"
            )));
        }

        let value_type = match element.value_type.as_deref() {
            Some(tag) => tag
                .parse::<ValueType>()
                .map_err(|e| LoadError::Invalid(format!("parameter '{name}': {e}")))?,
            None => ValueType::String,
        };

        let default = if let Some(literal) = element.default {
            DefaultSource::Literal(literal)
        } else if let Some(formula) = element.default_formula {
            DefaultSource::Formula(formula)
        } else if let Some(query) = element.default_query {
            DefaultSource::Query(query)
        } else {
            DefaultSource::None
        };

        parameters.push(XmlParameter {
            name,
            value_type,
            mandatory: element.mandatory,
            default,
        });
    }

    let data_sources = document
        .data_sources
        .items
        .into_iter()
        .map(|source| DataSource {
            name: source.name,
            kind: source.kind,
            rows: source.rows,
        })
        .collect();

    Ok(XmlReport {
        title: non_empty(document.name),
        description: non_empty(document.description),
        version: non_empty(document.version),
        parameters,
        data_sources,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads `raw` as a value of `value_type`.
fn parse_literal(raw: &str, value_type: ValueType) -> Result<ParameterValue, ResolutionError> {
    let text = raw.trim();
    let invalid = |reason: &str| ResolutionError::InvalidLiteral {
        value: raw.to_string(),
        value_type,
        reason: reason.to_string(),
    };

    match value_type {
        ValueType::String => Ok(ParameterValue::String(raw.to_string())),
        ValueType::Number => {
            if let Ok(int) = text.parse::<i64>() {
                return Ok(ParameterValue::from(int));
            }
            let float = text
                .parse::<f64>()
                .map_err(|_| invalid("expected an integer or decimal"))?;
            serde_json::Number::from_f64(float)
                .map(ParameterValue::Number)
                .ok_or_else(|| invalid("number must be finite"))
        }
        ValueType::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(ParameterValue::Bool(true)),
            "false" | "no" | "0" => Ok(ParameterValue::Bool(false)),
            _ => Err(invalid("expected true or false")),
        },
        ValueType::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(|date| ParameterValue::String(date.format(DATE_FORMAT).to_string()))
            .map_err(|e| invalid(&e.to_string())),
        ValueType::List => Ok(ParameterValue::Array(
            text.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| ParameterValue::String(item.to_string()))
                .collect(),
        )),
    }
}

fn evaluate_formula(formula: &str) -> Result<ParameterValue, ResolutionError> {
    let expression = formula.trim().trim_start_matches('=').trim();
    match expression.to_ascii_uppercase().as_str() {
        "TODAY()" => Ok(ParameterValue::String(
            Local::now().date_naive().format(DATE_FORMAT).to_string(),
        )),
        "NOW()" => Ok(ParameterValue::String(Local::now().to_rfc3339())),
        _ => Err(ResolutionError::UnsupportedFormula(formula.to_string())),
    }
}

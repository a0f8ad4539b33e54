//! Report and parameter type definitions.
//!
//! This module defines the engine-agnostic data model produced by report
//! discovery. The types are designed for serialization with [`serde`] and
//! round-trip through YAML and JSON without loss.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Engine-native parameter value.
///
/// Default values are kept as JSON-compatible values so they survive a
/// serialization round-trip without type coercion.
pub type ParameterValue = serde_json::Value;

/// Semantic type of a report parameter.
///
/// Describes how callers must encode the value when rendering a report.
///
/// # Examples
///
/// ```
/// use report_api_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!("Integer".parse::<ValueType>(), Ok(ValueType::Number));
/// assert!("blob".parse::<ValueType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free text (the default).
    #[default]
    String,
    /// Integer or decimal number.
    Number,
    /// Calendar date in ISO-8601 form.
    Date,
    /// True/false flag.
    Boolean,
    /// Sequence of string values.
    List,
}

impl ValueType {
    /// Returns the lowercase tag used in serialized configurations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a type tag does not name a known [`ValueType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported parameter type: {0}")]
pub struct UnknownValueType(pub String);

impl FromStr for ValueType {
    type Err = UnknownValueType;

    /// Parses a type tag, accepting common aliases case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "number" | "integer" | "decimal" => Ok(Self::Number),
            "date" | "timestamp" => Ok(Self::Date),
            "boolean" | "bool" => Ok(Self::Boolean),
            "list" | "array" => Ok(Self::List),
            _ => Err(UnknownValueType(s.to_string())),
        }
    }
}

/// One input parameter accepted by a report.
///
/// Use [`required`](ParameterDefinition::required) or
/// [`optional`](ParameterDefinition::optional) to construct, then attach a
/// resolved default with [`with_default`](ParameterDefinition::with_default).
///
/// # Examples
///
/// ```
/// use report_api_core::{ParameterDefinition, ValueType};
///
/// let from = ParameterDefinition::required("from", ValueType::Date);
/// assert!(from.required);
/// assert!(from.default_value.is_none());
///
/// let limit = ParameterDefinition::optional("limit", ValueType::Number)
///     .with_default(Some(serde_json::json!(50)));
/// assert_eq!(limit.default_value, Some(serde_json::json!(50)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    /// Parameter identifier, unique within its report.
    pub name: String,
    /// Whether callers must supply a value at render time.
    pub required: bool,
    /// Resolved default value; `None` when unresolved or undeclared.
    #[serde(default)]
    pub default_value: Option<ParameterValue>,
    /// How callers must encode the value.
    #[serde(default)]
    pub value_type: ValueType,
}

impl ParameterDefinition {
    /// Creates a mandatory parameter without a default.
    pub fn required(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            default_value: None,
            value_type,
        }
    }

    /// Creates an optional parameter without a default.
    pub fn optional(name: &str, value_type: ValueType) -> Self {
        Self {
            required: false,
            ..Self::required(name, value_type)
        }
    }

    /// Sets the default value. A JSON `null` is stored as absent.
    pub fn with_default(mut self, value: Option<ParameterValue>) -> Self {
        self.default_value = value.filter(|v| !v.is_null());
        self
    }
}

/// One report discovered on disk.
///
/// Created once per report-definition file during a walk and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    /// Human-readable title declared inside the report file.
    pub report_name: String,
    /// Free-text description, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Free-text version, possibly empty.
    #[serde(default)]
    pub version: String,
    /// Path of the source report-definition file.
    pub report_file_path: PathBuf,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

impl ReportDefinition {
    /// Creates a definition with empty description, version and parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use report_api_core::ReportDefinition;
    ///
    /// let report = ReportDefinition::new("Sales Report", "reports/sales.rdef");
    /// assert_eq!(report.report_name, "Sales Report");
    /// assert!(report.parameters.is_empty());
    /// ```
    pub fn new(report_name: &str, report_file_path: impl Into<PathBuf>) -> Self {
        Self {
            report_name: report_name.to_string(),
            description: String::new(),
            version: String::new(),
            report_file_path: report_file_path.into(),
            parameters: Vec::new(),
        }
    }

    /// Looks up a parameter by name.
    pub fn find_parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns the names of all mandatory parameters.
    pub fn required_parameter_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// HTTP method a generated route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Every supported method, in declaration order.
    pub const ALL: [Method; 2] = [Method::Get, Method::Post];
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Output format a downstream server can render a report to.
///
/// [`OutputType::None`] is a sentinel meaning "no output" and is never
/// offered on a generated route.
///
/// # Examples
///
/// ```
/// use report_api_core::OutputType;
///
/// let offered: Vec<_> = OutputType::renderable().collect();
/// assert!(!offered.contains(&OutputType::None));
/// assert_eq!(offered.first(), Some(&OutputType::Pdf));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputType {
    Pdf,
    Html,
    Excel,
    Excel2007,
    Csv,
    Rtf,
    Txt,
    None,
}

impl OutputType {
    /// All output types in their fixed enumeration order.
    pub const ALL: [OutputType; 8] = [
        OutputType::Pdf,
        OutputType::Html,
        OutputType::Excel,
        OutputType::Excel2007,
        OutputType::Csv,
        OutputType::Rtf,
        OutputType::Txt,
        OutputType::None,
    ];

    /// Iterates over every output type except the `None` sentinel.
    pub fn renderable() -> impl Iterator<Item = OutputType> {
        Self::ALL.into_iter().filter(|t| *t != OutputType::None)
    }

    /// Returns the identifier used in serialized configurations.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Html => "HTML",
            Self::Excel => "EXCEL",
            Self::Excel2007 => "EXCEL2007",
            Self::Csv => "CSV",
            Self::Rtf => "RTF",
            Self::Txt => "TXT",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! API configuration synthesis from discovered reports.
//!
//! Synthesis is pure: it performs no I/O and keeps the input order.

use report_api_core::{
    ApiConfiguration, ApiOptions, Method, OutputType, ReportConfiguration, ReportDefinition,
};

/// Derives a route path from a report name.
///
/// Lower-cases the name, replaces each space with `_` and prefixes `/` when
/// missing. No collision detection is performed: two names that normalize
/// identically produce the same path.
///
/// # Examples
///
/// ```
/// use report_api_discovery::synthesize::derive_path;
///
/// assert_eq!(derive_path("Sales Report"), "/sales_report");
/// assert_eq!(derive_path("/Already Slashed"), "/already_slashed");
/// ```
pub fn derive_path(report_name: &str) -> String {
    let path = report_name.to_lowercase().replace(' ', "_");
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Output formats offered on every route: all types except the `NONE`
/// sentinel, in enumeration order.
pub fn supported_extensions() -> Vec<OutputType> {
    OutputType::renderable().collect()
}

/// Builds the route for one report.
pub fn report_configuration(definition: ReportDefinition) -> ReportConfiguration {
    ReportConfiguration {
        path: derive_path(&definition.report_name),
        report_name: definition.report_name,
        description: definition.description,
        version: definition.version,
        report_file_path: definition.report_file_path,
        parameters: definition.parameters,
        methods: Method::ALL.to_vec(),
        extensions: supported_extensions(),
    }
}

/// Folds discovered reports into a complete [`ApiConfiguration`].
///
/// # Examples
///
/// ```
/// use report_api_core::{ApiOptions, Method, ReportDefinition};
/// use report_api_discovery::synthesize::synthesize;
///
/// let reports = vec![ReportDefinition::new("Sales Report", "sales.rdef")];
/// let config = synthesize(reports, &ApiOptions::default());
///
/// assert_eq!(config.port, 4567);
/// assert_eq!(config.reports[0].path, "/sales_report");
/// assert_eq!(config.reports[0].methods, Method::ALL.to_vec());
/// ```
pub fn synthesize<I>(definitions: I, options: &ApiOptions) -> ApiConfiguration
where
    I: IntoIterator<Item = ReportDefinition>,
{
    let mut config = ApiConfiguration::new(options);
    config.reports = definitions.into_iter().map(report_configuration).collect();
    config
}

#[cfg(test)]
mod tests {
    use report_api_core::{ParameterDefinition, ValueType, validate_configuration};

    use super::*;

    #[test]
    fn test_derive_path_examples() {
        assert_eq!(derive_path("Sales Report"), "/sales_report");
        assert_eq!(derive_path("/Already Slashed"), "/already_slashed");
        assert_eq!(derive_path("inventory"), "/inventory");
        assert_eq!(derive_path("Two  Spaces"), "/two__spaces");
        assert_eq!(derive_path("Übersicht Q1"), "/übersicht_q1");
        assert_eq!(derive_path(""), "/");
    }

    #[test]
    fn test_derive_path_is_deterministic() {
        let name = "Quarterly Revenue By Region";
        assert_eq!(derive_path(name), derive_path(name));
    }

    #[test]
    fn test_synthesize_copies_definition_fields() {
        let mut definition = ReportDefinition::new("Sales Report", "reports/sales.rdef");
        definition.description = "Monthly sales".to_string();
        definition.version = "1.2".to_string();
        definition
            .parameters
            .push(ParameterDefinition::required("from", ValueType::Date));

        let config = synthesize(vec![definition.clone()], &ApiOptions::default());
        let route = &config.reports[0];
        assert_eq!(route.path, "/sales_report");
        assert_eq!(route.report_name, definition.report_name);
        assert_eq!(route.description, definition.description);
        assert_eq!(route.version, definition.version);
        assert_eq!(route.report_file_path, definition.report_file_path);
        assert_eq!(route.parameters, definition.parameters);
    }

    #[test]
    fn test_every_route_gets_full_methods_and_extensions() {
        let definitions = ["A", "B", "C"].map(|n| ReportDefinition::new(n, format!("{n}.rdef")));
        let config = synthesize(definitions, &ApiOptions::default());

        for route in &config.reports {
            assert_eq!(route.methods, vec![Method::Get, Method::Post]);
            assert!(!route.extensions.contains(&OutputType::None));
            assert_eq!(route.extensions, supported_extensions());
        }
    }

    #[test]
    fn test_synthesize_preserves_order_and_options() {
        let options = ApiOptions {
            api_root: "/reports".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        let definitions = ["Zeta", "Alpha", "Mid"].map(|n| ReportDefinition::new(n, "x.rdef"));
        let config = synthesize(definitions, &options);

        let paths: Vec<&str> = config.reports.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/zeta", "/alpha", "/mid"]);
        assert_eq!(config.api_root, "/reports");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let config = synthesize(Vec::new(), &ApiOptions::default());
        assert!(config.reports.is_empty());
        assert_eq!(config.api_root, "/api");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 4567);
    }

    #[test]
    fn test_colliding_names_are_kept_not_renamed() {
        let definitions = vec![
            ReportDefinition::new("Sales Report", "a.rdef"),
            ReportDefinition::new("sales report", "b.rdef"),
        ];
        let config = synthesize(definitions, &ApiOptions::default());

        // Both routes share a path; the later one shadows the earlier one in
        // the server. Validation reports it, synthesis does not fix it.
        assert_eq!(config.reports.len(), 2);
        assert_eq!(config.reports[0].path, config.reports[1].path);
        assert_eq!(validate_configuration(&config).len(), 1);
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use report_api_core::{ReportDefinition, validate_configuration};
use report_api_discovery::config::GeneratorConfig;
use report_api_discovery::generate::{GenerateOptions, generate};
use report_api_discovery::output::load_configuration;
use report_api_discovery::walker::{ReportWalker, max_depth_from_signed};
use report_api_discovery::xml::XmlReportEngine;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "report-api")]
#[command(about = "Generate REST API configurations from report definitions")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Discover report definitions and write an API configuration file.
    Generate(GenerateArgs),
    /// Check a generated API configuration for problems such as route collisions.
    Validate(ValidateArgs),
    /// Print discovered report definitions without writing anything.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Directory to search for report-definition files.
    source: PathBuf,
    /// Configuration file to write (.json for JSON, anything else for YAML).
    output: PathBuf,
    /// Generator settings file (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Mount prefix for all routes.
    #[arg(long)]
    api_root: Option<String>,
    /// Bind host written into the configuration.
    #[arg(long)]
    host: Option<String>,
    /// Bind port written into the configuration.
    #[arg(long)]
    port: Option<u16>,
    /// Maximum directory depth; negative means unbounded.
    #[arg(long, allow_negative_numbers = true)]
    max_depth: Option<i64>,
    /// Number of parallel extraction jobs.
    #[arg(long)]
    jobs: Option<usize>,
    /// Report-definition file extension.
    #[arg(long)]
    extension: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Generated configuration file (.yml/.yaml or .json).
    config: PathBuf,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Directory to search for report-definition files.
    source: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
    /// Maximum directory depth; negative means unbounded.
    #[arg(long, allow_negative_numbers = true)]
    max_depth: Option<i64>,
    /// Report-definition file extension.
    #[arg(long)]
    extension: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::Inspect(args) => run_inspect(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ---------------------------------------------------------------------------
// generate command
// ---------------------------------------------------------------------------

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let config = resolve_generator_config(&args)?;
    let engine = XmlReportEngine::with_extension(config.discovery.extension.clone());
    let options = GenerateOptions {
        api: config.api,
        max_depth: config.discovery.max_depth.and_then(max_depth_from_signed),
        jobs: config.discovery.jobs,
    };

    let outcome =
        generate(&engine, &args.source, &args.output, &options).map_err(|e| e.to_string())?;

    println!(
        "Generated {} route(s) into '{}'.",
        outcome.configuration.reports.len(),
        args.output.display()
    );

    if !outcome.failures.is_empty() {
        let skipped: Vec<String> = outcome
            .failures
            .iter()
            .map(|failure| failure.path.display().to_string())
            .collect();
        eprintln!(
            "{} report file(s) skipped: {}",
            skipped.len(),
            skipped.join(", ")
        );
    }
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

/// Layers command-line flags over the settings file over the defaults.
fn resolve_generator_config(args: &GenerateArgs) -> Result<GeneratorConfig, String> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path).map_err(|e| e.to_string())?,
        None => GeneratorConfig::default(),
    };

    if let Some(api_root) = &args.api_root {
        config.api.api_root = api_root.clone();
    }
    if let Some(host) = &args.host {
        config.api.host = host.clone();
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(max_depth) = args.max_depth {
        config.discovery.max_depth = Some(max_depth);
    }
    if let Some(jobs) = args.jobs {
        config.discovery.jobs = Some(jobs);
    }
    if let Some(extension) = &args.extension {
        config.discovery.extension = extension.clone();
    }

    if !config.api.api_root.starts_with('/') {
        return Err(format!(
            "API root must start with '/': {}",
            config.api.api_root
        ));
    }

    debug!(?config, "Resolved generator configuration");
    Ok(config)
}

// ---------------------------------------------------------------------------
// validate command
// ---------------------------------------------------------------------------

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let config = load_configuration(&args.config).map_err(|e| e.to_string())?;
    let errors = validate_configuration(&config);

    if errors.is_empty() {
        println!(
            "Configuration '{}' is valid ({} route(s)).",
            args.config.display(),
            config.reports.len()
        );
        return Ok(());
    }

    for error in &errors {
        eprintln!("{error}");
    }
    Err(format!(
        "{} problem(s) found in '{}'",
        errors.len(),
        args.config.display()
    ))
}

// ---------------------------------------------------------------------------
// inspect command
// ---------------------------------------------------------------------------

fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let engine = match &args.extension {
        Some(extension) => XmlReportEngine::with_extension(extension.clone()),
        None => XmlReportEngine::new(),
    };
    let walker = ReportWalker::new(&engine, &args.source)
        .map_err(|e| e.to_string())?
        .with_max_depth(args.max_depth.and_then(max_depth_from_signed));
    let reports: Vec<ReportDefinition> = walker.walk().collect();

    let output = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&reports)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        CliOutputFormat::Table => reports_to_table(&reports),
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn reports_to_table(reports: &[ReportDefinition]) -> String {
    if reports.is_empty() {
        return "No report definitions found.".to_string();
    }

    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("Report: {}", report.report_name));
        if !report.version.is_empty() {
            out.push_str(&format!("  Version: {}", report.version));
        }
        out.push('\n');
        out.push_str(&format!("  File: {}\n", report.report_file_path.display()));
        if !report.description.is_empty() {
            out.push_str(&format!("  {}\n", report.description));
        }

        if report.parameters.is_empty() {
            out.push('\n');
            continue;
        }

        let width = report
            .parameters
            .iter()
            .map(|p| p.name.len())
            .max()
            .unwrap_or(4);
        out.push_str("  Parameters:\n");
        for param in &report.parameters {
            let required = if param.required { "required" } else { "optional" };
            let default = param
                .default_value
                .as_ref()
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "    {:<width$}  {:<7}  {:<8}  {}\n",
                param.name, param.value_type, required, default
            ));
        }
        out.push('\n');
    }
    out
}

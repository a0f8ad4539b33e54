//! Serialization and persistence of generated configurations.
//!
//! The whole artifact is rendered in memory, written to a staging file next
//! to the destination and persisted over it in one rename. A failed write
//! never leaves a half-written destination behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use report_api_core::ApiConfiguration;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{GenerateError, Result};

/// Text formats a configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension: `.json` is JSON, anything
    /// else is YAML.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use report_api_discovery::output::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path(Path::new("api.json")), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path(Path::new("api.yml")), ConfigFormat::Yaml);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Renders a configuration to text.
pub fn format_configuration(
    config: &ApiConfiguration,
    format: ConfigFormat,
) -> std::result::Result<String, String> {
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::to_string(config).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map(|mut raw| {
                raw.push('\n');
                raw
            })
            .map_err(|e| format!("JSON serialization failed: {e}")),
    }
}

/// Writes `config` to `destination`, replacing any existing file.
///
/// The format follows [`ConfigFormat::from_path`].
///
/// # Errors
///
/// Returns [`GenerateError::Write`] naming `destination` if serialization
/// fails, the parent directory is missing or unwritable, or the final rename
/// fails. No destination file is created in any of these cases.
pub fn write_configuration(config: &ApiConfiguration, destination: &Path) -> Result<()> {
    let raw = format_configuration(config, ConfigFormat::from_path(destination))
        .map_err(|reason| GenerateError::write(destination, reason))?;

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged =
        NamedTempFile::new_in(parent).map_err(|e| GenerateError::write(destination, e))?;
    staged
        .write_all(raw.as_bytes())
        .and_then(|()| staged.flush())
        .map_err(|e| GenerateError::write(destination, e))?;
    if let Some(permissions) = artifact_permissions(destination) {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| GenerateError::write(destination, e))?;
    }
    staged
        .persist(destination)
        .map_err(|e| GenerateError::write(destination, e.error))?;

    debug!(
        path = %destination.display(),
        reports = config.reports.len(),
        "Wrote API configuration"
    );
    Ok(())
}

/// Mode the persisted artifact should carry.
///
/// An existing destination keeps its mode. A new file gets `0644` on Unix
/// instead of the owner-only mode of the staging file, so a server running
/// as another user can read it.
fn artifact_permissions(destination: &Path) -> Option<fs::Permissions> {
    if let Ok(metadata) = fs::metadata(destination) {
        return Some(metadata.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Loads a configuration previously written by [`write_configuration`].
///
/// # Errors
///
/// Returns [`GenerateError::Read`] if the file cannot be read or parsed.
pub fn load_configuration(path: &Path) -> Result<ApiConfiguration> {
    let raw = fs::read_to_string(path).map_err(|e| GenerateError::read(path, e))?;
    match ConfigFormat::from_path(path) {
        ConfigFormat::Yaml => serde_yaml::from_str(&raw).map_err(|e| GenerateError::read(path, e)),
        ConfigFormat::Json => serde_json::from_str(&raw).map_err(|e| GenerateError::read(path, e)),
    }
}

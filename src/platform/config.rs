// SimLog Report - platform/config.rs
//
// Platform config directory resolution and optional config.toml loading
// with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SimLog Report.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/simlogreport/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so one config file can serve several
/// versions of the tool.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[paths]` section.
    pub paths: PathsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[paths]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Simulation log to read.
    pub log_file: Option<String>,
    /// Directory the two tables are written into.
    pub out_dir: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
///
/// `None` means "not set in the file"; the caller falls back to the CLI
/// value or the built-in default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub log_file: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Load and validate a config file.
///
/// A missing file is only an error when `required` is set (the user named
/// it explicitly); otherwise defaults are returned. Unreadable or
/// unparseable files are errors. Invalid individual values become warnings
/// and are left unset.
///
/// Runs before logging is initialised, so warnings are returned for the
/// caller to log rather than emitted here.
pub fn load_config(
    config_path: &Path,
    required: bool,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !required && !config_path.exists() {
        return Ok((AppConfig::default(), Vec::new()));
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    Ok(validate(raw))
}

/// Validate each field of a parsed config, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    config.log_file = non_empty_path("paths.log_file", raw.paths.log_file, &mut warnings);
    config.out_dir = non_empty_path("paths.out_dir", raw.paths.out_dir, &mut warnings);

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "logging.level".to_string(),
                    value: level,
                    expected: "one of error, warn, info, debug, trace".to_string(),
                }
                .to_string(),
            );
        }
    }

    (config, warnings)
}

fn non_empty_path(
    field: &str,
    value: Option<String>,
    warnings: &mut Vec<String>,
) -> Option<PathBuf> {
    match value {
        Some(v) if v.trim().is_empty() => {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: field.to_string(),
                    value: v,
                    expected: "a non-empty path".to_string(),
                }
                .to_string(),
            );
            None
        }
        Some(v) => Some(PathBuf::from(v)),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        let raw: RawConfig = toml::from_str(toml_text).unwrap();
        validate(raw)
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = parse(
            r#"
[paths]
log_file = "runs/sim.log"
out_dir = "reports"

[logging]
level = "debug"
"#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.log_file, Some(PathBuf::from("runs/sim.log")));
        assert_eq!(config.out_dir, Some(PathBuf::from("reports")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_config_is_all_unset() {
        let (config, warnings) = parse("");
        assert!(warnings.is_empty());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (config, warnings) = parse("[paths]\nout_dir = \"x\"\n[future]\nknob = 3\n");
        assert!(warnings.is_empty());
        assert_eq!(config.out_dir, Some(PathBuf::from("x")));
    }

    #[test]
    fn test_invalid_values_warn_and_stay_unset() {
        let (config, warnings) = parse("[paths]\nout_dir = \"  \"\n[logging]\nlevel = \"loud\"\n");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("paths.out_dir"));
        assert!(warnings[1].contains("logging.level"));
        assert_eq!(config.out_dir, None);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_missing_optional_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"), false).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_required_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("config.toml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_unparseable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paths\nout_dir = ").unwrap();
        let err = load_config(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }
}

// SimLog Report - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Non-matching log lines are not errors and never appear here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for a report run.
#[derive(Debug)]
pub enum SimLogError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Writing one of the output tables failed.
    Export(ExportError),

    /// I/O error with path context (reading the log, creating the output dir).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SimLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SimLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to encoding or writing the output tables.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing a table.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for SimLogError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is not acceptable.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimLogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for report results.
pub type Result<T> = std::result::Result<T, SimLogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display_names_operation_and_path() {
        let err = SimLogError::Io {
            path: PathBuf::from("missing.log"),
            operation: "read log file",
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let text = err.to_string();
        assert!(text.contains("read log file"), "got: {text}");
        assert!(text.contains("missing.log"), "got: {text}");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_converts_to_top_level() {
        let err: SimLogError = ConfigError::ValueOutOfRange {
            field: "paths.out_dir".to_string(),
            value: String::new(),
            expected: "a non-empty path".to_string(),
        }
        .into();
        assert!(matches!(err, SimLogError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}

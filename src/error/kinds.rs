use std::{fmt, io};

/// Crate-wide `Result` type using [`FilterqError`] as the error.
pub type Result<T> = std::result::Result<T, FilterqError>;

/// Top-level error type for filterq operations.
#[derive(Debug)]
pub enum FilterqError {
    /// Schema ingestion errors.
    Schema(SchemaError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors raised while ingesting a schema graph.
///
/// These are reported once, when the graph is loaded, never per keystroke.
#[derive(Debug)]
pub enum SchemaError {
    /// The schema document is not a JSON object.
    NotAnObject,

    /// The schema document has no `models` mapping.
    MissingModels,

    /// The document is not valid JSON or has the wrong shape.
    InvalidFormat(String),

    /// A field definition is inconsistent.
    InvalidField {
        model: String,
        field: String,
        reason: String,
    },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for FilterqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterqError::Schema(e) => write!(f, "Schema error: {e}"),
            FilterqError::Config(e) => write!(f, "Configuration error: {e}"),
            FilterqError::Io(e) => write!(f, "I/O error: {e}"),
            FilterqError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NotAnObject => write!(f, "schema must be a JSON object"),
            SchemaError::MissingModels => write!(f, "schema has no 'models' mapping"),
            SchemaError::InvalidFormat(msg) => write!(f, "invalid schema format: {msg}"),
            SchemaError::InvalidField {
                model,
                field,
                reason,
            } => write!(f, "invalid field '{model}.{field}': {reason}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for FilterqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterqError::Schema(e) => Some(e),
            FilterqError::Config(e) => Some(e),
            FilterqError::Io(e) => Some(e),
            FilterqError::Generic(_) => None,
        }
    }
}
impl std::error::Error for SchemaError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to FilterqError ========================= */

impl From<io::Error> for FilterqError {
    fn from(err: io::Error) -> Self {
        FilterqError::Io(err)
    }
}

impl From<SchemaError> for FilterqError {
    fn from(err: SchemaError) -> Self {
        FilterqError::Schema(err)
    }
}

impl From<ConfigError> for FilterqError {
    fn from(err: ConfigError) -> Self {
        FilterqError::Config(err)
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::InvalidFormat(err.to_string())
    }
}

impl From<String> for FilterqError {
    fn from(msg: String) -> Self {
        FilterqError::Generic(msg)
    }
}

impl From<&str> for FilterqError {
    fn from(msg: &str) -> Self {
        FilterqError::Generic(msg.to_owned())
    }
}

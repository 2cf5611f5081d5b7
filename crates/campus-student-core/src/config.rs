//! Student service configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use campus_student_http::service::DEFAULT_MAX_BODY_BYTES;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `STUDENT_STORE` names no known backend.
    #[error("unknown STUDENT_STORE value '{0}' (expected 'memory' or 'dynamodb')")]
    UnknownStore(String),
    /// A variable holds a value that does not parse.
    #[error("invalid value for {key}: '{value}'")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Which Student Store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local concurrent map. State is lost on exit.
    #[default]
    Memory,
    /// A DynamoDB table keyed by `StudentID`.
    DynamoDb,
}

impl StoreBackend {
    /// Returns the backend name as used in `STUDENT_STORE`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::DynamoDb => "dynamodb",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "dynamodb" => Ok(Self::DynamoDb),
            _ => Err(ConfigError::UnknownStore(s.to_owned())),
        }
    }
}

/// Student service configuration.
#[derive(Debug, Clone)]
pub struct StudentConfig {
    /// Store backend.
    pub store: StoreBackend,
    /// Table holding student records (DynamoDB backend).
    pub table_name: String,
    /// Override for the DynamoDB endpoint, e.g. a local emulator.
    pub dynamodb_endpoint_url: Option<String>,
    /// Default AWS region.
    pub default_region: String,
    /// Collection path served by the HTTP layer.
    pub base_path: String,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl StudentConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store = match lookup("STUDENT_STORE") {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => defaults.store,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "MAX_BODY_BYTES",
                value: v.clone(),
            })?,
            None => defaults.max_body_bytes,
        };

        Ok(Self {
            store,
            table_name: lookup("STUDENTS_TABLE").unwrap_or(defaults.table_name),
            dynamodb_endpoint_url: lookup("DYNAMODB_ENDPOINT_URL").filter(|v| !v.is_empty()),
            default_region: lookup("DEFAULT_REGION").unwrap_or(defaults.default_region),
            base_path: lookup("STUDENTS_BASE_PATH").unwrap_or(defaults.base_path),
            max_body_bytes,
        })
    }
}

impl Default for StudentConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            table_name: "Students".to_owned(),
            dynamodb_endpoint_url: None,
            default_region: "us-east-1".to_owned(),
            base_path: "/students".to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

//! Decoder configuration.
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! untagged-fields = "skip"
//! query-cache-capacity = 64
//! ```

use crate::query::DEFAULT_CACHE_CAPACITY;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with a non-struct field that carries no query expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UntaggedFields {
    /// Ignore the field and every field declared after it in the same
    /// struct.
    #[default]
    Stop,
    /// Ignore only the untagged field and carry on with its siblings.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DecoderConfig {
    pub untagged_fields: UntaggedFields,
    /// Compiled XPath expressions kept per decode call. Zero disables the
    /// cache.
    pub query_cache_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            untagged_fields: UntaggedFields::default(),
            query_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl DecoderConfig {
    pub fn with_untagged_fields(mut self, policy: UntaggedFields) -> Self {
        self.untagged_fields = policy;
        self
    }

    pub fn with_query_cache_capacity(mut self, capacity: usize) -> Self {
        self.query_cache_capacity = capacity;
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml { path: None, source })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|error| error.with_path(path))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path.to_path_buf()),
                source,
            },
            ConfigError::Toml { .. } => self,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read decoder config from {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse decoder config TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse decoder config TOML: {}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
        }
    }
}

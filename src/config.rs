//! Runtime configuration.
//!
//! Loaded once at startup from environment variables; command-line flags
//! override individual values.
//!
//! - `BLZCHECK_DATA`: bank data file or directory (default: bundled dataset)
//! - `BLZCHECK_ENCODING`: encoding of that file (default: `UTF-8`)

use crate::encoding::TextEncoding;
use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;

pub const DATA_ENV: &str = "BLZCHECK_DATA";
pub const ENCODING_ENV: &str = "BLZCHECK_ENCODING";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Data file or directory; `None` uses the bundled dataset
    pub data_path: Option<PathBuf>,

    /// Declared encoding of the data file
    pub source_encoding: TextEncoding,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEncoding` if `BLZCHECK_ENCODING` names an
    /// unsupported encoding.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup(DATA_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let source_encoding = match lookup(ENCODING_ENV) {
            Some(label) if !label.trim().is_empty() => label.parse()?,
            _ => TextEncoding::default(),
        };

        Ok(Config {
            data_path,
            source_encoding,
        })
    }

    /// Builder pattern: override the data path
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Builder pattern: override the source encoding
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.source_encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.data_path.is_none());
        assert_eq!(config.source_encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_reads_env_values() {
        let config = Config::from_lookup(lookup(&[
            (DATA_ENV, "/usr/share/blzcheck"),
            (ENCODING_ENV, "ISO-8859-15"),
        ]))
        .unwrap();

        assert_eq!(config.data_path, Some(PathBuf::from("/usr/share/blzcheck")));
        assert_eq!(config.source_encoding, TextEncoding::Latin9);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_lookup(lookup(&[(DATA_ENV, " "), (ENCODING_ENV, "")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_encoding_is_an_error() {
        let err = Config::from_lookup(lookup(&[(ENCODING_ENV, "UTF-16")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownEncoding("UTF-16".to_string()));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::default()
            .with_data_path("bankdata.txt")
            .with_encoding(TextEncoding::Latin1);
        assert_eq!(config.data_path, Some(PathBuf::from("bankdata.txt")));
        assert_eq!(config.source_encoding, TextEncoding::Latin1);
    }
}

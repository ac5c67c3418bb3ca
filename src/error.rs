// ⚠️ Error Types
// Load failures are fatal to construction, lookups are recoverable

use std::path::PathBuf;

/// Errors raised while loading a bank data file into a registry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data file (or directory) does not exist.
    #[error("bank data not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The data file exists but could not be read.
    #[error("failed to read bank data {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data directory contains neither a dated nor an undated data file.
    #[error("no bank data file in directory {}", dir.display())]
    NoDataFile { dir: PathBuf },

    /// The file had content but not a single line was a valid record.
    #[error("no valid bank records in {} ({skipped} lines skipped)", path.display())]
    NoRecords { path: PathBuf, skipped: usize },
}

/// Requested bank identifier is not in the loaded registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown BLZ: {0}")]
pub struct NotFoundError(pub String);

impl NotFoundError {
    pub fn bank_id(&self) -> &str {
        &self.0
    }
}

/// Configuration values that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let err = NotFoundError("00000000".to_string());
        assert_eq!(err.to_string(), "unknown BLZ: 00000000");
        assert_eq!(err.bank_id(), "00000000");
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::NoRecords {
            path: PathBuf::from("/tmp/bankdata.txt"),
            skipped: 3,
        };
        assert_eq!(
            err.to_string(),
            "no valid bank records in /tmp/bankdata.txt (3 lines skipped)"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = LoadError::Io {
            path: PathBuf::from("bankdata.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}

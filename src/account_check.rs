// 🔎 Account Number Check - public facade
//
// One handle per loaded dataset. Clones share the same immutable registry,
// so a handle can be passed to as many threads as needed.

use crate::config::Config;
use crate::encoding::{TextEncoding, OUTPUT_ENCODING};
use crate::engine::{self, CheckReport, CheckResult};
use crate::entities::{BankRecord, BankRegistry};
use crate::error::{LoadError, NotFoundError};
use crate::loader::{self, BUNDLED_LABEL};
use crate::methods::Method;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Informational metadata about the library and the loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub library_version: &'static str,
    pub data_directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
    pub text_encoding: &'static str,
    pub source_encoding: &'static str,
    pub bank_count: usize,
    pub skipped: usize,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    pub methods_implemented: usize,
}

#[derive(Debug, Clone)]
pub struct AccountNumberCheck {
    registry: Arc<BankRegistry>,
}

impl AccountNumberCheck {
    /// Checker over the dataset bundled with the library
    pub fn new_default() -> Self {
        Self::from_registry(loader::load_bundled())
    }

    /// Checker over a UTF-8 data file, or a directory holding one
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_path_with_encoding(path, TextEncoding::Utf8)
    }

    /// Checker over a data file in a declared encoding
    pub fn from_path_with_encoding(
        path: impl AsRef<Path>,
        encoding: TextEncoding,
    ) -> Result<Self, LoadError> {
        loader::load(path.as_ref(), encoding).map(Self::from_registry)
    }

    /// Checker as configured: the configured path, or the bundled dataset
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        match &config.data_path {
            Some(path) => Self::from_path_with_encoding(path, config.source_encoding),
            None => Ok(Self::new_default()),
        }
    }

    /// Checker over an already built registry
    pub fn from_registry(registry: BankRegistry) -> Self {
        AccountNumberCheck {
            registry: Arc::new(registry),
        }
    }

    // ========================================================================
    // CHECKS
    // ========================================================================

    pub fn check(&self, bank_id: &str, account: &str) -> CheckResult {
        engine::check(&self.registry, bank_id, account)
    }

    pub fn check_detailed(&self, bank_id: &str, account: &str) -> CheckReport {
        engine::check_detailed(&self.registry, bank_id, account)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Look up a bank by its code
    pub fn find_bank(&self, bank_id: &str) -> Result<BankRecord, NotFoundError> {
        self.registry
            .get(bank_id)
            .cloned()
            .ok_or_else(|| NotFoundError(bank_id.to_string()))
    }

    /// Number of bank records loaded
    pub fn bank_count(&self) -> usize {
        self.registry.count()
    }

    /// Number of data file lines dropped while loading
    pub fn skipped_count(&self) -> usize {
        self.registry.source().skipped
    }

    pub fn registry(&self) -> &BankRegistry {
        &self.registry
    }

    // ========================================================================
    // METADATA
    // ========================================================================

    pub fn library_version(&self) -> &'static str {
        crate::VERSION
    }

    /// Directory of the data file, or `(bundled)` for the compiled-in dataset
    pub fn data_directory(&self) -> String {
        match &self.registry.source().directory {
            Some(dir) => dir.display().to_string(),
            None => BUNDLED_LABEL.to_string(),
        }
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.registry.source().file.as_deref()
    }

    /// Encoding of every string this checker returns
    pub fn text_encoding(&self) -> &'static str {
        OUTPUT_ENCODING
    }

    /// Declared encoding of the data file the registry was loaded from
    pub fn source_encoding(&self) -> TextEncoding {
        self.registry.source().encoding
    }

    pub fn fingerprint(&self) -> &str {
        &self.registry.source().fingerprint
    }

    pub fn metadata(&self) -> Metadata {
        let source = self.registry.source();
        Metadata {
            library_version: self.library_version(),
            data_directory: self.data_directory(),
            data_file: source.file.as_ref().map(|f| f.display().to_string()),
            text_encoding: self.text_encoding(),
            source_encoding: source.encoding.label(),
            bank_count: self.bank_count(),
            skipped: source.skipped,
            fingerprint: source.fingerprint.clone(),
            valid_from: source.valid_from,
            methods_implemented: Method::ALL.len(),
        }
    }
}

impl Default for AccountNumberCheck {
    fn default() -> Self {
        Self::new_default()
    }
}

// ============================================================================
// TESTS
// ============================================================================

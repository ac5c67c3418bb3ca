// blzcheck - Core Library
// German bank code (BLZ) registry and account number check-digit validation
// Exposes all modules for use in the CLI and in tests

pub mod config;
pub mod encoding;
pub mod entities;
pub mod error;
pub mod loader;
pub mod methods;
pub mod engine;
pub mod account_check;

// Re-export commonly used types
pub use account_check::{AccountNumberCheck, Metadata};
pub use config::Config;
pub use encoding::{TextEncoding, OUTPUT_ENCODING};
pub use engine::{check, check_detailed, CheckReport, CheckResult};
pub use entities::{AlgorithmParams, BankRecord, BankRegistry};
pub use error::{ConfigError, LoadError, NotFoundError};
pub use loader::{load, load_bundled, DataSource, BUNDLED_LABEL};
pub use methods::{AccountNumber, CheckInput, Method, Verdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library version, as reported by every checker
pub fn library_version() -> &'static str {
    VERSION
}

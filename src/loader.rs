// 📂 Registry Loader - bank data file → BankRegistry
//
// File format (one bank per line, TAB separated):
//
//   bank_id <TAB> method <TAB> name <TAB> location [<TAB> params]
//
// Blank lines and lines starting with '#' are ignored. A malformed line is
// logged and skipped; only a missing, unreadable or entirely invalid file
// fails the load.

use crate::encoding::TextEncoding;
use crate::entities::{AlgorithmParams, BankRecord, BankRegistry};
use crate::error::LoadError;
use chrono::{Local, NaiveDate};
use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Undated data file name inside a data directory
pub const DATA_FILE_NAME: &str = "bankdata.txt";

/// Bank codes are exactly this many digits
pub const BANK_ID_LEN: usize = 8;

/// Stands in for the data file and directory of the bundled dataset
pub const BUNDLED_LABEL: &str = "(bundled)";

static BUNDLED_DATA: &[u8] = include_bytes!("../data/bankdata.txt");

// ============================================================================
// DATA SOURCE
// ============================================================================

/// Provenance of a loaded registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSource {
    /// Data file; `None` for the bundled dataset and in-memory registries
    pub file: Option<PathBuf>,

    /// Directory the data file was read from; `None` when there is no file
    pub directory: Option<PathBuf>,

    /// Declared encoding of the file
    pub encoding: TextEncoding,

    /// SHA-256 of the raw file bytes (hex)
    pub fingerprint: String,

    /// Lines dropped as malformed or duplicate
    pub skipped: usize,

    /// Date from a `bankdata_YYYYMMDD.txt` file name
    pub valid_from: Option<NaiveDate>,
}

impl DataSource {
    pub fn in_memory() -> Self {
        DataSource {
            file: None,
            directory: None,
            encoding: TextEncoding::Utf8,
            fingerprint: String::new(),
            skipped: 0,
            valid_from: None,
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load the dataset compiled into the library.
pub fn load_bundled() -> BankRegistry {
    let (records, skipped) = parse_records(BUNDLED_DATA, TextEncoding::Utf8, "bundled bankdata");

    tracing::info!(records = records.len(), skipped, "loaded bundled bank data");

    BankRegistry::new(
        records,
        DataSource {
            file: None,
            directory: None,
            encoding: TextEncoding::Utf8,
            fingerprint: fingerprint(BUNDLED_DATA),
            skipped,
            valid_from: None,
        },
    )
}

/// Load a registry from a data file or a data directory.
///
/// For a directory the newest `bankdata_YYYYMMDD.txt` not dated in the future
/// is used, falling back to `bankdata.txt`.
pub fn load(path: &Path, encoding: TextEncoding) -> Result<BankRegistry, LoadError> {
    let (file, valid_from) = resolve_data_file(path, Local::now().date_naive())?;

    let bytes = fs::read(&file).map_err(|source| LoadError::Io {
        path: file.clone(),
        source,
    })?;

    let (records, skipped) = parse_records(&bytes, encoding, &file.display().to_string());
    if records.is_empty() {
        return Err(LoadError::NoRecords { path: file, skipped });
    }

    tracing::info!(
        path = %file.display(),
        records = records.len(),
        skipped,
        encoding = %encoding,
        "loaded bank data"
    );

    let directory = file.parent().map(Path::to_path_buf);

    Ok(BankRegistry::new(
        records,
        DataSource {
            file: Some(file),
            directory,
            encoding,
            fingerprint: fingerprint(&bytes),
            skipped,
            valid_from,
        },
    ))
}

/// Pick the data file to load for `path` as of `today`.
pub fn resolve_data_file(
    path: &Path,
    today: NaiveDate,
) -> Result<(PathBuf, Option<NaiveDate>), LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_dir() {
        return Ok((path.to_path_buf(), dated_file_name(path)));
    }

    let entries = fs::read_dir(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let newest = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter_map(|p| dated_file_name(&p).map(|date| (date, p)))
        .filter(|(date, _)| *date <= today)
        .max_by_key(|(date, _)| *date);

    if let Some((date, file)) = newest {
        tracing::debug!(file = %file.display(), %date, "selected dated bank data file");
        return Ok((file, Some(date)));
    }

    let undated = path.join(DATA_FILE_NAME);
    if undated.is_file() {
        return Ok((undated, None));
    }

    Err(LoadError::NoDataFile {
        dir: path.to_path_buf(),
    })
}

/// Date in a `bankdata_YYYYMMDD.txt` file name
fn dated_file_name(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let stamp = name.strip_prefix("bankdata_")?.strip_suffix(".txt")?;
    if stamp.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(stamp, "%Y%m%d").ok()
}

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse raw data file bytes into records.
///
/// Returns the valid records in file order and the number of skipped lines.
pub fn parse_records(bytes: &[u8], encoding: TextEncoding, origin: &str) -> (Vec<BankRecord>, usize) {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(bytes);

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0;

    for result in reader.byte_records() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(origin, error = %err, "unreadable line in bank data");
                skipped += 1;
                continue;
            }
        };

        let line = raw.position().map(|p| p.line()).unwrap_or(0);

        if raw.iter().all(|field| field.trim_ascii().is_empty()) {
            continue;
        }

        match parse_line(&raw, encoding) {
            Ok(record) => {
                if seen.insert(record.bank_id.clone()) {
                    records.push(record);
                } else {
                    tracing::warn!(origin, line, bank_id = %record.bank_id, "duplicate bank code skipped");
                    skipped += 1;
                }
            }
            Err(reason) => {
                tracing::warn!(origin, line, %reason, "malformed bank record skipped");
                skipped += 1;
            }
        }
    }

    (records, skipped)
}

fn parse_line(raw: &ByteRecord, encoding: TextEncoding) -> Result<BankRecord, String> {
    if raw.len() < 4 {
        return Err(format!("expected at least 4 fields, found {}", raw.len()));
    }

    let field = |i: usize| -> String {
        raw.get(i)
            .map(|bytes| encoding.decode(bytes).trim().to_string())
            .unwrap_or_default()
    };

    let bank_id = field(0);
    if bank_id.len() != BANK_ID_LEN || !bank_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid bank code '{}'", bank_id));
    }

    let method = field(1);
    if method.is_empty() {
        return Err("missing check method".to_string());
    }

    let name = field(2);
    if name.is_empty() {
        return Err("missing bank name".to_string());
    }

    let params = match raw.get(4) {
        Some(_) => AlgorithmParams::parse(&field(4))?,
        None => AlgorithmParams::default(),
    };

    Ok(BankRecord::new(&bank_id, &name, &field(3), &method).with_params(params))
}

// ============================================================================
// TESTS
// ============================================================================

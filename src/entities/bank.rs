// 🏦 Bank Entity - one record per bank code (BLZ)
//
// "The bank code is IDENTITY, everything else on the record is a VALUE"
//
// Records are plain owned values. The registry owns all of them and never
// changes after loading, so it can be shared between threads without locks.

use crate::loader::DataSource;
use crate::methods::AccountNumber;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ============================================================================
// ALGORITHM PARAMETERS
// ============================================================================

/// Per-record parameters for the check method
///
/// Written in the optional fifth column of the data file as
/// `exempt=<account>,<account>,...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmParams {
    /// Account numbers (normalized to 10 digits) that are valid without a check
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exempt: BTreeSet<String>,
}

impl AlgorithmParams {
    /// Parse the parameter column.
    ///
    /// Entries are separated by `;`, each `key=value`. The only key is
    /// `exempt`, a comma-separated list of account numbers.
    pub fn parse(column: &str) -> Result<Self, String> {
        let mut params = AlgorithmParams::default();

        for entry in column.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got '{}'", entry))?;

            match key.trim() {
                "exempt" => {
                    for raw in value.split(',').map(str::trim).filter(|v| !v.is_empty()) {
                        let account = AccountNumber::parse(raw)
                            .ok_or_else(|| format!("invalid exempt account number '{}'", raw))?;
                        params.exempt.insert(account.to_string());
                    }
                }
                other => return Err(format!("unknown parameter '{}'", other)),
            }
        }

        Ok(params)
    }

    pub fn is_empty(&self) -> bool {
        self.exempt.is_empty()
    }

    pub fn is_exempt(&self, account: &AccountNumber) -> bool {
        !self.exempt.is_empty() && self.exempt.contains(&account.to_string())
    }
}

// ============================================================================
// BANK RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    /// Bank code, 8 digits
    pub bank_id: String,

    pub name: String,

    pub location: String,

    /// Check method id as written in the data file (e.g. "00", "A1")
    pub method: String,

    #[serde(default, skip_serializing_if = "AlgorithmParams::is_empty")]
    pub params: AlgorithmParams,
}

impl BankRecord {
    pub fn new(bank_id: &str, name: &str, location: &str, method: &str) -> Self {
        BankRecord {
            bank_id: bank_id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            method: method.to_string(),
            params: AlgorithmParams::default(),
        }
    }

    /// Builder pattern: attach method parameters
    pub fn with_params(mut self, params: AlgorithmParams) -> Self {
        self.params = params;
        self
    }
}

// ============================================================================
// BANK REGISTRY
// ============================================================================

/// Registry of all loaded banks
///
/// Records keep file order; the index maps each bank code to its position.
#[derive(Debug, Clone)]
pub struct BankRegistry {
    records: Vec<BankRecord>,
    index: HashMap<String, usize>,
    source: DataSource,
}

impl BankRegistry {
    /// Build a registry from records with unique bank codes.
    ///
    /// The loader drops, logs and counts duplicates before calling this. For
    /// records built in memory a repeated code keeps its first record and the
    /// later ones are dropped without being counted.
    pub fn new(records: Vec<BankRecord>, source: DataSource) -> Self {
        let mut unique = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            if index.contains_key(&record.bank_id) {
                continue;
            }
            index.insert(record.bank_id.clone(), unique.len());
            unique.push(record);
        }

        BankRegistry {
            records: unique,
            index,
            source,
        }
    }

    /// Registry over in-memory records (no backing file)
    pub fn from_records(records: Vec<BankRecord>) -> Self {
        Self::new(records, DataSource::in_memory())
    }

    /// Find a bank by code. Surrounding whitespace is ignored.
    pub fn get(&self, bank_id: &str) -> Option<&BankRecord> {
        self.index.get(bank_id.trim()).map(|&i| &self.records[i])
    }

    pub fn contains(&self, bank_id: &str) -> bool {
        self.index.contains_key(bank_id.trim())
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in file order
    pub fn iter(&self) -> impl Iterator<Item = &BankRecord> {
        self.records.iter()
    }

    /// Get banks using a check method (exact id match)
    pub fn by_method(&self, method: &str) -> Vec<&BankRecord> {
        self.records.iter().filter(|r| r.method == method).collect()
    }

    /// Number of banks per check method id
    pub fn method_usage(&self) -> BTreeMap<&str, usize> {
        let mut usage = BTreeMap::new();
        for record in &self.records {
            *usage.entry(record.method.as_str()).or_insert(0) += 1;
        }
        usage
    }

    /// Where the records came from
    pub fn source(&self) -> &DataSource {
        &self.source
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> BankRegistry {
        BankRegistry::from_records(vec![
            BankRecord::new("10000000", "Bundesbank", "Berlin", "00"),
            BankRecord::new("37040044", "Commerzbank", "Köln", "13"),
            BankRecord::new("50010517", "ING-DiBa", "Frankfurt am Main", "00"),
        ])
    }

    #[test]
    fn test_registry_lookup() {
        let registry = sample_registry();

        let bank = registry.get("37040044").unwrap();
        assert_eq!(bank.name, "Commerzbank");
        assert_eq!(bank.location, "Köln");

        assert!(registry.get(" 10000000 ").is_some());
        assert!(registry.get("99999999").is_none());
        assert!(registry.contains("50010517"));
    }

    #[test]
    fn test_registry_keeps_file_order() {
        let registry = sample_registry();
        let ids: Vec<&str> = registry.iter().map(|r| r.bank_id.as_str()).collect();
        assert_eq!(ids, vec!["10000000", "37040044", "50010517"]);
    }

    #[test]
    fn test_registry_first_duplicate_wins() {
        let registry = BankRegistry::from_records(vec![
            BankRecord::new("10000000", "First", "Berlin", "00"),
            BankRecord::new("10000000", "Second", "Bonn", "09"),
        ]);

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get("10000000").unwrap().name, "First");
    }

    #[test]
    fn test_registry_by_method() {
        let registry = sample_registry();
        assert_eq!(registry.by_method("00").len(), 2);
        assert_eq!(registry.by_method("13").len(), 1);
        assert!(registry.by_method("A1").is_empty());

        let usage = registry.method_usage();
        assert_eq!(usage.get("00"), Some(&2));
        assert_eq!(usage.get("13"), Some(&1));
    }

    #[test]
    fn test_empty_registry() {
        let registry = BankRegistry::from_records(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_params_parse_exempt_list() {
        let params = AlgorithmParams::parse("exempt=4711, 0000001234").unwrap();
        assert_eq!(params.exempt.len(), 2);
        assert!(params.exempt.contains("0000004711"));
        assert!(params.is_exempt(&AccountNumber::parse("1234").unwrap()));
        assert!(!params.is_exempt(&AccountNumber::parse("1235").unwrap()));
    }

    #[test]
    fn test_params_parse_errors() {
        assert!(AlgorithmParams::parse("exempt").is_err());
        assert!(AlgorithmParams::parse("exempt=12ab").is_err());
        assert!(AlgorithmParams::parse("weights=1,2").is_err());
    }

    #[test]
    fn test_params_empty_column() {
        assert!(AlgorithmParams::parse("").unwrap().is_empty());
        assert!(AlgorithmParams::parse(" ; ").unwrap().is_empty());
    }

    #[test]
    fn test_record_serializes_without_empty_params() {
        let record = BankRecord::new("10000000", "Bundesbank", "Berlin", "09");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["bank_id"], "10000000");
        assert!(json.get("params").is_none());
    }
}

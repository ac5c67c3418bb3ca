// ✔️ Validation Engine
// bank code + account number → lookup → method → CheckResult

use crate::entities::{BankRecord, BankRegistry};
use crate::methods::{CheckInput, Method, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CHECK RESULT
// ============================================================================

/// Outcome of checking a (bank code, account number) pair.
///
/// The numeric codes are stable and used as process exit codes by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckResult {
    /// Account number and bank code match
    Ok = 0,

    /// The bank's check method is not implemented, or does not cover this
    /// account number. The pair may well be valid.
    Unknown = 1,

    /// The check digit does not match
    Error = 2,

    /// The bank code is not in the registry
    BankNotKnown = 3,
}

impl CheckResult {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckResult::Ok => "OK",
            CheckResult::Unknown => "UNKNOWN",
            CheckResult::Error => "ERROR",
            CheckResult::BankNotKnown => "BANK_NOT_KNOWN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CheckResult::Ok => "account number and bank code match",
            CheckResult::Unknown => "account number cannot be checked for this bank",
            CheckResult::Error => "account number and bank code probably do not match",
            CheckResult::BankNotKnown => "bank code is unknown",
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == CheckResult::Ok
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verdict> for CheckResult {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Valid => CheckResult::Ok,
            Verdict::Invalid => CheckResult::Error,
            Verdict::Inapplicable => CheckResult::Unknown,
        }
    }
}

// ============================================================================
// CHECK REPORT
// ============================================================================

/// A check result together with what it was derived from
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub result: CheckResult,
    pub bank_id: String,
    pub account: String,

    /// Implemented method that decided the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankRecord>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Check an account number against the bank's check method.
pub fn check(registry: &BankRegistry, bank_id: &str, account: &str) -> CheckResult {
    check_detailed(registry, bank_id, account).result
}

/// Like [`check`], also returning the bank record and the method used.
pub fn check_detailed(registry: &BankRegistry, bank_id: &str, account: &str) -> CheckReport {
    let mut report = CheckReport {
        result: CheckResult::BankNotKnown,
        bank_id: bank_id.trim().to_string(),
        account: account.trim().to_string(),
        method: None,
        bank: None,
    };

    // 1. Lookup
    let Some(record) = registry.get(bank_id) else {
        tracing::debug!(bank_id = %report.bank_id, "bank code not known");
        return report;
    };
    report.bank = Some(record.clone());

    // 2. Resolve
    let Some(method) = Method::resolve(&record.method) else {
        tracing::debug!(bank_id = %record.bank_id, method = %record.method, "check method not implemented");
        report.result = CheckResult::Unknown;
        return report;
    };
    report.method = Some(method.code().to_string());

    // 3. Verify
    let verdict = method.verify(&CheckInput {
        account,
        params: &record.params,
    });
    report.result = CheckResult::from(verdict);

    tracing::debug!(
        bank_id = %record.bank_id,
        method = method.code(),
        ?verdict,
        result = report.result.as_str(),
        "account number checked"
    );

    report
}

// ============================================================================
// TESTS
// ============================================================================

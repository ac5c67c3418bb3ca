// End-to-end checks against data files written to a temporary directory

use blzcheck::{AccountNumberCheck, CheckResult, LoadError, NotFoundError, TextEncoding};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = "\
# test data
10000000\tmethod00\tBundesbank\tBerlin
10010010\t24\tPostbank\tBerlin
37040044\t13\tCommerzbank\tKöln
50010517\t17\tING-DiBa\tFrankfurt am Main
70020270\t99\tUniCredit Bank - HypoVereinsbank\tMünchen\texempt=1234567890
12345\t00\tBroken Code\tNowhere
";

fn write_data(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn sample_checker() -> (TempDir, AccountNumberCheck) {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir, "bankdata.txt", SAMPLE.as_bytes());
    let checker = AccountNumberCheck::from_path(&path).unwrap();
    (dir, checker)
}

#[test]
fn test_bundesbank_example() {
    let (_dir, checker) = sample_checker();

    assert_eq!(checker.check("10000000", "1234567897"), CheckResult::Ok);
    assert_eq!(checker.check("10000000", "1234567890"), CheckResult::Error);
    assert_eq!(checker.check("99999999", "1234567890"), CheckResult::BankNotKnown);

    let bank = checker.find_bank("10000000").unwrap();
    assert_eq!(bank.name, "Bundesbank");
    assert_eq!(bank.location, "Berlin");

    assert_eq!(
        checker.find_bank("00000000"),
        Err(NotFoundError("00000000".to_string()))
    );
}

#[test]
fn test_record_count_excludes_skipped_lines() {
    let (_dir, checker) = sample_checker();
    assert_eq!(checker.bank_count(), 5);
    assert_eq!(checker.skipped_count(), 1);
}

#[test]
fn test_unimplemented_method_is_unknown_for_any_account() {
    let (_dir, checker) = sample_checker();
    for account in ["1", "1234567890", "9999999999", "", "not a number"] {
        assert_eq!(checker.check("10010010", account), CheckResult::Unknown);
    }
}

#[test]
fn test_unregistered_bank_for_any_account() {
    let (_dir, checker) = sample_checker();
    for bank_id in ["99999999", "00000000", "1000000", "abc", ""] {
        assert_eq!(checker.check(bank_id, "1234567897"), CheckResult::BankNotKnown);
    }
}

#[test]
fn test_find_bank_round_trip() {
    let (_dir, checker) = sample_checker();
    for record in checker.registry().iter() {
        assert_eq!(checker.find_bank(&record.bank_id).as_ref(), Ok(record));
    }
}

#[test]
fn test_methods_from_data_file() {
    let (_dir, checker) = sample_checker();

    assert_eq!(checker.check("37040044", "0123456600"), CheckResult::Ok);
    assert_eq!(checker.check("37040044", "0123456700"), CheckResult::Error);
    assert_eq!(checker.check("50010517", "0446786040"), CheckResult::Ok);

    // exception list on the record
    assert_eq!(checker.check("70020270", "1234567890"), CheckResult::Ok);
    // range without check digit under method 99
    assert_eq!(checker.check("70020270", "0450000000"), CheckResult::Unknown);
    assert_eq!(checker.check("70020270", "1234567893"), CheckResult::Error);
}

#[test]
fn test_latin1_data_is_returned_as_utf8() {
    let dir = TempDir::new().unwrap();
    let mut bytes = b"37040044\t13\tCommerzbank\tK".to_vec();
    bytes.push(0xF6);
    bytes.extend_from_slice(b"ln\n40050150\t00\tSparkasse M");
    bytes.push(0xFC);
    bytes.extend_from_slice(b"nsterland Ost\tM");
    bytes.push(0xFC);
    bytes.extend_from_slice(b"nster\n");
    let path = write_data(&dir, "bankdata.txt", &bytes);

    let checker = AccountNumberCheck::from_path_with_encoding(&path, TextEncoding::Latin1).unwrap();
    assert_eq!(checker.find_bank("37040044").unwrap().location, "Köln");

    let bank = checker.find_bank("40050150").unwrap();
    assert_eq!(bank.name, "Sparkasse Münsterland Ost");
    assert_eq!(bank.location, "Münster");
    assert_eq!(checker.text_encoding(), "UTF-8");
}

#[test]
fn test_latin1_bytes_read_as_utf8_never_fail() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir, "bankdata.txt", b"37040044\t13\tCommerzbank\tK\xF6ln\n");

    let checker = AccountNumberCheck::from_path(&path).unwrap();
    let bank = checker.find_bank("37040044").unwrap();
    assert_eq!(bank.location, "K\u{FFFD}ln");
}

#[test]
fn test_dated_dataset_in_directory() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, "bankdata.txt", b"10000000\t09\tOld Data\tBerlin\n");
    write_data(&dir, "bankdata_20000101.txt", b"10000000\t09\tDated Data\tBerlin\n");
    write_data(&dir, "bankdata_29991231.txt", b"10000000\t09\tFuture Data\tBerlin\n");

    let checker = AccountNumberCheck::from_path(dir.path()).unwrap();
    assert_eq!(checker.find_bank("10000000").unwrap().name, "Dated Data");

    let metadata = checker.metadata();
    assert_eq!(metadata.valid_from.map(|d| d.to_string()), Some("2000-01-01".to_string()));
    assert_eq!(metadata.data_directory, dir.path().display().to_string());
}

#[test]
fn test_load_failures() {
    let dir = TempDir::new().unwrap();

    let missing = AccountNumberCheck::from_path(dir.path().join("missing.txt"));
    assert!(matches!(missing, Err(LoadError::NotFound { .. })));

    let empty_dir = AccountNumberCheck::from_path(dir.path());
    assert!(matches!(empty_dir, Err(LoadError::NoDataFile { .. })));

    let junk = write_data(&dir, "junk.txt", b"this is not bank data\n");
    let junk = AccountNumberCheck::from_path(junk);
    assert!(matches!(junk, Err(LoadError::NoRecords { skipped: 1, .. })));
}

#[test]
fn test_instances_do_not_share_state() {
    let (_dir, custom) = sample_checker();
    let default = AccountNumberCheck::new_default();

    assert_eq!(custom.check("10000000", "1234567890"), CheckResult::Error);
    assert_eq!(default.check("10000000", "1234567890"), CheckResult::Unknown);
    assert_ne!(custom.fingerprint(), default.fingerprint());
}

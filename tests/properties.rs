// Property tests: checks are total and deterministic

use blzcheck::{AccountNumberCheck, BankRecord, BankRegistry, CheckResult, Method};
use proptest::prelude::*;

fn checker() -> AccountNumberCheck {
    let records = Method::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| BankRecord::new(&format!("{:08}", 10_000_000 + i), "Test Bank", "Berlin", m.code()))
        .chain(std::iter::once(BankRecord::new("99000000", "Unimplemented", "Berlin", "E4")))
        .collect();
    AccountNumberCheck::from_registry(BankRegistry::from_records(records))
}

proptest! {
    #[test]
    fn check_never_panics(bank_id in "\\PC{0,12}", account in "\\PC{0,14}") {
        let checker = checker();
        let _ = checker.check(&bank_id, &account);
    }

    #[test]
    fn every_method_is_deterministic(index in 0..Method::ALL.len(), account in "[0-9]{1,10}") {
        let checker = checker();
        let bank_id = format!("{:08}", 10_000_000 + index);
        let first = checker.check(&bank_id, &account);
        prop_assert_eq!(first, checker.check(&bank_id, &account));
        prop_assert_ne!(first, CheckResult::BankNotKnown);
    }

    #[test]
    fn non_digit_accounts_are_rejected(index in 0..Method::ALL.len(), account in "[0-9]{0,4}[a-zA-Z.-][0-9]{0,4}") {
        let checker = checker();
        let bank_id = format!("{:08}", 10_000_000 + index);
        prop_assert_eq!(checker.check(&bank_id, &account), CheckResult::Error);
    }

    #[test]
    fn unimplemented_method_is_always_unknown(account in "\\PC{0,14}") {
        let checker = checker();
        prop_assert_eq!(checker.check("99000000", &account), CheckResult::Unknown);
    }

    #[test]
    fn unregistered_bank_is_always_not_known(bank_id in "[0-9]{8}", account in "[0-9]{1,10}") {
        prop_assume!(!bank_id.starts_with("1000") && !bank_id.starts_with("99"));
        let checker = checker();
        prop_assert_eq!(checker.check(&bank_id, &account), CheckResult::BankNotKnown);
    }
}

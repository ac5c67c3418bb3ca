// 🔢 Check Method Catalog
// Closed set of German Bundesbank check-digit methods ("Prüfzifferverfahren")
//
// Every bank record names one method by its two-character code. Adding a
// method means adding a variant and its match arm; existing arms never change.

pub mod digits;

use crate::entities::AlgorithmParams;
use digits::{cross_sum, mod10, mod10_check_digit, mod11, weighted_sum, Fold, RemainderOne};
use serde::Serialize;

pub use digits::AccountNumber;

const W_2_TO_7: [u32; 6] = [2, 3, 4, 5, 6, 7];
const W_2_TO_10: [u32; 9] = [2, 3, 4, 5, 6, 7, 8, 9, 10];
const W_POWERS: [u32; 9] = [2, 4, 8, 5, 10, 9, 7, 3, 6];

/// Account number ranges method 95 does not check
const M95_EXEMPT_RANGES: [(u64, u64); 4] = [
    (1, 1_999_999),
    (9_000_000, 25_999_999),
    (396_000_000, 499_999_999),
    (700_000_000, 799_999_999),
];

/// Account numbers below this have no check digit under method 08
const M08_FIRST_CHECKED: u64 = 60_000;

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of running one check method on one account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Valid,
    Invalid,
    /// The method gives this account number no check digit
    Inapplicable,
}

impl Verdict {
    pub fn from_match(matches: bool) -> Self {
        if matches {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }

    /// Run a fallback variant only when this one failed.
    pub fn or_else<F: FnOnce() -> Verdict>(self, fallback: F) -> Verdict {
        match self {
            Verdict::Invalid => fallback(),
            other => other,
        }
    }
}

/// Arguments of a single check
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub account: &'a str,
    pub params: &'a AlgorithmParams,
}

// ============================================================================
// METHOD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    M00, M01, M02, M03, M04, M05, M06, M07, M08, M09,
    M10, M11, M13, M14, M15, M16, M17, M18, M19,
    M20, M21, M22, M25, M26, M28,
    M30, M31, M32, M33, M34, M38, M39,
    M40, M41, M42, M43, M44, M45, M46, M47, M48, M49,
    M50, M55, M56, M58, M59,
    M60, M61, M62, M63, M64, M65, M67,
    M72, M78, M79, M88, M94, M95, M99,
}

impl Method {
    /// Every implemented method, in code order
    pub const ALL: [Method; 61] = [
        Method::M00, Method::M01, Method::M02, Method::M03, Method::M04,
        Method::M05, Method::M06, Method::M07, Method::M08, Method::M09,
        Method::M10, Method::M11, Method::M13, Method::M14, Method::M15,
        Method::M16, Method::M17, Method::M18, Method::M19, Method::M20,
        Method::M21, Method::M22, Method::M25, Method::M26, Method::M28,
        Method::M30, Method::M31, Method::M32, Method::M33, Method::M34,
        Method::M38, Method::M39, Method::M40, Method::M41, Method::M42,
        Method::M43, Method::M44, Method::M45, Method::M46, Method::M47,
        Method::M48, Method::M49, Method::M50, Method::M55, Method::M56,
        Method::M58, Method::M59, Method::M60, Method::M61, Method::M62,
        Method::M63, Method::M64, Method::M65, Method::M67, Method::M72,
        Method::M78, Method::M79, Method::M88, Method::M94, Method::M95,
        Method::M99,
    ];

    pub fn all() -> &'static [Method] {
        &Self::ALL
    }

    /// Bundesbank method code, e.g. `"00"` or `"95"`
    pub fn code(&self) -> &'static str {
        match self {
            Method::M00 => "00",
            Method::M01 => "01",
            Method::M02 => "02",
            Method::M03 => "03",
            Method::M04 => "04",
            Method::M05 => "05",
            Method::M06 => "06",
            Method::M07 => "07",
            Method::M08 => "08",
            Method::M09 => "09",
            Method::M10 => "10",
            Method::M11 => "11",
            Method::M13 => "13",
            Method::M14 => "14",
            Method::M15 => "15",
            Method::M16 => "16",
            Method::M17 => "17",
            Method::M18 => "18",
            Method::M19 => "19",
            Method::M20 => "20",
            Method::M21 => "21",
            Method::M22 => "22",
            Method::M25 => "25",
            Method::M26 => "26",
            Method::M28 => "28",
            Method::M30 => "30",
            Method::M31 => "31",
            Method::M32 => "32",
            Method::M33 => "33",
            Method::M34 => "34",
            Method::M38 => "38",
            Method::M39 => "39",
            Method::M40 => "40",
            Method::M41 => "41",
            Method::M42 => "42",
            Method::M43 => "43",
            Method::M44 => "44",
            Method::M45 => "45",
            Method::M46 => "46",
            Method::M47 => "47",
            Method::M48 => "48",
            Method::M49 => "49",
            Method::M50 => "50",
            Method::M55 => "55",
            Method::M56 => "56",
            Method::M58 => "58",
            Method::M59 => "59",
            Method::M60 => "60",
            Method::M61 => "61",
            Method::M62 => "62",
            Method::M63 => "63",
            Method::M64 => "64",
            Method::M65 => "65",
            Method::M67 => "67",
            Method::M72 => "72",
            Method::M78 => "78",
            Method::M79 => "79",
            Method::M88 => "88",
            Method::M94 => "94",
            Method::M95 => "95",
            Method::M99 => "99",
        }
    }

    /// Look up a method by the id written in a bank record.
    ///
    /// Accepts the bare code (`"00"`) or a `method` prefix (`"method00"`),
    /// case-insensitive. Returns `None` for methods without an implementation.
    pub fn resolve(id: &str) -> Option<Method> {
        let id = id.trim();
        let code = match id.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("method") => &id[6..],
            _ => id,
        };

        Method::ALL
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(code))
    }

    /// Verify an account number.
    ///
    /// Malformed account numbers (empty, too long, non-digits, all zeros) are
    /// `Invalid`. Accounts on the record's exception list are `Valid` without
    /// running the formula.
    pub fn verify(&self, input: &CheckInput<'_>) -> Verdict {
        let Some(account) = AccountNumber::parse(input.account) else {
            return Verdict::Invalid;
        };

        if input.params.is_exempt(&account) {
            return Verdict::Valid;
        }

        self.verify_number(&account)
    }

    fn verify_number(&self, a: &AccountNumber) -> Verdict {
        use Fold::*;
        use RemainderOne::*;

        match self {
            Method::M00 => mod10(a, 1, 9, &[2, 1], CrossSum, 10),
            Method::M01 => mod10(a, 1, 9, &[3, 7, 1], Plain, 10),
            Method::M02 => mod11(a, 1, 9, &[2, 3, 4, 5, 6, 7, 8, 9, 2], 10, Invalid),
            Method::M03 => mod10(a, 1, 9, &[2, 1], Plain, 10),
            Method::M04 => mod11(a, 1, 9, &[2, 3, 4, 5, 6, 7, 2, 3, 4], 10, Invalid),
            Method::M05 => mod10(a, 1, 9, &[7, 3, 1], Plain, 10),
            Method::M06 => mod11(a, 1, 9, &W_2_TO_7, 10, Zero),
            Method::M07 => mod11(a, 1, 9, &W_2_TO_10, 10, Invalid),
            Method::M08 => {
                if a.value() < M08_FIRST_CHECKED {
                    Verdict::Inapplicable
                } else {
                    Method::M00.verify_number(a)
                }
            }
            Method::M09 => Verdict::Inapplicable,
            Method::M10 => mod11(a, 1, 9, &W_2_TO_10, 10, Zero),
            Method::M11 => mod11(a, 1, 9, &W_2_TO_10, 10, Nine),
            Method::M13 => mod10(a, 2, 7, &[2, 1], CrossSum, 8).or_else(|| {
                // retry as if the two-digit sub-account had been left off
                if a.leading_zeros() >= 2 {
                    mod10(&a.shifted_left(2), 2, 7, &[2, 1], CrossSum, 8)
                } else {
                    Verdict::Invalid
                }
            }),
            Method::M14 => mod11(a, 4, 9, &W_2_TO_7, 10, Invalid),
            Method::M15 => mod11(a, 6, 9, &[2, 3, 4, 5], 10, Zero),
            Method::M16 => mod11(a, 1, 9, &W_2_TO_7, 10, RepeatPrevious),
            Method::M17 => method_17(a),
            Method::M18 => mod10(a, 1, 9, &[3, 9, 7, 1], Plain, 10),
            Method::M19 => mod11(a, 1, 9, &[2, 3, 4, 5, 6, 7, 8, 9, 1], 10, Zero),
            Method::M20 => mod11(a, 1, 9, &[2, 3, 4, 5, 6, 7, 8, 9, 3], 10, Zero),
            Method::M21 => method_21(a),
            Method::M22 => mod10(a, 1, 9, &[3, 1], OnesDigit, 10),
            Method::M25 => method_25(a),
            Method::M26 => {
                let a = if a.leading_zeros() >= 2 { a.shifted_left(2) } else { *a };
                mod11(&a, 1, 7, &[2, 3, 4, 5, 6, 7, 2], 8, Zero)
            }
            Method::M28 => mod11(a, 1, 7, &[2, 3, 4, 5, 6, 7, 8], 8, Zero),
            Method::M30 => mod10(a, 1, 9, &[2, 1, 2, 1, 0, 0, 0, 0, 2], Plain, 10),
            Method::M31 => method_31(a),
            Method::M32 => mod11(a, 4, 9, &W_2_TO_7, 10, Zero),
            Method::M33 => mod11(a, 5, 9, &[2, 3, 4, 5, 6], 10, Zero),
            Method::M34 => mod11(a, 1, 7, &W_POWERS[..7], 8, Zero),
            Method::M38 => mod11(a, 4, 9, &W_POWERS[..6], 10, Zero),
            Method::M39 => mod11(a, 3, 9, &W_POWERS[..7], 10, Zero),
            Method::M40 => mod11(a, 1, 9, &W_POWERS, 10, Zero),
            Method::M41 => {
                // an indicator 9 in position 4 excludes positions 1-3
                let from = if a.digit(4) == 9 { 4 } else { 1 };
                mod10(a, from, 9, &[2, 1], CrossSum, 10)
            }
            Method::M42 => mod11(a, 2, 9, &[2, 3, 4, 5, 6, 7, 8, 9], 10, Zero),
            Method::M43 => mod10(a, 1, 9, &[1, 2, 3, 4, 5, 6, 7, 8, 9], Plain, 10),
            Method::M44 => mod11(a, 5, 9, &W_POWERS[..5], 10, Zero),
            Method::M45 => {
                if a.digit(1) == 0 || a.digit(5) == 1 {
                    Verdict::Inapplicable
                } else {
                    Method::M00.verify_number(a)
                }
            }
            Method::M46 => mod11(a, 3, 7, &[2, 3, 4, 5, 6], 8, Zero),
            Method::M47 => mod11(a, 4, 8, &[2, 3, 4, 5, 6], 9, Zero),
            Method::M48 => mod11(a, 3, 8, &W_2_TO_7, 9, Zero),
            Method::M49 => Method::M00
                .verify_number(a)
                .or_else(|| Method::M01.verify_number(a)),
            Method::M50 => mod11(a, 1, 6, &W_2_TO_7, 7, Zero).or_else(|| {
                if a.leading_zeros() >= 3 {
                    mod11(&a.shifted_left(3), 1, 6, &W_2_TO_7, 7, Zero)
                } else {
                    Verdict::Invalid
                }
            }),
            Method::M55 => mod11(a, 1, 9, &[2, 3, 4, 5, 6, 7, 8, 7, 8], 10, Zero),
            Method::M56 => method_56(a),
            Method::M58 => mod11(a, 5, 9, &[2, 3, 4, 5, 6], 10, Invalid),
            Method::M59 => {
                // fewer than nine digits: no check digit
                if a.leading_zeros() >= 2 {
                    Verdict::Inapplicable
                } else {
                    Method::M00.verify_number(a)
                }
            }
            Method::M60 => mod10(a, 3, 9, &[2, 1], CrossSum, 10),
            Method::M61 => method_61(a),
            Method::M62 => mod10(a, 3, 7, &[2, 1], CrossSum, 8),
            Method::M63 => method_63(a),
            Method::M64 => mod11(a, 1, 6, &W_POWERS[..6], 7, Zero),
            Method::M65 => method_65(a),
            Method::M67 => mod10(a, 1, 7, &[2, 1], CrossSum, 8),
            Method::M72 => mod10(a, 4, 9, &[2, 1], CrossSum, 10),
            Method::M78 => {
                // exactly eight digits: no check digit
                if a.leading_zeros() == 2 {
                    Verdict::Inapplicable
                } else {
                    Method::M00.verify_number(a)
                }
            }
            Method::M79 => match a.digit(1) {
                0 => Verdict::Invalid,
                3..=8 => mod10(a, 1, 9, &[2, 1], CrossSum, 10),
                _ => mod10(a, 1, 8, &[2, 1], CrossSum, 9),
            },
            Method::M88 => {
                if a.digit(3) == 9 {
                    mod11(a, 3, 9, &[2, 3, 4, 5, 6, 7, 8], 10, Zero)
                } else {
                    mod11(a, 4, 9, &W_2_TO_7, 10, Zero)
                }
            }
            Method::M94 => mod10(a, 1, 9, &[1, 2], CrossSum, 10),
            Method::M95 => {
                if M95_EXEMPT_RANGES.iter().any(|&(low, high)| a.in_range(low, high)) {
                    Verdict::Inapplicable
                } else {
                    Method::M06.verify_number(a)
                }
            }
            Method::M99 => {
                if a.in_range(396_000_000, 499_999_999) {
                    Verdict::Inapplicable
                } else {
                    Method::M06.verify_number(a)
                }
            }
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// IRREGULAR METHODS
// ============================================================================

/// Cross-sum of positions 2-7, minus one, modulus 11; check digit in position 8.
fn method_17(a: &AccountNumber) -> Verdict {
    let sum = weighted_sum(a, 2, 7, &[2, 1], Fold::CrossSum);
    // (sum - 1) mod 11 without underflow
    let remainder = (sum + 10) % 11;
    let expected = if remainder == 0 { 0 } else { 10 - remainder };
    Verdict::from_match(expected == a.digit(8))
}

/// Like method 00, but the total is reduced to a single digit by repeated cross-sums.
fn method_21(a: &AccountNumber) -> Verdict {
    let mut sum = weighted_sum(a, 1, 9, &[2, 1], Fold::CrossSum);
    while sum > 9 {
        sum = cross_sum(sum);
    }
    Verdict::from_match((10 - sum) % 10 == a.digit(10))
}

/// Modulus 11 over positions 2-9; remainder 1 requires a work indicator 8 or 9.
fn method_25(a: &AccountNumber) -> Verdict {
    let remainder = weighted_sum(a, 2, 9, &[2, 3, 4, 5, 6, 7, 8, 9], Fold::Plain) % 11;
    let check = a.digit(10);
    match remainder {
        0 => Verdict::from_match(check == 0),
        1 => Verdict::from_match(check == 0 && matches!(a.digit(2), 8 | 9)),
        r => Verdict::from_match(11 - r == check),
    }
}

/// The remainder itself is the check digit; remainder 10 is never valid.
fn method_31(a: &AccountNumber) -> Verdict {
    let remainder = weighted_sum(a, 1, 9, &[9, 8, 7, 6, 5, 4, 3, 2, 1], Fold::Plain) % 11;
    if remainder == 10 {
        return Verdict::Invalid;
    }
    Verdict::from_match(remainder == a.digit(10))
}

/// Modulus 11; the values 10 and 11 only occur for accounts starting with 9.
fn method_56(a: &AccountNumber) -> Verdict {
    let remainder = weighted_sum(a, 1, 9, &W_2_TO_7, Fold::Plain) % 11;
    let expected = match (11 - remainder, a.digit(1)) {
        (10, 9) => 7,
        (11, 9) => 8,
        (10 | 11, _) => return Verdict::Invalid,
        (value, _) => value,
    };
    Verdict::from_match(expected == a.digit(10))
}

/// Positions 1-7, check digit in position 8; a marker 8 in position 9 pulls
/// positions 9-10 into the sum.
fn method_61(a: &AccountNumber) -> Verdict {
    let mut sum = weighted_sum(a, 1, 7, &[2, 1], Fold::CrossSum);
    if a.digit(9) == 8 {
        sum += cross_sum(a.digit(9)) + cross_sum(a.digit(10) * 2);
    }
    Verdict::from_match(mod10_check_digit(sum) == a.digit(8))
}

/// Position 1 must be 0; six-digit accounts carry the check digit last.
fn method_63(a: &AccountNumber) -> Verdict {
    if a.digit(1) != 0 {
        return Verdict::Invalid;
    }
    if a.digit(2) == 0 && a.digit(3) == 0 {
        mod10(a, 4, 9, &[2, 1], Fold::CrossSum, 10)
    } else {
        mod10(a, 2, 7, &[2, 1], Fold::CrossSum, 8)
    }
}

/// As method 61, with marker 9 and weights 2,1 for positions 9-10.
fn method_65(a: &AccountNumber) -> Verdict {
    let mut sum = weighted_sum(a, 1, 7, &[2, 1], Fold::CrossSum);
    if a.digit(9) == 9 {
        sum += cross_sum(a.digit(9) * 2) + cross_sum(a.digit(10));
    }
    Verdict::from_match(mod10_check_digit(sum) == a.digit(8))
}

// ============================================================================
// TESTS
// ============================================================================

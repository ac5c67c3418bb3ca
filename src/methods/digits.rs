// Account number digits and weighted sums shared by all check methods.
//
// Positions are numbered 1..=10 from the left of the zero-padded account
// number. Weights are applied from the rightmost position of a range towards
// the left and repeat when the weight table is shorter than the range.

use super::Verdict;

pub const ACCOUNT_LEN: usize = 10;

/// A normalized 10-digit account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountNumber([u32; ACCOUNT_LEN]);

impl AccountNumber {
    /// Parse an account number as entered by a user.
    ///
    /// Accepts 1 to 10 ASCII digits, surrounding whitespace ignored, and pads
    /// with leading zeros. Returns `None` for anything else, including an
    /// all-zero number.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > ACCOUNT_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut digits = [0u32; ACCOUNT_LEN];
        let offset = ACCOUNT_LEN - raw.len();
        for (i, b) in raw.bytes().enumerate() {
            digits[offset + i] = u32::from(b - b'0');
        }

        if digits.iter().all(|&d| d == 0) {
            return None;
        }
        Some(AccountNumber(digits))
    }

    /// Digit at 1-based position `pos`.
    pub fn digit(&self, pos: usize) -> u32 {
        self.0[pos - 1]
    }

    pub fn value(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &d| acc * 10 + u64::from(d))
    }

    /// Drop `n` leading digits and append `n` zeros.
    ///
    /// Some methods expect an account number written with a two- or
    /// three-digit sub-account suffix; short numbers are retried shifted.
    pub fn shifted_left(&self, n: usize) -> Self {
        let mut digits = [0u32; ACCOUNT_LEN];
        digits[..ACCOUNT_LEN - n].copy_from_slice(&self.0[n..]);
        AccountNumber(digits)
    }

    pub fn leading_zeros(&self) -> usize {
        self.0.iter().take_while(|&&d| d == 0).count()
    }

    pub fn in_range(&self, low: u64, high: u64) -> bool {
        (low..=high).contains(&self.value())
    }
}

impl std::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// How each weighted digit contributes to the sum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// the product itself
    Plain,
    /// digit sum of the product (14 -> 5)
    CrossSum,
    /// last digit of the product (14 -> 4)
    OnesDigit,
}

/// What a modulus-11 check does when the remainder is 1 (check value 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainderOne {
    /// account number is invalid
    Invalid,
    /// check digit is 0
    Zero,
    /// check digit is 9
    Nine,
    /// check digit must equal the digit before it
    RepeatPrevious,
}

pub fn cross_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

pub fn weighted_sum(
    account: &AccountNumber,
    from: usize,
    to: usize,
    weights: &[u32],
    fold: Fold,
) -> u32 {
    (from..=to)
        .rev()
        .zip(weights.iter().cycle())
        .map(|(pos, &w)| {
            let product = account.digit(pos) * w;
            match fold {
                Fold::Plain => product,
                Fold::CrossSum => cross_sum(product),
                Fold::OnesDigit => product % 10,
            }
        })
        .sum()
}

/// Check digit for a modulus-10 sum: 10 minus the last digit, 10 becomes 0.
pub fn mod10_check_digit(sum: u32) -> u32 {
    (10 - sum % 10) % 10
}

/// Modulus 10 over positions `from..=to`, check digit at `check_pos`.
pub fn mod10(
    account: &AccountNumber,
    from: usize,
    to: usize,
    weights: &[u32],
    fold: Fold,
    check_pos: usize,
) -> Verdict {
    let sum = weighted_sum(account, from, to, weights, fold);
    Verdict::from_match(mod10_check_digit(sum) == account.digit(check_pos))
}

/// Modulus 11 over positions `from..=to`, check digit at `check_pos`.
///
/// The check digit is 11 minus the remainder; remainder 0 gives 0 and
/// remainder 1 is resolved by `on_one`.
pub fn mod11(
    account: &AccountNumber,
    from: usize,
    to: usize,
    weights: &[u32],
    check_pos: usize,
    on_one: RemainderOne,
) -> Verdict {
    let remainder = weighted_sum(account, from, to, weights, Fold::Plain) % 11;
    let expected = match remainder {
        0 => 0,
        1 => match on_one {
            RemainderOne::Invalid => return Verdict::Invalid,
            RemainderOne::Zero => 0,
            RemainderOne::Nine => 9,
            RemainderOne::RepeatPrevious => account.digit(check_pos - 1),
        },
        r => 11 - r,
    };
    Verdict::from_match(expected == account.digit(check_pos))
}

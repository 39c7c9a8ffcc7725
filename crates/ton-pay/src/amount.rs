//! TON amounts in nanotons.
//!
//! User input is parsed as a decimal string, never through floating point,
//! so `0.1` is exactly 100 000 000 nanotons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Nanotons per TON.
pub const NANOTONS_PER_TON: u128 = 1_000_000_000;

/// Fractional digits of one TON.
const TON_DECIMALS: usize = 9;

/// Smallest amount the payment form accepts (0.01 TON).
pub const DEFAULT_MIN_AMOUNT: Nanotons = Nanotons(10_000_000);

/// Network fee shown alongside the amount (0.005 TON).
pub const DEFAULT_FEE_ESTIMATE: Nanotons = Nanotons(5_000_000);

/// An amount in nanotons (10^-9 TON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nanotons(pub u128);

impl Nanotons {
    /// Parse a decimal TON amount such as `"1"`, `"0.25"` or `".5"`.
    ///
    /// Digits past the ninth decimal place are rounded half-up. Returns
    /// `None` for empty, signed, or malformed input.
    ///
    /// ```
    /// use ton_pay::Nanotons;
    ///
    /// assert_eq!(Nanotons::parse_ton("1.5"), Some(Nanotons(1_500_000_000)));
    /// assert_eq!(Nanotons::parse_ton("0.0000000015"), Some(Nanotons(2)));
    /// assert_eq!(Nanotons::parse_ton("-1"), None);
    /// ```
    pub fn parse_ton(input: &str) -> Option<Self> {
        let input = input.trim();
        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let (kept, rest) = frac.split_at(frac.len().min(TON_DECIMALS));
        let mut frac_value: u128 = 0;
        for b in kept.bytes() {
            frac_value = frac_value * 10 + u128::from(b - b'0');
        }
        for _ in kept.len()..TON_DECIMALS {
            frac_value *= 10;
        }
        let round_up = rest.bytes().next().is_some_and(|b| b >= b'5');

        whole_value
            .checked_mul(NANOTONS_PER_TON)?
            .checked_add(frac_value)?
            .checked_add(u128::from(round_up))
            .map(Nanotons)
    }

    /// Amount from whole TON.
    pub fn from_ton(ton: u64) -> Self {
        Nanotons(u128::from(ton) * NANOTONS_PER_TON)
    }

    /// Raw nanoton count.
    pub fn as_u128(self) -> u128 {
        self.0
    }

    /// Whether the amount is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Sum, or `None` on overflow.
    pub fn checked_add(self, other: Nanotons) -> Option<Nanotons> {
        self.0.checked_add(other.0).map(Nanotons)
    }

    /// Format as TON with nine decimals, e.g. `1.500000000`.
    pub fn format_ton(self) -> String {
        format!(
            "{}.{:09}",
            self.0 / NANOTONS_PER_TON,
            self.0 % NANOTONS_PER_TON
        )
    }
}

impl fmt::Display for Nanotons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TON", self.format_ton())
    }
}

/// Amount, fee and total shown before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSummary {
    pub amount: Nanotons,
    pub fee: Nanotons,
    pub total: Nanotons,
}

impl PaymentSummary {
    /// Build a summary; `None` on overflow.
    pub fn new(amount: Nanotons, fee: Nanotons) -> Option<Self> {
        Some(Self {
            amount,
            fee,
            total: amount.checked_add(fee)?,
        })
    }
}

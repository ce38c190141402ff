//! Basis-point shares.
//!
//! All proportional splits in the protocol (beneficiary shares, trading
//! profit splits) are expressed in basis points out of 10 000. Applying a
//! share to an amount truncates toward zero; callers that care about the
//! remainder handle it explicitly.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A share expressed in basis points (1/100th of a percent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShareBps(u16);

impl ShareBps {
    /// The whole: 10 000 basis points = 100%.
    pub const FULL: Self = Self(10_000);

    pub const ZERO: Self = Self(0);

    pub fn new(bps: u16) -> Self {
        Self(bps)
    }

    pub fn bps(&self) -> u16 {
        self.0
    }

    /// Whether this share lies in the valid open-to-full range 1..=10000.
    pub fn is_valid(&self) -> bool {
        self.0 >= 1 && self.0 <= Self::FULL.0
    }

    /// The complementary share, saturating at zero if this share exceeds
    /// the whole.
    pub fn complement(&self) -> Self {
        Self(Self::FULL.0.saturating_sub(self.0))
    }

    /// Apply this share to an amount, truncating toward zero.
    ///
    /// Widening to u256 is unnecessary: amounts are u128 and bps fit in u16,
    /// so the intermediate product cannot overflow u128 for any amount below
    /// `u128::MAX / 10_000`.
    pub fn of(&self, amount: Amount) -> Amount {
        Amount::new(amount.raw() / 10_000 * u128::from(self.0)
            + amount.raw() % 10_000 * u128::from(self.0) / 10_000)
    }

    /// Portion of `amount` this share represents out of `total` bps.
    ///
    /// Used by the claim algorithm where the denominator shrinks as
    /// beneficiaries claim. Truncates toward zero. Returns the full amount
    /// when `total` equals this share, and zero when `total` is zero.
    pub fn of_remaining(&self, amount: Amount, total: ShareBps) -> Amount {
        if total.0 == 0 {
            return Amount::ZERO;
        }
        let num = amount.raw().checked_mul(u128::from(self.0));
        match num {
            Some(n) => Amount::new(n / u128::from(total.0)),
            // Fall back to split division for amounts near u128::MAX.
            None => {
                let q = amount.raw() / u128::from(total.0);
                let r = amount.raw() % u128::from(total.0);
                Amount::new(q * u128::from(self.0) + r * u128::from(self.0) / u128::from(total.0))
            }
        }
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for ShareBps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

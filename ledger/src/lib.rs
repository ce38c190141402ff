//! External ledger boundary.
//!
//! Asset issuance, balances, and transfers live outside the core; the core
//! only calls this trait. Transfers are assumed atomic with the caller's own
//! state mutation — the hosting platform wraps both in one transaction
//! boundary. The rest of the workspace depends only on the trait; tests and
//! development use [`MemoryLedger`].

pub mod error;
pub mod memory;

pub use error::LedgerError;
pub use memory::MemoryLedger;

use heirloom_types::{Amount, AssetId, Identity};

/// The transfer primitive every asset movement in the core goes through.
pub trait Ledger {
    /// Move `amount` of `asset` from one account to another.
    ///
    /// Fails with [`LedgerError::InsufficientBalance`] when `from` does not
    /// hold `amount`; no partial movement ever occurs.
    fn transfer(
        &self,
        asset: &AssetId,
        from: &Identity,
        to: &Identity,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Current balance of `who` in `asset`. Unknown accounts hold zero.
    fn balance(&self, asset: &AssetId, who: &Identity) -> Amount;
}

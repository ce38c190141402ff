//! In-memory ledger for tests and development.

use crate::{Ledger, LedgerError};
use heirloom_types::{Amount, AssetId, Identity};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// A process-local ledger keyed by (asset, account).
///
/// Balances live behind one mutex; the core's per-estate serialization means
/// contention here is negligible.
pub struct MemoryLedger {
    balances: Mutex<HashMap<(AssetId, Identity), Amount>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
        }
    }

    /// Credit an account out of thin air. Test/bootstrap helper — a real
    /// ledger's issuance path replaces this.
    pub fn mint(&self, asset: &AssetId, to: &Identity, amount: Amount) {
        let mut balances = self.balances.lock().expect("ledger mutex poisoned");
        let entry = balances
            .entry((asset.clone(), to.clone()))
            .or_insert(Amount::ZERO);
        *entry = entry
            .checked_add(amount)
            .expect("mint overflowed account balance");
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    fn transfer(
        &self,
        asset: &AssetId,
        from: &Identity,
        to: &Identity,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }

        let mut balances = self.balances.lock().expect("ledger mutex poisoned");
        let available = balances
            .get(&(asset.clone(), from.clone()))
            .copied()
            .unwrap_or(Amount::ZERO);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientBalance {
                    asset: asset.to_string(),
                    needed: amount.raw(),
                    available: available.raw(),
                })?;

        balances.insert((asset.clone(), from.clone()), remaining);
        let dest = balances
            .entry((asset.clone(), to.clone()))
            .or_insert(Amount::ZERO);
        *dest = dest
            .checked_add(amount)
            .expect("transfer overflowed destination balance");

        debug!(%asset, %from, %to, %amount, "ledger transfer");
        Ok(())
    }

    fn balance(&self, asset: &AssetId, who: &Identity) -> Amount {
        self.balances
            .lock()
            .expect("ledger mutex poisoned")
            .get(&(asset.clone(), who.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

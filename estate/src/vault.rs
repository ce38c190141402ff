//! Per-estate asset vaults.
//!
//! A vault is a denormalized balance mirror of the estate's custody account
//! on the external ledger, kept per asset type. Vaults are created lazily on
//! first deposit and never destroyed — zero-balance vaults persist so claim
//! history stays inspectable.

use heirloom_types::{Amount, AssetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All vaults of one estate, keyed by asset.
///
/// BTreeMap keeps claim iteration order deterministic.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VaultSet {
    balances: BTreeMap<AssetId, Amount>,
}

impl VaultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset`, creating the vault on first use.
    pub fn credit(&mut self, asset: &AssetId, amount: Amount) {
        let entry = self
            .balances
            .entry(asset.clone())
            .or_insert(Amount::ZERO);
        *entry = entry
            .checked_add(amount)
            .expect("vault balance overflowed u128");
    }

    /// Debit `amount` of `asset`. Panics on underflow — callers always debit
    /// at most the balance they just read under the estate's exclusive lock.
    pub fn debit(&mut self, asset: &AssetId, amount: Amount) {
        let entry = self
            .balances
            .get_mut(asset)
            .expect("debit from nonexistent vault");
        *entry = entry
            .checked_sub(amount)
            .expect("vault debit exceeds balance");
    }

    pub fn balance(&self, asset: &AssetId) -> Amount {
        self.balances.get(asset).copied().unwrap_or(Amount::ZERO)
    }

    /// Sum of all vault balances (the estate value cache source).
    pub fn total(&self) -> Amount {
        self.balances.values().copied().sum()
    }

    /// Iterate (asset, balance) pairs in asset order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, Amount)> {
        self.balances.iter().map(|(k, v)| (k, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.balances.values().all(|b| b.is_zero())
    }

    pub fn vault_count(&self) -> usize {
        self.balances.len()
    }
}

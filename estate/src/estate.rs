//! The estate orchestrator.
//!
//! One `Estate` owns its beneficiary set, its vaults, at most one trading
//! delegation, its emergency lock, and the lifecycle state machine. Every
//! method here is the *single* internal mutation path for its operation:
//! the owner facade and the governance execution path both land on these
//! functions, differing only in the [`Authority`] they present.
//!
//! All time-gated checks take `now` explicitly; nothing in this module reads
//! the wall clock.

use crate::beneficiary::{self, Beneficiary};
use crate::emergency::{EmergencyLock, LockType};
use crate::error::EstateError;
use crate::rwa::RwaRegistry;
use crate::trading::{TradingConfig, TradingDelegate};
use crate::vault::VaultSet;
use heirloom_ledger::Ledger;
use heirloom_types::{
    Amount, AssetId, ContactHash, EstateId, Identity, LifecycleState, MultisigId, ProtocolParams,
    ShareBps, Timestamp,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Who is asking for a privileged mutation.
///
/// Governance authority is only ever constructed by the proposal execution
/// path after threshold approval; estates trust it unconditionally.
#[derive(Clone, Debug)]
pub enum Authority {
    Owner(Identity),
    Governance,
}

/// What one claim paid out, per asset.
#[derive(Clone, Debug)]
pub struct ClaimReceipt {
    pub beneficiary: Identity,
    pub share: ShareBps,
    pub transfers: Vec<(AssetId, Amount)>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Estate {
    pub id: EstateId,
    pub owner: Identity,
    /// Ledger account holding the pooled assets.
    pub custody: Identity,
    pub contact_hash: ContactHash,

    pub inactivity_period_secs: u64,
    pub grace_period_secs: u64,
    pub created_at: Timestamp,
    /// Updated only by owner actions while not locked and not claimable.
    pub last_active_at: Timestamp,
    pub is_claimable: bool,

    /// Denormalized sum of vault balances.
    pub estate_value: Amount,
    pub total_claims: u32,

    pub beneficiaries: Vec<Beneficiary>,
    pub vaults: VaultSet,
    pub trading: Option<TradingDelegate>,
    pub emergency: EmergencyLock,
    pub multisig: Option<MultisigId>,
    pub rwas: RwaRegistry,
}

impl Estate {
    /// Validate periods and initialize a fresh estate. The caller (registry)
    /// has already collected the creation fee.
    pub fn create(
        id: EstateId,
        owner: Identity,
        contact_hash: ContactHash,
        inactivity_period_secs: u64,
        grace_period_secs: u64,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<Self, EstateError> {
        if inactivity_period_secs < params.min_inactivity_secs
            || inactivity_period_secs > params.max_inactivity_secs
        {
            return Err(EstateError::InvalidPeriod {
                name: "inactivity",
                given: inactivity_period_secs,
                min: params.min_inactivity_secs,
                max: params.max_inactivity_secs,
            });
        }
        if grace_period_secs < params.min_grace_secs || grace_period_secs > params.max_grace_secs {
            return Err(EstateError::InvalidPeriod {
                name: "grace",
                given: grace_period_secs,
                min: params.min_grace_secs,
                max: params.max_grace_secs,
            });
        }

        Ok(Self {
            custody: Identity::custody_for(id),
            id,
            owner,
            contact_hash,
            inactivity_period_secs,
            grace_period_secs,
            created_at: now,
            last_active_at: now,
            is_claimable: false,
            estate_value: Amount::ZERO,
            total_claims: 0,
            beneficiaries: Vec::new(),
            vaults: VaultSet::new(),
            trading: None,
            emergency: EmergencyLock::new(),
            multisig: None,
            rwas: RwaRegistry::new(),
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Where the estate stands at `now`. The emergency lock is not part of
    /// the lifecycle — a locked estate still ages toward claimability.
    pub fn lifecycle_state(&self, now: Timestamp) -> LifecycleState {
        if self.is_distributed() {
            LifecycleState::Distributed
        } else if self.is_claimable {
            LifecycleState::Claimable
        } else if self.last_active_at.has_elapsed(self.inactivity_period_secs, now) {
            LifecycleState::GracePeriod
        } else {
            LifecycleState::Active
        }
    }

    /// All beneficiary shares claimed.
    pub fn is_distributed(&self) -> bool {
        !self.beneficiaries.is_empty() && self.total_claims as usize == self.beneficiaries.len()
    }

    /// Owner proof-of-life. Resets the inactivity clock.
    pub fn check_in(&mut self, caller: &Identity, now: Timestamp) -> Result<(), EstateError> {
        // Both the emergency overlay and claimability close the check-in
        // window; callers see the same lock error for either.
        if self.emergency.locked || self.is_claimable {
            return Err(EstateError::EstateLocked);
        }
        self.ensure_owner(caller)?;
        self.last_active_at = now;
        info!(estate = %self.id, "owner checked in");
        Ok(())
    }

    /// Arm inheritance once inactivity + grace have fully elapsed.
    ///
    /// Callable by anyone; idempotent — returns `Ok(false)` without touching
    /// state when the estate is already claimable.
    pub fn trigger_inheritance(&mut self, now: Timestamp) -> Result<bool, EstateError> {
        self.ensure_unlocked()?;
        if self.is_claimable {
            return Ok(false);
        }
        let wait = self
            .inactivity_period_secs
            .saturating_add(self.grace_period_secs);
        if !self.last_active_at.has_elapsed(wait, now) {
            return Err(EstateError::NotYetClaimable {
                remaining_secs: self.last_active_at.remaining(wait, now),
            });
        }
        self.is_claimable = true;
        info!(estate = %self.id, "inheritance triggered; estate is claimable");
        Ok(true)
    }

    /// Pay out the calling beneficiary's share from every vault.
    ///
    /// Each payout is `balance * share / remaining_unclaimed_share`,
    /// truncating toward zero: dust a claim leaves behind stays in the vault
    /// and is absorbed proportionally by later claims, and the final
    /// claimant drains each vault completely.
    pub fn claim<L: Ledger>(
        &mut self,
        ledger: &L,
        caller: &Identity,
        _now: Timestamp,
    ) -> Result<ClaimReceipt, EstateError> {
        self.ensure_unlocked()?;
        if !self.is_claimable {
            return Err(EstateError::NotClaimable);
        }
        let idx = self
            .beneficiaries
            .iter()
            .position(|b| &b.identity == caller)
            .ok_or_else(|| EstateError::UnknownBeneficiary {
                caller: caller.to_string(),
            })?;
        if self.beneficiaries[idx].claimed {
            return Err(EstateError::AlreadyClaimed {
                beneficiary: caller.to_string(),
            });
        }

        let share = self.beneficiaries[idx].share;
        let claimed_so_far: u16 = self
            .beneficiaries
            .iter()
            .filter(|b| b.claimed)
            .map(|b| b.share.bps())
            .sum();
        let remaining = ShareBps::FULL.saturating_sub(ShareBps::new(claimed_so_far));

        let payouts: Vec<(AssetId, Amount)> = self
            .vaults
            .iter()
            .map(|(asset, balance)| (asset.clone(), share.of_remaining(balance, remaining)))
            .filter(|(_, amount)| !amount.is_zero())
            .collect();

        // The hosting platform wraps the transfers and this state mutation
        // in one transaction boundary; within the core, transfers run only
        // after all validation has passed.
        for (asset, amount) in &payouts {
            ledger.transfer(asset, &self.custody, caller, *amount)?;
            self.vaults.debit(asset, *amount);
        }

        self.beneficiaries[idx].claimed = true;
        self.total_claims += 1;
        self.estate_value = self.vaults.total();
        info!(
            estate = %self.id, beneficiary = %caller, share = %share,
            "inheritance share claimed"
        );

        Ok(ClaimReceipt {
            beneficiary: caller.clone(),
            share,
            transfers: payouts,
        })
    }

    // ── Beneficiaries ────────────────────────────────────────────────────

    /// Replace the beneficiary set atomically.
    pub fn update_beneficiaries(
        &mut self,
        authority: &Authority,
        list: Vec<Beneficiary>,
        params: &ProtocolParams,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_authority(authority)?;
        beneficiary::validate_set(&list, params)?;
        self.beneficiaries = list;
        info!(estate = %self.id, count = self.beneficiaries.len(), "beneficiaries updated");
        Ok(())
    }

    // ── Vault funding ────────────────────────────────────────────────────

    /// Move `amount` of `asset` from the depositor into custody. Anyone may
    /// fund an estate; the vault for a new asset type appears on first use.
    pub fn deposit<L: Ledger>(
        &mut self,
        ledger: &L,
        depositor: &Identity,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        ledger.transfer(asset, depositor, &self.custody, amount)?;
        self.vaults.credit(asset, amount);
        self.estate_value = self.vaults.total();
        Ok(())
    }

    /// Authorized withdrawal from a vault (owner, or governance via an
    /// executed `Withdraw` proposal).
    pub fn withdraw<L: Ledger>(
        &mut self,
        ledger: &L,
        authority: &Authority,
        asset: &AssetId,
        to: &Identity,
        amount: Amount,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_authority(authority)?;
        let available = self.vaults.balance(asset);
        if available < amount {
            return Err(EstateError::InsufficientVaultBalance {
                asset: asset.to_string(),
                needed: amount.raw(),
                available: available.raw(),
            });
        }
        ledger.transfer(asset, &self.custody, to, amount)?;
        self.vaults.debit(asset, amount);
        self.estate_value = self.vaults.total();
        info!(estate = %self.id, %asset, %to, %amount, "vault withdrawal");
        Ok(())
    }

    // ── Trading delegation ───────────────────────────────────────────────

    pub fn enable_trading(
        &mut self,
        authority: &Authority,
        cfg: TradingConfig,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_authority(authority)?;
        if self.trading.is_some() {
            return Err(EstateError::TradingAlreadyEnabled);
        }
        let trading = TradingDelegate::open(cfg, params, now)?;
        info!(
            estate = %self.id, delegate = %trading.delegate,
            human_share = %trading.human_share, "trading enabled"
        );
        self.trading = Some(trading);
        Ok(())
    }

    pub fn pause_trading(&mut self, caller: &Identity, now: Timestamp) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_owner(caller)?;
        self.trading_mut()?.pause(now)?;
        info!(estate = %self.id, "trading paused");
        Ok(())
    }

    pub fn resume_trading(&mut self, caller: &Identity, now: Timestamp) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_owner(caller)?;
        self.trading_mut()?.resume(now)?;
        info!(estate = %self.id, "trading resumed");
        Ok(())
    }

    /// Fund the trading pool. Owner and delegate contributions are tracked
    /// separately for later profit attribution; an owner contribution also
    /// counts as proof of life.
    pub fn contribute_to_trading<L: Ledger>(
        &mut self,
        ledger: &L,
        contributor: &Identity,
        asset: &AssetId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        let trading = self.trading.as_ref().ok_or(EstateError::TradingNotEnabled)?;
        if !trading.enabled {
            return Err(EstateError::TradingNotEnabled);
        }
        let from_owner = contributor == &self.owner;
        if !from_owner && contributor != &trading.delegate {
            return Err(EstateError::UnauthorizedContributor {
                caller: contributor.to_string(),
            });
        }

        ledger.transfer(asset, contributor, &self.custody, amount)?;
        self.vaults.credit(asset, amount);
        self.estate_value = self.vaults.total();
        self.trading
            .as_mut()
            .expect("trading presence checked above")
            .record_contribution(from_owner, amount, now);
        if from_owner {
            self.last_active_at = now;
        }
        Ok(())
    }

    /// Delegate's mark-to-market report.
    pub fn update_trading_value(
        &mut self,
        caller: &Identity,
        new_value: Amount,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        let trading = self.trading_mut()?;
        if !trading.enabled {
            return Err(EstateError::TradingNotEnabled);
        }
        if caller != &trading.delegate {
            return Err(EstateError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        trading.mark_value(new_value, now);
        Ok(())
    }

    /// Pay out profit above the high-water mark: owner share truncating,
    /// delegate the remainder. Returns (owner leg, delegate leg).
    pub fn distribute_profits<L: Ledger>(
        &mut self,
        ledger: &L,
        caller: &Identity,
        asset: &AssetId,
        now: Timestamp,
    ) -> Result<(Amount, Amount), EstateError> {
        self.ensure_unlocked()?;
        let owner = self.owner.clone();
        let trading = self.trading.as_ref().ok_or(EstateError::TradingNotEnabled)?;
        if !trading.enabled {
            return Err(EstateError::TradingNotEnabled);
        }
        if caller != &owner && caller != &trading.delegate {
            return Err(EstateError::Unauthorized {
                caller: caller.to_string(),
            });
        }

        let profit = trading.distributable_profit();
        if profit.is_zero() {
            return Err(EstateError::NoProfit);
        }
        let available = self.vaults.balance(asset);
        if available < profit {
            return Err(EstateError::InsufficientVaultBalance {
                asset: asset.to_string(),
                needed: profit.raw(),
                available: available.raw(),
            });
        }

        let delegate = trading.delegate.clone();
        let (human_leg, ai_leg) = trading.split_profit(profit);
        if !human_leg.is_zero() {
            ledger.transfer(asset, &self.custody, &owner, human_leg)?;
        }
        if !ai_leg.is_zero() {
            ledger.transfer(asset, &self.custody, &delegate, ai_leg)?;
        }
        self.vaults.debit(asset, profit);
        self.estate_value = self.vaults.total();
        self.trading
            .as_mut()
            .expect("trading presence checked above")
            .settle_distribution(profit, now);
        info!(
            estate = %self.id, %human_leg, %ai_leg, "trading profits distributed"
        );
        Ok((human_leg, ai_leg))
    }

    /// First phase of the owner's escape hatch: start the withdrawal clock.
    pub fn request_emergency_withdrawal(
        &mut self,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<Timestamp, EstateError> {
        self.ensure_owner(caller)?;
        let trading = self.trading_mut()?;
        if !trading.enabled {
            return Err(EstateError::TradingNotEnabled);
        }
        if trading.withdrawal_requested_at.is_some() {
            return Err(EstateError::WithdrawalAlreadyRequested);
        }
        trading.withdrawal_requested_at = Some(now);
        let ready_at = now.plus(u64::from(trading.emergency_delay_hours) * 3600);
        Ok(ready_at)
    }

    /// Second phase: after the configured delay, pull the owner's
    /// contribution-proportional slice out and tear the delegation down.
    /// Uncredited delegate-side profit is forfeited by design of the
    /// escape hatch.
    pub fn execute_emergency_withdrawal<L: Ledger>(
        &mut self,
        ledger: &L,
        caller: &Identity,
        asset: &AssetId,
        now: Timestamp,
    ) -> Result<Amount, EstateError> {
        self.ensure_owner(caller)?;
        let trading = self.trading.as_ref().ok_or(EstateError::TradingNotEnabled)?;
        let requested_at = trading
            .withdrawal_requested_at
            .ok_or(EstateError::WithdrawalNotRequested)?;
        let delay_secs = u64::from(trading.emergency_delay_hours) * 3600;
        if !requested_at.has_elapsed(delay_secs, now) {
            return Err(EstateError::WithdrawalDelayActive {
                ready_at: requested_at.plus(delay_secs).as_secs(),
            });
        }

        // Cap at the vault balance: marks can report value the vault does
        // not physically hold yet.
        let proportion = trading.owner_proportion();
        let amount = proportion.min(self.vaults.balance(asset));
        if !amount.is_zero() {
            ledger.transfer(asset, &self.custody, &self.owner, amount)?;
            self.vaults.debit(asset, amount);
            self.estate_value = self.vaults.total();
        }
        self.trading = None;
        info!(estate = %self.id, %amount, "trading emergency withdrawal executed");
        Ok(amount)
    }

    // ── Emergency lock ───────────────────────────────────────────────────

    pub fn emergency_lock(
        &mut self,
        authority: &Authority,
        lock_type: LockType,
        reason: String,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        self.ensure_authority(authority)?;
        let by = match authority {
            Authority::Owner(id) => id.clone(),
            Authority::Governance => Identity::new("governance"),
        };
        self.emergency.engage(by, lock_type, reason, params, now)?;
        // A frozen estate must not keep trading.
        if let Some(trading) = self.trading.as_mut() {
            if trading.enabled {
                trading.pause(now).expect("pausing enabled trading cannot fail");
            }
        }
        info!(estate = %self.id, ?lock_type, "emergency lock engaged");
        Ok(())
    }

    pub fn emergency_unlock(
        &mut self,
        caller: &Identity,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        self.ensure_owner(caller)?;
        // Governance-initiated locks are only lifted by governance.
        if self.emergency.lock_type == Some(LockType::GovernanceInitiated) {
            return Err(EstateError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        self.emergency.disengage(params, now)?;
        info!(estate = %self.id, "emergency lock disengaged by owner");
        Ok(())
    }

    /// Governance forced unlock — no owner check, no duration gate. The
    /// guardian co-approval requirement is enforced by the proposal
    /// execution path before this is called.
    pub fn force_unlock(&mut self) -> Result<(), EstateError> {
        self.emergency.force_disengage()?;
        info!(estate = %self.id, "emergency lock force-disengaged by governance");
        Ok(())
    }

    pub fn add_guardian(
        &mut self,
        caller: &Identity,
        guardian: Identity,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_owner(caller)?;
        self.emergency.add_guardian(guardian)
    }

    pub fn remove_guardian(
        &mut self,
        caller: &Identity,
        guardian: &Identity,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_owner(caller)?;
        self.emergency.remove_guardian(guardian)
    }

    // ── RWAs ─────────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn add_rwa(
        &mut self,
        authority: &Authority,
        kind: String,
        name: String,
        description: String,
        appraised_value: String,
        metadata_uri: String,
        now: Timestamp,
    ) -> Result<u32, EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_authority(authority)?;
        Ok(self.rwas.add(
            self.owner.clone(),
            kind,
            name,
            description,
            appraised_value,
            metadata_uri,
            now,
        ))
    }

    pub fn remove_rwa(&mut self, caller: &Identity, number: u32) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_owner(caller)?;
        self.rwas.remove(number)
    }

    /// A beneficiary who has claimed their vault share may take over an
    /// active RWA record.
    pub fn claim_rwa(&mut self, caller: &Identity, number: u32) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        if !self.is_claimable {
            return Err(EstateError::NotClaimable);
        }
        let beneficiary = self
            .beneficiaries
            .iter()
            .find(|b| &b.identity == caller)
            .ok_or_else(|| EstateError::UnknownBeneficiary {
                caller: caller.to_string(),
            })?;
        if !beneficiary.claimed {
            return Err(EstateError::MustClaimFirst);
        }
        self.rwas.transfer(number, caller.clone())
    }

    // ── Governance attachment ────────────────────────────────────────────

    pub fn attach_multisig(
        &mut self,
        caller: &Identity,
        multisig: MultisigId,
    ) -> Result<(), EstateError> {
        self.ensure_unlocked()?;
        self.ensure_configurable()?;
        self.ensure_owner(caller)?;
        if self.multisig.is_some() {
            return Err(EstateError::MultisigAlreadyAttached);
        }
        self.multisig = Some(multisig);
        Ok(())
    }

    // ── Guards ───────────────────────────────────────────────────────────

    fn ensure_owner(&self, caller: &Identity) -> Result<(), EstateError> {
        if caller != &self.owner {
            return Err(EstateError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_authority(&self, authority: &Authority) -> Result<(), EstateError> {
        match authority {
            Authority::Owner(caller) => self.ensure_owner(caller),
            Authority::Governance => Ok(()),
        }
    }

    fn ensure_unlocked(&self) -> Result<(), EstateError> {
        if self.emergency.locked {
            return Err(EstateError::EstateLocked);
        }
        Ok(())
    }

    fn ensure_configurable(&self) -> Result<(), EstateError> {
        if self.is_claimable {
            return Err(EstateError::EstateClaimable);
        }
        Ok(())
    }

    fn trading_mut(&mut self) -> Result<&mut TradingDelegate, EstateError> {
        self.trading.as_mut().ok_or(EstateError::TradingNotEnabled)
    }
}

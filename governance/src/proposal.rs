//! Governance proposals and their approval lifecycle.

use heirloom_estate::{Beneficiary, TradingStrategy};
use heirloom_types::{
    Amount, AssetId, EstateId, Identity, MultisigId, ProposalId, ShareBps, Timestamp,
};
use serde::{Deserialize, Serialize};

/// The privileged action a proposal asks the committee to authorize.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ProposalAction {
    /// Freeze the target estate.
    EmergencyLock { reason: String },
    /// Unfreeze the target estate against (or without) the owner's will.
    /// Requires a guardian among the approvers at execution time.
    ForceUnlock,
    /// Move funds out of the target estate's vault.
    Withdraw {
        asset: AssetId,
        to: Identity,
        amount: Amount,
    },
    /// Replace the committee's own signer set.
    UpdateSigners {
        signers: Vec<Identity>,
        threshold: usize,
    },
    /// Change the protocol's estate creation fee.
    ChangeFee { new_fee: Amount },
    /// Replace the target estate's beneficiary set.
    UpdateBeneficiaries { beneficiaries: Vec<Beneficiary> },
    /// Enable trading delegation on the target estate.
    EnableTrading {
        delegate: Identity,
        human_share: ShareBps,
        strategy: TradingStrategy,
        stop_loss: Option<ShareBps>,
        emergency_delay_hours: u32,
    },
}

impl ProposalAction {
    /// Short action name for logs and events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmergencyLock { .. } => "emergency_lock",
            Self::ForceUnlock => "force_unlock",
            Self::Withdraw { .. } => "withdraw",
            Self::UpdateSigners { .. } => "update_signers",
            Self::ChangeFee { .. } => "change_fee",
            Self::UpdateBeneficiaries { .. } => "update_beneficiaries",
            Self::EnableTrading { .. } => "enable_trading",
        }
    }
}

/// One pending or executed committee decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub multisig: MultisigId,
    pub proposer: Identity,
    pub target_estate: EstateId,
    pub action: ProposalAction,
    /// Distinct approving signers; the proposer approves implicitly at
    /// creation.
    pub approvals: Vec<Identity>,
    pub created_at: Timestamp,
    pub executed: bool,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        multisig: MultisigId,
        proposer: Identity,
        target_estate: EstateId,
        action: ProposalAction,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            multisig,
            approvals: vec![proposer.clone()],
            proposer,
            target_estate,
            action,
            created_at,
            executed: false,
        }
    }

    /// Whether the proposal has passed its expiry window at `now`:
    /// strictly after `created_at + expiry_secs`. Expiry is evaluated
    /// lazily — only here, never by a timer.
    pub fn is_expired(&self, expiry_secs: u64, now: Timestamp) -> bool {
        now > self.created_at.plus(expiry_secs)
    }

    pub fn has_approved(&self, signer: &Identity) -> bool {
        self.approvals.contains(signer)
    }
}

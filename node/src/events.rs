//! Events emitted by the registry for subscribers.
//!
//! Every state-changing operation emits exactly one event carrying the
//! entity id, the acting identity, and the timestamp the operation was
//! applied at. The core keeps no log itself — indexers and audit trails
//! hang off this bus.

use heirloom_types::{Amount, AssetId, EstateId, Identity, MultisigId, ProposalId, Timestamp};

/// Registry-level events observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug)]
pub enum EstateEvent {
    EstateCreated {
        estate: EstateId,
        owner: Identity,
        at: Timestamp,
    },
    CheckedIn {
        estate: EstateId,
        owner: Identity,
        at: Timestamp,
    },
    Deposited {
        estate: EstateId,
        depositor: Identity,
        asset: AssetId,
        amount: Amount,
        at: Timestamp,
    },
    BeneficiariesUpdated {
        estate: EstateId,
        actor: Identity,
        count: usize,
        at: Timestamp,
    },
    InheritanceTriggered {
        estate: EstateId,
        triggered_by: Identity,
        at: Timestamp,
    },
    Claimed {
        estate: EstateId,
        beneficiary: Identity,
        transfers: Vec<(AssetId, Amount)>,
        at: Timestamp,
    },
    TradingEnabled {
        estate: EstateId,
        actor: Identity,
        delegate: Identity,
        at: Timestamp,
    },
    TradingPaused {
        estate: EstateId,
        owner: Identity,
        at: Timestamp,
    },
    TradingResumed {
        estate: EstateId,
        owner: Identity,
        at: Timestamp,
    },
    TradingContribution {
        estate: EstateId,
        contributor: Identity,
        asset: AssetId,
        amount: Amount,
        at: Timestamp,
    },
    TradingValueUpdated {
        estate: EstateId,
        delegate: Identity,
        new_value: Amount,
        at: Timestamp,
    },
    ProfitsDistributed {
        estate: EstateId,
        owner_leg: Amount,
        delegate_leg: Amount,
        at: Timestamp,
    },
    EmergencyWithdrawalRequested {
        estate: EstateId,
        owner: Identity,
        ready_at: Timestamp,
        at: Timestamp,
    },
    EmergencyWithdrawalExecuted {
        estate: EstateId,
        owner: Identity,
        amount: Amount,
        at: Timestamp,
    },
    EmergencyLocked {
        estate: EstateId,
        actor: Identity,
        reason: String,
        at: Timestamp,
    },
    EmergencyUnlocked {
        estate: EstateId,
        actor: Identity,
        forced: bool,
        at: Timestamp,
    },
    GuardianAdded {
        estate: EstateId,
        guardian: Identity,
        at: Timestamp,
    },
    GuardianRemoved {
        estate: EstateId,
        guardian: Identity,
        at: Timestamp,
    },
    RwaAdded {
        estate: EstateId,
        number: u32,
        at: Timestamp,
    },
    RwaRemoved {
        estate: EstateId,
        number: u32,
        at: Timestamp,
    },
    RwaClaimed {
        estate: EstateId,
        number: u32,
        beneficiary: Identity,
        at: Timestamp,
    },
    MultisigInitialized {
        multisig: MultisigId,
        admin: Identity,
        signers: usize,
        threshold: usize,
        at: Timestamp,
    },
    MultisigAttached {
        estate: EstateId,
        multisig: MultisigId,
        at: Timestamp,
    },
    ProposalCreated {
        multisig: MultisigId,
        proposal: ProposalId,
        proposer: Identity,
        target_estate: EstateId,
        at: Timestamp,
    },
    ProposalApproved {
        multisig: MultisigId,
        proposal: ProposalId,
        approver: Identity,
        total_approvals: usize,
        at: Timestamp,
    },
    ProposalExecuted {
        multisig: MultisigId,
        proposal: ProposalId,
        executor: Identity,
        at: Timestamp,
    },
    AdminChangeProposed {
        multisig: MultisigId,
        new_admin: Identity,
        effective_at: Timestamp,
        at: Timestamp,
    },
    AdminChangeExecuted {
        multisig: MultisigId,
        new_admin: Identity,
        at: Timestamp,
    },
    FeeChanged {
        new_fee: Amount,
        at: Timestamp,
    },
}

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the emitting thread; keep handlers fast to avoid
/// stalling the estate they were triggered from.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&EstateEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&EstateEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &EstateEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

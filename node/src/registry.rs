//! The estate registry — single entry point for every operation.
//!
//! Estates and committees live in arena maps keyed by their ids; each entry
//! sits behind its own mutex, giving the single-writer-per-entity discipline
//! the protocol requires while operations on different estates proceed in
//! parallel. Lock order is always committee before estate.
//!
//! The registry is also where the two authority paths converge: owner calls
//! and executed governance proposals both land on the same `Estate` methods,
//! differing only in the [`Authority`] value passed down.

use crate::error::NodeError;
use crate::events::{EstateEvent, EventBus};
use heirloom_estate::{
    Authority, Beneficiary, ClaimReceipt, Estate, LockType, TradingConfig,
};
use heirloom_governance::{GovernanceEngine, Multisig, Proposal, ProposalAction};
use heirloom_ledger::Ledger;
use heirloom_types::{
    Amount, AssetId, ContactHash, EstateId, Identity, LifecycleState, MultisigId, ProposalId,
    ProtocolParams, Timestamp,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub struct EstateRegistry<L: Ledger> {
    pub(crate) ledger: Arc<L>,
    pub(crate) treasury: Identity,
    pub(crate) params: RwLock<ProtocolParams>,
    events: EventBus,
    pub(crate) estates: RwLock<HashMap<EstateId, Arc<Mutex<Estate>>>>,
    pub(crate) next_estate: AtomicU64,
    pub(crate) multisigs: RwLock<HashMap<MultisigId, Arc<Mutex<GovernanceEngine>>>>,
    pub(crate) next_multisig: AtomicU64,
}

impl<L: Ledger> EstateRegistry<L> {
    pub fn new(ledger: Arc<L>, treasury: Identity, params: ProtocolParams) -> Self {
        Self {
            ledger,
            treasury,
            params: RwLock::new(params),
            events: EventBus::new(),
            estates: RwLock::new(HashMap::new()),
            next_estate: AtomicU64::new(0),
            multisigs: RwLock::new(HashMap::new()),
            next_multisig: AtomicU64::new(0),
        }
    }

    /// Attach an event listener. Call before the registry goes into service.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&EstateEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn params(&self) -> ProtocolParams {
        self.read_params()
    }

    // ── Estate lifecycle ─────────────────────────────────────────────────

    /// Validate, charge the creation fee, and register a new estate.
    ///
    /// Period validation runs before the fee moves, so a rejected request
    /// costs the caller nothing; a failed fee transfer leaves no estate
    /// behind.
    pub fn create_estate(
        &self,
        owner: Identity,
        contact_hash: ContactHash,
        inactivity_period_secs: u64,
        grace_period_secs: u64,
        now: Timestamp,
    ) -> Result<EstateId, NodeError> {
        let params = self.read_params();
        let id = EstateId::new(self.next_estate.fetch_add(1, Ordering::SeqCst));
        let estate = Estate::create(
            id,
            owner.clone(),
            contact_hash,
            inactivity_period_secs,
            grace_period_secs,
            &params,
            now,
        )?;

        if !params.creation_fee.is_zero() {
            self.ledger
                .transfer(&params.fee_asset, &owner, &self.treasury, params.creation_fee)?;
        }

        self.estates
            .write()
            .expect("estate arena poisoned")
            .insert(id, Arc::new(Mutex::new(estate)));
        self.events.emit(&EstateEvent::EstateCreated {
            estate: id,
            owner,
            at: now,
        });
        Ok(id)
    }

    pub fn check_in(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .check_in(caller, now)?;
        self.events.emit(&EstateEvent::CheckedIn {
            estate: estate_id,
            owner: caller.clone(),
            at: now,
        });
        Ok(())
    }

    pub fn deposit(
        &self,
        estate_id: EstateId,
        depositor: &Identity,
        asset: &AssetId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .deposit(self.ledger.as_ref(), depositor, asset, amount)?;
        self.events.emit(&EstateEvent::Deposited {
            estate: estate_id,
            depositor: depositor.clone(),
            asset: asset.clone(),
            amount,
            at: now,
        });
        Ok(())
    }

    pub fn update_beneficiaries(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        list: Vec<Beneficiary>,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let params = self.read_params();
        let count = list.len();
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .update_beneficiaries(&Authority::Owner(caller.clone()), list, &params)?;
        self.events.emit(&EstateEvent::BeneficiariesUpdated {
            estate: estate_id,
            actor: caller.clone(),
            count,
            at: now,
        });
        Ok(())
    }

    /// Anyone may call; succeeds (and stays succeeded) once inactivity and
    /// grace have both elapsed.
    pub fn trigger_inheritance(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        let newly_armed = arc
            .lock()
            .expect("estate mutex poisoned")
            .trigger_inheritance(now)?;
        if newly_armed {
            self.events.emit(&EstateEvent::InheritanceTriggered {
                estate: estate_id,
                triggered_by: caller.clone(),
                at: now,
            });
        }
        Ok(())
    }

    pub fn claim(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<ClaimReceipt, NodeError> {
        let arc = self.estate(estate_id)?;
        let receipt = arc
            .lock()
            .expect("estate mutex poisoned")
            .claim(self.ledger.as_ref(), caller, now)?;
        self.events.emit(&EstateEvent::Claimed {
            estate: estate_id,
            beneficiary: caller.clone(),
            transfers: receipt.transfers.clone(),
            at: now,
        });
        Ok(receipt)
    }

    // ── Trading delegation ───────────────────────────────────────────────

    pub fn enable_trading(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        cfg: TradingConfig,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let params = self.read_params();
        let delegate = cfg.delegate.clone();
        let arc = self.estate(estate_id)?;
        arc.lock().expect("estate mutex poisoned").enable_trading(
            &Authority::Owner(caller.clone()),
            cfg,
            &params,
            now,
        )?;
        self.events.emit(&EstateEvent::TradingEnabled {
            estate: estate_id,
            actor: caller.clone(),
            delegate,
            at: now,
        });
        Ok(())
    }

    pub fn pause_trading(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .pause_trading(caller, now)?;
        self.events.emit(&EstateEvent::TradingPaused {
            estate: estate_id,
            owner: caller.clone(),
            at: now,
        });
        Ok(())
    }

    pub fn resume_trading(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .resume_trading(caller, now)?;
        self.events.emit(&EstateEvent::TradingResumed {
            estate: estate_id,
            owner: caller.clone(),
            at: now,
        });
        Ok(())
    }

    pub fn contribute_to_trading(
        &self,
        estate_id: EstateId,
        contributor: &Identity,
        asset: &AssetId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .contribute_to_trading(self.ledger.as_ref(), contributor, asset, amount, now)?;
        self.events.emit(&EstateEvent::TradingContribution {
            estate: estate_id,
            contributor: contributor.clone(),
            asset: asset.clone(),
            amount,
            at: now,
        });
        Ok(())
    }

    pub fn update_trading_value(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        new_value: Amount,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .update_trading_value(caller, new_value, now)?;
        self.events.emit(&EstateEvent::TradingValueUpdated {
            estate: estate_id,
            delegate: caller.clone(),
            new_value,
            at: now,
        });
        Ok(())
    }

    pub fn distribute_profits(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        asset: &AssetId,
        now: Timestamp,
    ) -> Result<(Amount, Amount), NodeError> {
        let arc = self.estate(estate_id)?;
        let (owner_leg, delegate_leg) = arc
            .lock()
            .expect("estate mutex poisoned")
            .distribute_profits(self.ledger.as_ref(), caller, asset, now)?;
        self.events.emit(&EstateEvent::ProfitsDistributed {
            estate: estate_id,
            owner_leg,
            delegate_leg,
            at: now,
        });
        Ok((owner_leg, delegate_leg))
    }

    pub fn request_emergency_withdrawal(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<Timestamp, NodeError> {
        let arc = self.estate(estate_id)?;
        let ready_at = arc
            .lock()
            .expect("estate mutex poisoned")
            .request_emergency_withdrawal(caller, now)?;
        self.events.emit(&EstateEvent::EmergencyWithdrawalRequested {
            estate: estate_id,
            owner: caller.clone(),
            ready_at,
            at: now,
        });
        Ok(ready_at)
    }

    pub fn execute_emergency_withdrawal(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        asset: &AssetId,
        now: Timestamp,
    ) -> Result<Amount, NodeError> {
        let arc = self.estate(estate_id)?;
        let amount = arc
            .lock()
            .expect("estate mutex poisoned")
            .execute_emergency_withdrawal(self.ledger.as_ref(), caller, asset, now)?;
        self.events.emit(&EstateEvent::EmergencyWithdrawalExecuted {
            estate: estate_id,
            owner: caller.clone(),
            amount,
            at: now,
        });
        Ok(amount)
    }

    // ── Emergency lock & guardians ───────────────────────────────────────

    pub fn emergency_lock(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        lock_type: LockType,
        reason: String,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        // The governance lock type is reserved for the proposal path.
        if lock_type == LockType::GovernanceInitiated {
            return Err(NodeError::Estate(
                heirloom_estate::EstateError::Unauthorized {
                    caller: caller.to_string(),
                },
            ));
        }
        let params = self.read_params();
        let arc = self.estate(estate_id)?;
        arc.lock().expect("estate mutex poisoned").emergency_lock(
            &Authority::Owner(caller.clone()),
            lock_type,
            reason.clone(),
            &params,
            now,
        )?;
        self.events.emit(&EstateEvent::EmergencyLocked {
            estate: estate_id,
            actor: caller.clone(),
            reason,
            at: now,
        });
        Ok(())
    }

    pub fn emergency_unlock(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let params = self.read_params();
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .emergency_unlock(caller, &params, now)?;
        self.events.emit(&EstateEvent::EmergencyUnlocked {
            estate: estate_id,
            actor: caller.clone(),
            forced: false,
            at: now,
        });
        Ok(())
    }

    pub fn add_guardian(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        guardian: Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .add_guardian(caller, guardian.clone())?;
        self.events.emit(&EstateEvent::GuardianAdded {
            estate: estate_id,
            guardian,
            at: now,
        });
        Ok(())
    }

    pub fn remove_guardian(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        guardian: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .remove_guardian(caller, guardian)?;
        self.events.emit(&EstateEvent::GuardianRemoved {
            estate: estate_id,
            guardian: guardian.clone(),
            at: now,
        });
        Ok(())
    }

    // ── RWAs ─────────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn add_rwa(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        kind: String,
        name: String,
        description: String,
        appraised_value: String,
        metadata_uri: String,
        now: Timestamp,
    ) -> Result<u32, NodeError> {
        let arc = self.estate(estate_id)?;
        let number = arc.lock().expect("estate mutex poisoned").add_rwa(
            &Authority::Owner(caller.clone()),
            kind,
            name,
            description,
            appraised_value,
            metadata_uri,
            now,
        )?;
        self.events.emit(&EstateEvent::RwaAdded {
            estate: estate_id,
            number,
            at: now,
        });
        Ok(number)
    }

    pub fn remove_rwa(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        number: u32,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .remove_rwa(caller, number)?;
        self.events.emit(&EstateEvent::RwaRemoved {
            estate: estate_id,
            number,
            at: now,
        });
        Ok(())
    }

    pub fn claim_rwa(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        number: u32,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .claim_rwa(caller, number)?;
        self.events.emit(&EstateEvent::RwaClaimed {
            estate: estate_id,
            number,
            beneficiary: caller.clone(),
            at: now,
        });
        Ok(())
    }

    // ── Governance ───────────────────────────────────────────────────────

    pub fn init_multisig(
        &self,
        creator: Identity,
        signers: Vec<Identity>,
        threshold: usize,
        now: Timestamp,
    ) -> Result<MultisigId, NodeError> {
        let params = self.read_params();
        let id = MultisigId::new(self.next_multisig.fetch_add(1, Ordering::SeqCst));
        let signer_count = signers.len();
        let multisig = Multisig::init(id, creator.clone(), signers, threshold, &params)?;
        self.multisigs
            .write()
            .expect("multisig arena poisoned")
            .insert(id, Arc::new(Mutex::new(GovernanceEngine::new(multisig))));
        self.events.emit(&EstateEvent::MultisigInitialized {
            multisig: id,
            admin: creator,
            signers: signer_count,
            threshold,
            at: now,
        });
        Ok(id)
    }

    pub fn attach_multisig(
        &self,
        estate_id: EstateId,
        caller: &Identity,
        multisig_id: MultisigId,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        // Committee must exist before an estate submits to it.
        let _ = self.engine(multisig_id)?;
        let arc = self.estate(estate_id)?;
        arc.lock()
            .expect("estate mutex poisoned")
            .attach_multisig(caller, multisig_id)?;
        self.events.emit(&EstateEvent::MultisigAttached {
            estate: estate_id,
            multisig: multisig_id,
            at: now,
        });
        Ok(())
    }

    pub fn create_proposal(
        &self,
        multisig_id: MultisigId,
        proposer: &Identity,
        target_estate: EstateId,
        action: ProposalAction,
        now: Timestamp,
    ) -> Result<ProposalId, NodeError> {
        let _ = self.estate(target_estate)?;
        let engine_arc = self.engine(multisig_id)?;
        let proposal_id = engine_arc
            .lock()
            .expect("governance mutex poisoned")
            .create_proposal(proposer, target_estate, action, now)?;
        self.events.emit(&EstateEvent::ProposalCreated {
            multisig: multisig_id,
            proposal: proposal_id,
            proposer: proposer.clone(),
            target_estate,
            at: now,
        });
        Ok(proposal_id)
    }

    pub fn approve_proposal(
        &self,
        multisig_id: MultisigId,
        proposal_id: ProposalId,
        signer: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let params = self.read_params();
        let engine_arc = self.engine(multisig_id)?;
        let total = engine_arc
            .lock()
            .expect("governance mutex poisoned")
            .approve(proposal_id, signer, &params, now)?;
        self.events.emit(&EstateEvent::ProposalApproved {
            multisig: multisig_id,
            proposal: proposal_id,
            approver: signer.clone(),
            total_approvals: total,
            at: now,
        });
        Ok(())
    }

    /// Execute a threshold-approved proposal.
    ///
    /// The action runs through the same internal estate operations the owner
    /// facade uses, under governance authority; only if it succeeds does the
    /// proposal flip to executed. Lock order: committee, then estate.
    pub fn execute_proposal(
        &self,
        multisig_id: MultisigId,
        proposal_id: ProposalId,
        executor: &Identity,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let params = self.read_params();
        let engine_arc = self.engine(multisig_id)?;
        let mut engine = engine_arc.lock().expect("governance mutex poisoned");
        let proposal = engine.validate_execution(proposal_id, &params, now)?.clone();

        self.apply_action(&mut engine, &proposal, multisig_id, &params, now)?;
        engine.mark_executed(proposal_id)?;
        drop(engine);

        self.events.emit(&EstateEvent::ProposalExecuted {
            multisig: multisig_id,
            proposal: proposal_id,
            executor: executor.clone(),
            at: now,
        });
        Ok(())
    }

    fn apply_action(
        &self,
        engine: &mut GovernanceEngine,
        proposal: &Proposal,
        multisig_id: MultisigId,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        match &proposal.action {
            ProposalAction::UpdateSigners { signers, threshold } => {
                engine
                    .multisig
                    .update_signers(signers.clone(), *threshold, params)?;
                Ok(())
            }
            ProposalAction::ChangeFee { new_fee } => {
                self.params
                    .write()
                    .expect("params lock poisoned")
                    .creation_fee = *new_fee;
                self.events.emit(&EstateEvent::FeeChanged {
                    new_fee: *new_fee,
                    at: now,
                });
                Ok(())
            }
            action => {
                let arc = self.estate(proposal.target_estate)?;
                let mut estate = arc.lock().expect("estate mutex poisoned");
                match estate.multisig {
                    None => return Err(NodeError::NoMultisigAttached(proposal.target_estate)),
                    Some(attached) if attached != multisig_id => {
                        return Err(NodeError::WrongMultisig(proposal.target_estate))
                    }
                    Some(_) => {}
                }

                match action {
                    ProposalAction::EmergencyLock { reason } => {
                        estate.emergency_lock(
                            &Authority::Governance,
                            LockType::GovernanceInitiated,
                            reason.clone(),
                            params,
                            now,
                        )?;
                        self.events.emit(&EstateEvent::EmergencyLocked {
                            estate: proposal.target_estate,
                            actor: Identity::new("governance"),
                            reason: reason.clone(),
                            at: now,
                        });
                    }
                    ProposalAction::ForceUnlock => {
                        GovernanceEngine::ensure_guardian_approval(proposal, |who| {
                            estate.emergency.is_guardian(who)
                        })?;
                        estate.force_unlock()?;
                        self.events.emit(&EstateEvent::EmergencyUnlocked {
                            estate: proposal.target_estate,
                            actor: Identity::new("governance"),
                            forced: true,
                            at: now,
                        });
                    }
                    ProposalAction::Withdraw { asset, to, amount } => {
                        estate.withdraw(
                            self.ledger.as_ref(),
                            &Authority::Governance,
                            asset,
                            to,
                            *amount,
                        )?;
                    }
                    ProposalAction::UpdateBeneficiaries { beneficiaries } => {
                        estate.update_beneficiaries(
                            &Authority::Governance,
                            beneficiaries.clone(),
                            params,
                        )?;
                    }
                    ProposalAction::EnableTrading {
                        delegate,
                        human_share,
                        strategy,
                        stop_loss,
                        emergency_delay_hours,
                    } => {
                        estate.enable_trading(
                            &Authority::Governance,
                            TradingConfig {
                                delegate: delegate.clone(),
                                human_share: *human_share,
                                strategy: *strategy,
                                stop_loss: *stop_loss,
                                emergency_delay_hours: *emergency_delay_hours,
                            },
                            params,
                            now,
                        )?;
                    }
                    ProposalAction::UpdateSigners { .. } | ProposalAction::ChangeFee { .. } => {
                        unreachable!("handled above")
                    }
                }
                Ok(())
            }
        }
    }

    pub fn propose_admin_change(
        &self,
        multisig_id: MultisigId,
        caller: &Identity,
        new_admin: Identity,
        now: Timestamp,
    ) -> Result<Timestamp, NodeError> {
        let params = self.read_params();
        let engine_arc = self.engine(multisig_id)?;
        let effective_at = engine_arc
            .lock()
            .expect("governance mutex poisoned")
            .multisig
            .propose_admin_change(caller, new_admin.clone(), &params, now)?;
        self.events.emit(&EstateEvent::AdminChangeProposed {
            multisig: multisig_id,
            new_admin,
            effective_at,
            at: now,
        });
        Ok(effective_at)
    }

    pub fn accept_admin_change(
        &self,
        multisig_id: MultisigId,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let engine_arc = self.engine(multisig_id)?;
        let new_admin = engine_arc
            .lock()
            .expect("governance mutex poisoned")
            .multisig
            .accept_admin_change(now)?;
        self.events.emit(&EstateEvent::AdminChangeExecuted {
            multisig: multisig_id,
            new_admin,
            at: now,
        });
        Ok(())
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn lifecycle_state(
        &self,
        estate_id: EstateId,
        now: Timestamp,
    ) -> Result<LifecycleState, NodeError> {
        let arc = self.estate(estate_id)?;
        let state = arc
            .lock()
            .expect("estate mutex poisoned")
            .lifecycle_state(now);
        Ok(state)
    }

    /// A point-in-time copy of an estate, for inspection and tests.
    pub fn estate_snapshot(&self, estate_id: EstateId) -> Result<Estate, NodeError> {
        let arc = self.estate(estate_id)?;
        let estate = arc.lock().expect("estate mutex poisoned").clone();
        Ok(estate)
    }

    pub fn proposal_snapshot(
        &self,
        multisig_id: MultisigId,
        proposal_id: ProposalId,
    ) -> Result<Proposal, NodeError> {
        let engine_arc = self.engine(multisig_id)?;
        let engine = engine_arc.lock().expect("governance mutex poisoned");
        Ok(engine.proposal(proposal_id)?.clone())
    }

    pub fn multisig_snapshot(&self, multisig_id: MultisigId) -> Result<Multisig, NodeError> {
        let engine_arc = self.engine(multisig_id)?;
        let engine = engine_arc.lock().expect("governance mutex poisoned");
        Ok(engine.multisig.clone())
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn estate(&self, id: EstateId) -> Result<Arc<Mutex<Estate>>, NodeError> {
        self.estates
            .read()
            .expect("estate arena poisoned")
            .get(&id)
            .cloned()
            .ok_or(NodeError::UnknownEstate(id))
    }

    fn engine(&self, id: MultisigId) -> Result<Arc<Mutex<GovernanceEngine>>, NodeError> {
        self.multisigs
            .read()
            .expect("multisig arena poisoned")
            .get(&id)
            .cloned()
            .ok_or(NodeError::UnknownMultisig(id))
    }

    fn read_params(&self) -> ProtocolParams {
        self.params.read().expect("params lock poisoned").clone()
    }
}

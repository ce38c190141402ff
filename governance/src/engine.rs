//! Proposal lifecycle engine for one committee.
//!
//! The engine validates the multi-party approval protocol; it never touches
//! estates itself. Execution is two-step so the caller can apply the action
//! through the shared internal estate operations and only then mark the
//! proposal executed — a failed application leaves the proposal pending.

use crate::error::GovernanceError;
use crate::multisig::Multisig;
use crate::proposal::{Proposal, ProposalAction};
use heirloom_types::{EstateId, Identity, ProposalId, ProtocolParams, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// One committee plus every proposal it has ever raised.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceEngine {
    pub multisig: Multisig,
    proposals: BTreeMap<ProposalId, Proposal>,
    next_proposal: u64,
}

impl GovernanceEngine {
    pub fn new(multisig: Multisig) -> Self {
        Self {
            multisig,
            proposals: BTreeMap::new(),
            next_proposal: 0,
        }
    }

    /// Raise a proposal. The proposer must be a signer and approves
    /// implicitly.
    pub fn create_proposal(
        &mut self,
        proposer: &Identity,
        target_estate: EstateId,
        action: ProposalAction,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if !self.multisig.is_signer(proposer) {
            return Err(GovernanceError::UnauthorizedSigner(proposer.to_string()));
        }
        let id = ProposalId::new(self.next_proposal);
        self.next_proposal += 1;
        let proposal = Proposal::new(
            id,
            self.multisig.id,
            proposer.clone(),
            target_estate,
            action,
            now,
        );
        info!(
            multisig = %self.multisig.id, proposal = %id,
            action = proposal.action.name(), %proposer, "proposal created"
        );
        self.proposals.insert(id, proposal);
        Ok(id)
    }

    /// Record one signer's approval.
    pub fn approve(
        &mut self,
        id: ProposalId,
        signer: &Identity,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<usize, GovernanceError> {
        if !self.multisig.is_signer(signer) {
            return Err(GovernanceError::UnauthorizedSigner(signer.to_string()));
        }
        let expiry = params.proposal_expiry_secs;
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;
        if proposal.executed {
            return Err(GovernanceError::ProposalAlreadyExecuted);
        }
        if proposal.is_expired(expiry, now) {
            return Err(GovernanceError::ProposalExpired {
                expired_at: proposal.created_at.plus(expiry).as_secs(),
            });
        }
        if proposal.has_approved(signer) {
            return Err(GovernanceError::DuplicateApproval(signer.to_string()));
        }
        proposal.approvals.push(signer.clone());
        info!(
            multisig = %self.multisig.id, proposal = %id, %signer,
            approvals = proposal.approvals.len(), threshold = self.multisig.threshold,
            "proposal approved"
        );
        Ok(proposal.approvals.len())
    }

    /// Check everything execution requires — threshold, expiry, one-shot —
    /// without consuming the proposal. A fully-approved proposal past its
    /// expiry still fails here.
    pub fn validate_execution(
        &self,
        id: ProposalId,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<&Proposal, GovernanceError> {
        let proposal = self
            .proposals
            .get(&id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;
        if proposal.executed {
            return Err(GovernanceError::ProposalAlreadyExecuted);
        }
        if proposal.is_expired(params.proposal_expiry_secs, now) {
            return Err(GovernanceError::ProposalExpired {
                expired_at: proposal.created_at.plus(params.proposal_expiry_secs).as_secs(),
            });
        }
        if proposal.approvals.len() < self.multisig.threshold {
            return Err(GovernanceError::InsufficientApprovals {
                have: proposal.approvals.len(),
                need: self.multisig.threshold,
            });
        }
        Ok(proposal)
    }

    /// The force-unlock overlay rule: at least one approver must be a
    /// guardian of the target estate.
    pub fn ensure_guardian_approval(
        proposal: &Proposal,
        is_guardian: impl Fn(&Identity) -> bool,
    ) -> Result<(), GovernanceError> {
        if proposal.approvals.iter().any(is_guardian) {
            Ok(())
        } else {
            Err(GovernanceError::GuardianApprovalRequired)
        }
    }

    /// Flip the one-shot flag after the action was applied successfully.
    pub fn mark_executed(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;
        proposal.executed = true;
        info!(multisig = %self.multisig.id, proposal = %id, "proposal executed");
        Ok(())
    }

    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(&id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}

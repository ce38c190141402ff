//! Multisig committee: signer set, threshold, and admin rotation.

use crate::error::GovernanceError;
use heirloom_types::{Identity, MultisigId, ProtocolParams, Timestamp};
use serde::{Deserialize, Serialize};

/// A committee of signers with an approval threshold.
///
/// The admin manages committee membership through `UpdateSigners` proposals
/// like everyone else; the only admin-exclusive power is nominating their
/// successor, and even that sits behind a timelock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Multisig {
    pub id: MultisigId,
    pub signers: Vec<Identity>,
    pub threshold: usize,
    pub admin: Identity,
    pub pending_admin: Option<Identity>,
    /// When the pending admin may take over.
    pub admin_change_at: Option<Timestamp>,
}

impl Multisig {
    /// Validate and create a committee. The creator becomes admin.
    pub fn init(
        id: MultisigId,
        admin: Identity,
        signers: Vec<Identity>,
        threshold: usize,
        params: &ProtocolParams,
    ) -> Result<Self, GovernanceError> {
        validate_signer_set(&signers, threshold, params)?;
        Ok(Self {
            id,
            signers,
            threshold,
            admin,
            pending_admin: None,
            admin_change_at: None,
        })
    }

    pub fn is_signer(&self, identity: &Identity) -> bool {
        self.signers.contains(identity)
    }

    /// Replace the signer set and threshold (reached via an executed
    /// `UpdateSigners` proposal).
    pub fn update_signers(
        &mut self,
        signers: Vec<Identity>,
        threshold: usize,
        params: &ProtocolParams,
    ) -> Result<(), GovernanceError> {
        validate_signer_set(&signers, threshold, params)?;
        self.signers = signers;
        self.threshold = threshold;
        Ok(())
    }

    /// Admin nominates a successor; the change arms after the timelock.
    pub fn propose_admin_change(
        &mut self,
        caller: &Identity,
        new_admin: Identity,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<Timestamp, GovernanceError> {
        if caller != &self.admin {
            return Err(GovernanceError::NotAdmin(caller.to_string()));
        }
        let at = now.plus(params.admin_timelock_secs);
        self.pending_admin = Some(new_admin);
        self.admin_change_at = Some(at);
        Ok(at)
    }

    /// Complete a pending admin change once the timelock has expired.
    pub fn accept_admin_change(&mut self, now: Timestamp) -> Result<Identity, GovernanceError> {
        let new_admin = self
            .pending_admin
            .clone()
            .ok_or(GovernanceError::NoPendingAdminChange)?;
        let at = self
            .admin_change_at
            .expect("pending admin always carries a change time");
        if now < at {
            return Err(GovernanceError::TimelockNotExpired {
                ready_at: at.as_secs(),
            });
        }
        self.admin = new_admin.clone();
        self.pending_admin = None;
        self.admin_change_at = None;
        Ok(new_admin)
    }
}

fn validate_signer_set(
    signers: &[Identity],
    threshold: usize,
    params: &ProtocolParams,
) -> Result<(), GovernanceError> {
    if signers.len() < params.min_signers || signers.len() > params.max_signers {
        return Err(GovernanceError::InvalidSignerCount {
            given: signers.len(),
            min: params.min_signers,
            max: params.max_signers,
        });
    }
    for (i, s) in signers.iter().enumerate() {
        if signers[..i].contains(s) {
            return Err(GovernanceError::DuplicateSigner(s.to_string()));
        }
    }
    if threshold < params.min_threshold || threshold > signers.len() {
        return Err(GovernanceError::InvalidThreshold {
            given: threshold,
            min: params.min_threshold,
            signers: signers.len(),
        });
    }
    Ok(())
}

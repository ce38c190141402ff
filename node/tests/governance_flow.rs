//! Multisig governance end-to-end: proposal lifecycle, expiry, forced
//! unlock with guardian co-approval, signer rotation, and fee changes.

use heirloom_estate::{EstateError, LockType};
use heirloom_governance::{GovernanceError, ProposalAction};
use heirloom_ledger::{Ledger, MemoryLedger};
use heirloom_node::{EstateRegistry, NodeError};
use heirloom_types::{
    Amount, AssetId, ContactHash, EstateId, Identity, MultisigId, ProtocolParams, Timestamp,
};
use std::sync::Arc;

const DAY: u64 = 24 * 3600;
const WEEK: u64 = 7 * DAY;

fn owner() -> Identity {
    Identity::new("owner")
}

fn signer(n: usize) -> Identity {
    Identity::new(format!("s{n}"))
}

fn setup() -> (EstateRegistry<MemoryLedger>, Arc<MemoryLedger>, EstateId, MultisigId) {
    let ledger = Arc::new(MemoryLedger::new());
    let params = ProtocolParams::default();
    ledger.mint(&params.fee_asset, &owner(), params.creation_fee);

    let registry = EstateRegistry::new(
        Arc::clone(&ledger),
        Identity::new("heirloom-treasury"),
        params,
    );
    let estate = registry
        .create_estate(
            owner(),
            ContactHash::from_plain("owner@example.com"),
            30 * DAY,
            7 * DAY,
            Timestamp::new(0),
        )
        .unwrap();
    let multisig = registry
        .init_multisig(
            signer(1),
            vec![signer(1), signer(2), signer(3)],
            2,
            Timestamp::new(0),
        )
        .unwrap();
    registry
        .attach_multisig(estate, &owner(), multisig, Timestamp::new(0))
        .unwrap();
    (registry, ledger, estate, multisig)
}

fn lock_action() -> ProposalAction {
    ProposalAction::EmergencyLock {
        reason: "committee-ordered freeze".into(),
    }
}

#[test]
fn init_multisig_validates_signers_and_threshold() {
    let (registry, ..) = setup();

    assert!(matches!(
        registry.init_multisig(signer(1), vec![signer(1), signer(1)], 2, Timestamp::new(0)),
        Err(NodeError::Governance(GovernanceError::DuplicateSigner(_)))
    ));
    assert!(matches!(
        registry.init_multisig(signer(1), vec![signer(1), signer(2)], 1, Timestamp::new(0)),
        Err(NodeError::Governance(GovernanceError::InvalidThreshold { .. }))
    ));
    assert!(matches!(
        registry.init_multisig(signer(1), vec![signer(1), signer(2)], 3, Timestamp::new(0)),
        Err(NodeError::Governance(GovernanceError::InvalidThreshold { .. }))
    ));
}

/// Scenario D: proposer auto-approves, duplicate approval is rejected, the
/// second signer pushes past threshold, execution is one-shot.
#[test]
fn proposal_lifecycle_to_one_shot_execution() {
    let (registry, _, estate, multisig) = setup();

    let proposal = registry
        .create_proposal(multisig, &signer(1), estate, lock_action(), Timestamp::new(10))
        .unwrap();
    assert_eq!(
        registry
            .proposal_snapshot(multisig, proposal)
            .unwrap()
            .approvals,
        vec![signer(1)]
    );

    assert!(matches!(
        registry.approve_proposal(multisig, proposal, &signer(1), Timestamp::new(20)),
        Err(NodeError::Governance(GovernanceError::DuplicateApproval(_)))
    ));

    // Below threshold: execution refused.
    assert!(matches!(
        registry.execute_proposal(multisig, proposal, &signer(1), Timestamp::new(25)),
        Err(NodeError::Governance(
            GovernanceError::InsufficientApprovals { have: 1, need: 2 }
        ))
    ));

    registry
        .approve_proposal(multisig, proposal, &signer(2), Timestamp::new(30))
        .unwrap();
    registry
        .execute_proposal(multisig, proposal, &signer(1), Timestamp::new(40))
        .unwrap();

    // The governance lock landed on the estate.
    let snapshot = registry.estate_snapshot(estate).unwrap();
    assert!(snapshot.emergency.locked);
    assert_eq!(
        snapshot.emergency.lock_type,
        Some(LockType::GovernanceInitiated)
    );

    assert!(matches!(
        registry.execute_proposal(multisig, proposal, &signer(1), Timestamp::new(50)),
        Err(NodeError::Governance(GovernanceError::ProposalAlreadyExecuted))
    ));
}

#[test]
fn expired_proposal_rejected_even_when_fully_approved() {
    let (registry, _, estate, multisig) = setup();
    let proposal = registry
        .create_proposal(multisig, &signer(1), estate, lock_action(), Timestamp::new(0))
        .unwrap();
    registry
        .approve_proposal(multisig, proposal, &signer(2), Timestamp::new(10))
        .unwrap();

    assert!(matches!(
        registry.execute_proposal(multisig, proposal, &signer(1), Timestamp::new(WEEK + 1)),
        Err(NodeError::Governance(GovernanceError::ProposalExpired { .. }))
    ));
    assert!(matches!(
        registry.approve_proposal(multisig, proposal, &signer(3), Timestamp::new(WEEK + 1)),
        Err(NodeError::Governance(GovernanceError::ProposalExpired { .. }))
    ));
}

/// Scenario E: owner lock blocks check-in; owner unlock restores; a forced
/// unlock needs threshold approvals including a guardian.
#[test]
fn forced_unlock_requires_guardian_among_approvers() {
    let (registry, _, estate, multisig) = setup();

    // s2 doubles as a guardian; registered before anything locks.
    registry
        .add_guardian(estate, &owner(), signer(2), Timestamp::new(1))
        .unwrap();

    registry
        .emergency_lock(
            estate,
            &owner(),
            LockType::UserInitiated,
            "credentials possibly leaked".into(),
            Timestamp::new(1_000),
        )
        .unwrap();
    assert!(matches!(
        registry.check_in(estate, &owner(), Timestamp::new(1_001)),
        Err(NodeError::Estate(EstateError::EstateLocked))
    ));

    // Owner unlock after the minimum lock duration works...
    registry
        .emergency_unlock(estate, &owner(), Timestamp::new(1_300))
        .unwrap();
    registry.check_in(estate, &owner(), Timestamp::new(1_301)).unwrap();

    // ...but suppose the owner is gone: lock again (cooldown respected) and
    // run the governance path.
    registry
        .emergency_lock(
            estate,
            &owner(),
            LockType::SecurityBreach,
            "device stolen, owner unreachable".into(),
            Timestamp::new(5_000),
        )
        .unwrap();

    // First attempt: threshold met but no guardian among approvers.
    let no_guardian = registry
        .create_proposal(
            multisig,
            &signer(1),
            estate,
            ProposalAction::ForceUnlock,
            Timestamp::new(5_100),
        )
        .unwrap();
    registry
        .approve_proposal(multisig, no_guardian, &signer(3), Timestamp::new(5_200))
        .unwrap();
    assert!(matches!(
        registry.execute_proposal(multisig, no_guardian, &signer(1), Timestamp::new(5_300)),
        Err(NodeError::Governance(GovernanceError::GuardianApprovalRequired))
    ));
    // The failure left the proposal pending, and the estate locked.
    assert!(!registry
        .proposal_snapshot(multisig, no_guardian)
        .unwrap()
        .executed);
    assert!(registry.estate_snapshot(estate).unwrap().emergency.locked);

    // Guardian s2 joins the approval set; execution now succeeds without
    // any owner involvement.
    registry
        .approve_proposal(multisig, no_guardian, &signer(2), Timestamp::new(5_400))
        .unwrap();
    registry
        .execute_proposal(multisig, no_guardian, &signer(1), Timestamp::new(5_500))
        .unwrap();
    assert!(!registry.estate_snapshot(estate).unwrap().emergency.locked);
}

#[test]
fn governance_lock_is_not_owner_unlockable() {
    let (registry, _, estate, multisig) = setup();
    let proposal = registry
        .create_proposal(multisig, &signer(1), estate, lock_action(), Timestamp::new(0))
        .unwrap();
    registry
        .approve_proposal(multisig, proposal, &signer(2), Timestamp::new(1))
        .unwrap();
    registry
        .execute_proposal(multisig, proposal, &signer(1), Timestamp::new(2))
        .unwrap();

    assert!(matches!(
        registry.emergency_unlock(estate, &owner(), Timestamp::new(10_000)),
        Err(NodeError::Estate(EstateError::Unauthorized { .. }))
    ));
}

#[test]
fn governance_withdraw_moves_vault_funds() {
    let (registry, ledger, estate, multisig) = setup();
    let usdq = AssetId::new("USDQ");
    ledger.mint(&usdq, &Identity::new("donor"), Amount::new(500));
    registry
        .deposit(estate, &Identity::new("donor"), &usdq, Amount::new(500), Timestamp::new(1))
        .unwrap();

    let recovery = Identity::new("recovery-wallet");
    let proposal = registry
        .create_proposal(
            multisig,
            &signer(1),
            estate,
            ProposalAction::Withdraw {
                asset: usdq.clone(),
                to: recovery.clone(),
                amount: Amount::new(200),
            },
            Timestamp::new(10),
        )
        .unwrap();
    registry
        .approve_proposal(multisig, proposal, &signer(3), Timestamp::new(11))
        .unwrap();
    registry
        .execute_proposal(multisig, proposal, &signer(1), Timestamp::new(12))
        .unwrap();

    assert_eq!(ledger.balance(&usdq, &recovery), Amount::new(200));
    let snapshot = registry.estate_snapshot(estate).unwrap();
    assert_eq!(snapshot.vaults.balance(&usdq), Amount::new(300));
    assert_eq!(snapshot.estate_value, Amount::new(300));
}

#[test]
fn change_fee_applies_to_subsequent_creations() {
    let (registry, ledger, estate, multisig) = setup();

    let proposal = registry
        .create_proposal(
            multisig,
            &signer(2),
            estate,
            ProposalAction::ChangeFee {
                new_fee: Amount::new(5),
            },
            Timestamp::new(10),
        )
        .unwrap();
    registry
        .approve_proposal(multisig, proposal, &signer(3), Timestamp::new(11))
        .unwrap();
    registry
        .execute_proposal(multisig, proposal, &signer(2), Timestamp::new(12))
        .unwrap();
    assert_eq!(registry.params().creation_fee, Amount::new(5));

    let newcomer = Identity::new("newcomer");
    ledger.mint(&registry.params().fee_asset, &newcomer, Amount::new(5));
    registry
        .create_estate(
            newcomer.clone(),
            ContactHash::EMPTY,
            30 * DAY,
            7 * DAY,
            Timestamp::new(20),
        )
        .unwrap();
    assert_eq!(
        ledger.balance(&registry.params().fee_asset, &newcomer),
        Amount::ZERO
    );
}

#[test]
fn update_signers_rotates_the_committee() {
    let (registry, _, estate, multisig) = setup();

    let proposal = registry
        .create_proposal(
            multisig,
            &signer(1),
            estate,
            ProposalAction::UpdateSigners {
                signers: vec![signer(1), signer(4), signer(5)],
                threshold: 3,
            },
            Timestamp::new(10),
        )
        .unwrap();
    registry
        .approve_proposal(multisig, proposal, &signer(2), Timestamp::new(11))
        .unwrap();
    registry
        .execute_proposal(multisig, proposal, &signer(1), Timestamp::new(12))
        .unwrap();

    let committee = registry.multisig_snapshot(multisig).unwrap();
    assert_eq!(committee.threshold, 3);
    assert!(committee.is_signer(&signer(4)));
    // The rotated-out signer can no longer propose.
    assert!(matches!(
        registry.create_proposal(multisig, &signer(2), estate, lock_action(), Timestamp::new(20)),
        Err(NodeError::Governance(GovernanceError::UnauthorizedSigner(_)))
    ));
}

#[test]
fn proposals_against_foreign_estates_do_not_execute() {
    let (registry, ledger, _, multisig) = setup();

    // A second estate that never attached this committee.
    let stranger = Identity::new("stranger");
    ledger.mint(&registry.params().fee_asset, &stranger, registry.params().creation_fee);
    let foreign = registry
        .create_estate(stranger, ContactHash::EMPTY, 30 * DAY, 7 * DAY, Timestamp::new(0))
        .unwrap();

    let proposal = registry
        .create_proposal(multisig, &signer(1), foreign, lock_action(), Timestamp::new(1))
        .unwrap();
    registry
        .approve_proposal(multisig, proposal, &signer(2), Timestamp::new(2))
        .unwrap();
    assert!(matches!(
        registry.execute_proposal(multisig, proposal, &signer(1), Timestamp::new(3)),
        Err(NodeError::NoMultisigAttached(_))
    ));
}

#[test]
fn admin_rotation_sits_behind_the_timelock() {
    let (registry, _, _, multisig) = setup();

    assert!(matches!(
        registry.propose_admin_change(multisig, &signer(2), signer(2), Timestamp::new(0)),
        Err(NodeError::Governance(GovernanceError::NotAdmin(_)))
    ));

    let effective_at = registry
        .propose_admin_change(multisig, &signer(1), signer(2), Timestamp::new(100))
        .unwrap();
    assert_eq!(effective_at, Timestamp::new(100 + 48 * 3600));

    assert!(matches!(
        registry.accept_admin_change(multisig, Timestamp::new(200)),
        Err(NodeError::Governance(GovernanceError::TimelockNotExpired { .. }))
    ));
    registry.accept_admin_change(multisig, effective_at).unwrap();
    assert_eq!(registry.multisig_snapshot(multisig).unwrap().admin, signer(2));
}

//! Snapshot persistence: a registry restored from disk picks up exactly
//! where the old one stopped.

use heirloom_estate::Beneficiary;
use heirloom_governance::ProposalAction;
use heirloom_ledger::MemoryLedger;
use heirloom_node::EstateRegistry;
use heirloom_types::{
    Amount, AssetId, ContactHash, Identity, ProtocolParams, ShareBps, Timestamp,
};
use std::sync::Arc;

const DAY: u64 = 24 * 3600;

fn owner() -> Identity {
    Identity::new("owner")
}

#[test]
fn snapshot_survives_a_restart() {
    let ledger = Arc::new(MemoryLedger::new());
    let params = ProtocolParams::default();
    ledger.mint(&params.fee_asset, &owner(), params.creation_fee);
    let usdq = AssetId::new("USDQ");
    ledger.mint(&usdq, &owner(), Amount::new(1_000));

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
    registry
        .update_beneficiaries(
            estate,
            &owner(),
            vec![Beneficiary::new(
                Identity::new("b1"),
                ShareBps::new(10_000),
                "b1",
                "heir",
                ContactHash::from_plain("b1"),
            )],
            Timestamp::new(1),
        )
        .unwrap();
    registry
        .deposit(estate, &owner(), &usdq, Amount::new(750), Timestamp::new(2))
        .unwrap();
    let multisig = registry
        .init_multisig(
            Identity::new("s1"),
            vec![Identity::new("s1"), Identity::new("s2")],
            2,
            Timestamp::new(3),
        )
        .unwrap();
    registry
        .attach_multisig(estate, &owner(), multisig, Timestamp::new(4))
        .unwrap();
    let proposal = registry
        .create_proposal(
            multisig,
            &Identity::new("s1"),
            estate,
            ProposalAction::EmergencyLock {
                reason: "pending investigation".into(),
            },
            Timestamp::new(5),
        )
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.snapshot");
    registry.save_to_file(&path).unwrap();

    let restored = EstateRegistry::load_from_file(&path, Arc::clone(&ledger)).unwrap();
    let snapshot = restored.estate_snapshot(estate).unwrap();
    assert_eq!(snapshot.owner, owner());
    assert_eq!(snapshot.estate_value, Amount::new(750));
    assert_eq!(snapshot.beneficiaries.len(), 1);
    assert_eq!(snapshot.multisig, Some(multisig));

    // The pending proposal survived and can complete its lifecycle.
    restored
        .approve_proposal(multisig, proposal, &Identity::new("s2"), Timestamp::new(10))
        .unwrap();
    restored
        .execute_proposal(multisig, proposal, &Identity::new("s1"), Timestamp::new(11))
        .unwrap();
    assert!(restored.estate_snapshot(estate).unwrap().emergency.locked);

    // Id counters continue, never reuse.
    ledger.mint(&restored.params().fee_asset, &owner(), restored.params().creation_fee);
    let next = restored
        .create_estate(owner(), ContactHash::EMPTY, 30 * DAY, 7 * DAY, Timestamp::new(20))
        .unwrap();
    assert!(next.value() > estate.value());
}

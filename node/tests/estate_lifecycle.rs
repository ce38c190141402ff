//! End-to-end lifecycle: creation fee, check-ins, inheritance trigger, and
//! proportional claims.

use heirloom_estate::{Beneficiary, EstateError};
use heirloom_ledger::{Ledger, MemoryLedger};
use heirloom_node::{EstateEvent, EstateRegistry, NodeError};
use heirloom_types::{
    Amount, AssetId, ContactHash, EstateId, Identity, LifecycleState, ProtocolParams, ShareBps,
    Timestamp,
};
use std::sync::{Arc, Mutex};

const DAY: u64 = 24 * 3600;
const FEE: u128 = 100_000_000;

fn owner() -> Identity {
    Identity::new("owner")
}

fn usdq() -> AssetId {
    AssetId::new("USDQ")
}

fn setup() -> (EstateRegistry<MemoryLedger>, Arc<MemoryLedger>) {
    let ledger = Arc::new(MemoryLedger::new());
    let params = ProtocolParams::default();
    ledger.mint(&params.fee_asset, &owner(), Amount::new(FEE));
    let registry = EstateRegistry::new(
        Arc::clone(&ledger),
        Identity::new("heirloom-treasury"),
        params,
    );
    (registry, ledger)
}

fn create(registry: &EstateRegistry<MemoryLedger>, now: u64) -> EstateId {
    registry
        .create_estate(
            owner(),
            ContactHash::from_plain("owner@example.com"),
            30 * DAY,
            7 * DAY,
            Timestamp::new(now),
        )
        .unwrap()
}

fn heirs(shares: &[(&str, u16)]) -> Vec<Beneficiary> {
    shares
        .iter()
        .map(|(name, bps)| {
            Beneficiary::new(
                Identity::new(*name),
                ShareBps::new(*bps),
                *name,
                "heir",
                ContactHash::from_plain(name),
            )
        })
        .collect()
}

#[test]
fn creation_charges_fee_to_treasury() {
    let (registry, ledger) = setup();
    create(&registry, 0);

    let params = registry.params();
    assert_eq!(ledger.balance(&params.fee_asset, &owner()), Amount::ZERO);
    assert_eq!(
        ledger.balance(&params.fee_asset, &Identity::new("heirloom-treasury")),
        Amount::new(FEE)
    );
}

#[test]
fn creation_rejects_bad_periods_without_charging() {
    let (registry, ledger) = setup();
    let err = registry
        .create_estate(
            owner(),
            ContactHash::EMPTY,
            3600, // under the 24h floor
            7 * DAY,
            Timestamp::new(0),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        NodeError::Estate(EstateError::InvalidPeriod { name: "inactivity", .. })
    ));
    // Fee untouched.
    let params = registry.params();
    assert_eq!(ledger.balance(&params.fee_asset, &owner()), Amount::new(FEE));
}

#[test]
fn creation_fails_without_fee_funds() {
    let ledger = Arc::new(MemoryLedger::new());
    let registry = EstateRegistry::new(
        Arc::clone(&ledger),
        Identity::new("heirloom-treasury"),
        ProtocolParams::default(),
    );
    let err = registry
        .create_estate(
            Identity::new("pauper"),
            ContactHash::EMPTY,
            30 * DAY,
            7 * DAY,
            Timestamp::new(0),
        )
        .unwrap_err();
    assert!(matches!(err, NodeError::Ledger(_)));
    assert!(matches!(
        registry.lifecycle_state(EstateId::new(0), Timestamp::new(0)),
        Err(NodeError::UnknownEstate(_))
    ));
}

/// Scenario A: 30d inactivity + 7d grace, two beneficiaries at 60/40,
/// 37 days of silence, trigger, claim, double-claim rejection.
#[test]
fn thirty_seven_days_of_silence_distributes_the_estate() {
    let (registry, ledger) = setup();
    let estate = create(&registry, 0);

    registry
        .update_beneficiaries(
            estate,
            &owner(),
            heirs(&[("b1", 6000), ("b2", 4000)]),
            Timestamp::new(100),
        )
        .unwrap();

    ledger.mint(&usdq(), &Identity::new("donor"), Amount::new(1_000));
    registry
        .deposit(
            estate,
            &Identity::new("donor"),
            &usdq(),
            Amount::new(1_000),
            Timestamp::new(200),
        )
        .unwrap();

    // Too early: trigger refused, estate still in grace.
    let early = registry
        .trigger_inheritance(estate, &Identity::new("watcher"), Timestamp::new(36 * DAY))
        .unwrap_err();
    assert!(matches!(
        early,
        NodeError::Estate(EstateError::NotYetClaimable { .. })
    ));

    let now = Timestamp::new(37 * DAY);
    registry
        .trigger_inheritance(estate, &Identity::new("watcher"), now)
        .unwrap();
    assert_eq!(
        registry.lifecycle_state(estate, now).unwrap(),
        LifecycleState::Claimable
    );

    // Repeat triggers are harmless.
    registry
        .trigger_inheritance(estate, &Identity::new("watcher"), Timestamp::new(38 * DAY))
        .unwrap();

    let b1 = Identity::new("b1");
    let receipt = registry.claim(estate, &b1, now).unwrap();
    assert_eq!(receipt.transfers, vec![(usdq(), Amount::new(600))]);
    assert_eq!(ledger.balance(&usdq(), &b1), Amount::new(600));

    let double = registry.claim(estate, &b1, now).unwrap_err();
    assert!(matches!(
        double,
        NodeError::Estate(EstateError::AlreadyClaimed { .. })
    ));

    let b2 = Identity::new("b2");
    registry.claim(estate, &b2, now).unwrap();
    assert_eq!(ledger.balance(&usdq(), &b2), Amount::new(400));
    assert_eq!(
        registry.lifecycle_state(estate, now).unwrap(),
        LifecycleState::Distributed
    );
    assert_eq!(registry.estate_snapshot(estate).unwrap().estate_value, Amount::ZERO);
}

/// Scenario B: a rejected share list leaves the previous set untouched.
#[test]
fn invalid_share_sum_leaves_previous_set_unchanged() {
    let (registry, _) = setup();
    let estate = create(&registry, 0);

    registry
        .update_beneficiaries(estate, &owner(), heirs(&[("b1", 10_000)]), Timestamp::new(1))
        .unwrap();

    let err = registry
        .update_beneficiaries(
            estate,
            &owner(),
            heirs(&[("b1", 5000), ("b2", 3000)]),
            Timestamp::new(2),
        )
        .unwrap_err();
    assert!(matches!(err, NodeError::Estate(EstateError::InvalidShare(_))));

    let snapshot = registry.estate_snapshot(estate).unwrap();
    assert_eq!(snapshot.beneficiaries.len(), 1);
    assert_eq!(snapshot.beneficiaries[0].share, ShareBps::new(10_000));
}

#[test]
fn check_in_keeps_the_estate_alive_at_the_boundary() {
    let (registry, _) = setup();
    let estate = create(&registry, 0);

    // One second before inactivity expiry: still Active, check-in fine.
    let almost = Timestamp::new(30 * DAY - 1);
    assert_eq!(
        registry.lifecycle_state(estate, almost).unwrap(),
        LifecycleState::Active
    );
    registry.check_in(estate, &owner(), almost).unwrap();

    // The clock restarted: the old 37-day deadline no longer arms.
    assert!(registry
        .trigger_inheritance(estate, &owner(), Timestamp::new(37 * DAY))
        .is_err());
    // But the shifted deadline does, exactly on the boundary.
    registry
        .trigger_inheritance(estate, &owner(), Timestamp::new(30 * DAY - 1 + 37 * DAY))
        .unwrap();
}

#[test]
fn stranger_cannot_check_in_or_update_beneficiaries() {
    let (registry, _) = setup();
    let estate = create(&registry, 0);
    let mallory = Identity::new("mallory");

    assert!(matches!(
        registry.check_in(estate, &mallory, Timestamp::new(1)),
        Err(NodeError::Estate(EstateError::Unauthorized { .. }))
    ));
    assert!(matches!(
        registry.update_beneficiaries(estate, &mallory, heirs(&[("m", 10_000)]), Timestamp::new(1)),
        Err(NodeError::Estate(EstateError::Unauthorized { .. }))
    ));
}

#[test]
fn events_carry_actor_and_timestamp() {
    let ledger = Arc::new(MemoryLedger::new());
    let params = ProtocolParams::default();
    ledger.mint(&params.fee_asset, &owner(), Amount::new(FEE));
    let mut registry = EstateRegistry::new(
        Arc::clone(&ledger),
        Identity::new("heirloom-treasury"),
        params,
    );

    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    registry.subscribe(Box::new(move |event| {
        let name = match event {
            EstateEvent::EstateCreated { owner, at, .. } => {
                format!("created:{owner}:{at}")
            }
            EstateEvent::CheckedIn { owner, at, .. } => format!("checkin:{owner}:{at}"),
            EstateEvent::BeneficiariesUpdated { count, .. } => format!("heirs:{count}"),
            _ => return,
        };
        sink.lock().unwrap().push(name);
    }));

    let estate = create(&registry, 50);
    registry
        .check_in(estate, &owner(), Timestamp::new(60))
        .unwrap();
    registry
        .update_beneficiaries(estate, &owner(), heirs(&[("b1", 10_000)]), Timestamp::new(70))
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "created:owner:50s".to_string(),
            "checkin:owner:60s".to_string(),
            "heirs:1".to_string(),
        ]
    );
}

//! Registry snapshot persistence.
//!
//! The whole registry state (estates, committees, parameters, id counters)
//! serializes to one bincode blob. Event subscriptions are process-local and
//! are re-attached by the caller after a restore.

use crate::error::NodeError;
use crate::registry::EstateRegistry;
use heirloom_estate::Estate;
use heirloom_governance::GovernanceEngine;
use heirloom_ledger::Ledger;
use heirloom_types::{Identity, ProtocolParams};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Serializable image of the registry's durable state.
#[derive(Serialize, Deserialize)]
struct RegistrySnapshot {
    treasury: Identity,
    params: ProtocolParams,
    next_estate: u64,
    next_multisig: u64,
    estates: Vec<Estate>,
    engines: Vec<GovernanceEngine>,
}

impl<L: Ledger> EstateRegistry<L> {
    /// Serialize the registry's durable state to bytes.
    pub fn save_state(&self) -> Result<Vec<u8>, NodeError> {
        let snapshot = RegistrySnapshot {
            treasury: self.treasury.clone(),
            params: self.params.read().expect("params lock poisoned").clone(),
            next_estate: self.next_estate.load(Ordering::SeqCst),
            next_multisig: self.next_multisig.load(Ordering::SeqCst),
            estates: self
                .estates
                .read()
                .expect("estate arena poisoned")
                .values()
                .map(|e| e.lock().expect("estate mutex poisoned").clone())
                .collect(),
            engines: self
                .multisigs
                .read()
                .expect("multisig arena poisoned")
                .values()
                .map(|e| e.lock().expect("governance mutex poisoned").clone())
                .collect(),
        };
        bincode::serialize(&snapshot).map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    /// Restore a registry from bytes produced by [`save_state`].
    ///
    /// The ledger is external state and is supplied fresh by the caller.
    ///
    /// [`save_state`]: EstateRegistry::save_state
    pub fn load_state(data: &[u8], ledger: Arc<L>) -> Result<Self, NodeError> {
        let snapshot: RegistrySnapshot =
            bincode::deserialize(data).map_err(|e| NodeError::Snapshot(e.to_string()))?;

        let estates: HashMap<_, _> = snapshot
            .estates
            .into_iter()
            .map(|e| (e.id, Arc::new(Mutex::new(e))))
            .collect();
        let engines: HashMap<_, _> = snapshot
            .engines
            .into_iter()
            .map(|e| (e.multisig.id, Arc::new(Mutex::new(e))))
            .collect();

        let mut registry = Self::new(ledger, snapshot.treasury, snapshot.params);
        registry.estates = RwLock::new(estates);
        registry.multisigs = RwLock::new(engines);
        registry.next_estate = AtomicU64::new(snapshot.next_estate);
        registry.next_multisig = AtomicU64::new(snapshot.next_multisig);
        Ok(registry)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), NodeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.save_state()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path, ledger: Arc<L>) -> Result<Self, NodeError> {
        let data = std::fs::read(path)?;
        Self::load_state(&data, ledger)
    }
}

//! Real-world-asset records attached to an estate.
//!
//! RWAs are owner-curated metadata about off-ledger property (deeds,
//! vehicles, physical valuables). The core never values or transfers the
//! underlying asset — it tracks who the record points at. Removal is a soft
//! delete so beneficiaries can audit what once existed.

use crate::error::EstateError;
use heirloom_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rwa {
    /// Per-estate sequence number, never reused.
    pub number: u32,
    pub kind: String,
    pub name: String,
    pub description: String,
    /// Free-form appraisal, e.g. "USD 250000 (2025 appraisal)".
    pub appraised_value: String,
    pub metadata_uri: String,
    pub created_at: Timestamp,
    pub active: bool,
    /// Current record holder: the owner until a beneficiary takes it over
    /// post-claim.
    pub holder: Identity,
}

/// The estate's RWA registry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RwaRegistry {
    records: Vec<Rwa>,
    next_number: u32,
}

impl RwaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        holder: Identity,
        kind: String,
        name: String,
        description: String,
        appraised_value: String,
        metadata_uri: String,
        now: Timestamp,
    ) -> u32 {
        let number = self.next_number;
        self.next_number += 1;
        self.records.push(Rwa {
            number,
            kind,
            name,
            description,
            appraised_value,
            metadata_uri,
            created_at: now,
            active: true,
            holder,
        });
        number
    }

    /// Soft-delete a record.
    pub fn remove(&mut self, number: u32) -> Result<(), EstateError> {
        let rwa = self.get_mut(number)?;
        if !rwa.active {
            return Err(EstateError::RwaInactive { number });
        }
        rwa.active = false;
        Ok(())
    }

    /// Reassign an active record to a new holder.
    pub fn transfer(&mut self, number: u32, to: Identity) -> Result<(), EstateError> {
        let rwa = self.get_mut(number)?;
        if !rwa.active {
            return Err(EstateError::RwaInactive { number });
        }
        rwa.holder = to;
        Ok(())
    }

    pub fn get(&self, number: u32) -> Result<&Rwa, EstateError> {
        self.records
            .iter()
            .find(|r| r.number == number)
            .ok_or(EstateError::UnknownRwa { number })
    }

    fn get_mut(&mut self, number: u32) -> Result<&mut Rwa, EstateError> {
        self.records
            .iter_mut()
            .find(|r| r.number == number)
            .ok_or(EstateError::UnknownRwa { number })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rwa> {
        self.records.iter()
    }

    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|r| r.active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(registry: &mut RwaRegistry) -> u32 {
        registry.add(
            Identity::new("owner"),
            "realEstate".into(),
            "lake house".into(),
            "family property".into(),
            "USD 420000".into(),
            "ipfs://deed".into(),
            Timestamp::new(100),
        )
    }

    #[test]
    fn numbers_are_sequential_and_stable() {
        let mut registry = RwaRegistry::new();
        assert_eq!(add(&mut registry), 0);
        assert_eq!(add(&mut registry), 1);
        registry.remove(0).unwrap();
        // removal never frees a number
        assert_eq!(add(&mut registry), 2);
    }

    #[test]
    fn remove_is_soft_and_once() {
        let mut registry = RwaRegistry::new();
        let n = add(&mut registry);
        registry.remove(n).unwrap();
        assert_eq!(registry.active_count(), 0);
        assert!(registry.get(n).is_ok());
        assert!(matches!(
            registry.remove(n),
            Err(EstateError::RwaInactive { .. })
        ));
    }

    #[test]
    fn transfer_reassigns_holder() {
        let mut registry = RwaRegistry::new();
        let n = add(&mut registry);
        registry.transfer(n, Identity::new("heir")).unwrap();
        assert_eq!(registry.get(n).unwrap().holder, Identity::new("heir"));
    }

    #[test]
    fn unknown_number_reported() {
        let mut registry = RwaRegistry::new();
        assert!(matches!(
            registry.remove(7),
            Err(EstateError::UnknownRwa { number: 7 })
        ));
    }
}

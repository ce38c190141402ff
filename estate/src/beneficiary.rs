//! Beneficiaries and the share-sum invariant.
//!
//! An estate's beneficiary set is replaced wholesale or not at all: the
//! validation here runs before any mutation, so a rejected update leaves the
//! previous set untouched.

use crate::error::EstateError;
use heirloom_types::{ContactHash, Identity, ProtocolParams, ShareBps};
use serde::{Deserialize, Serialize};

/// One designated heir and their fixed share of the estate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Beneficiary {
    pub identity: Identity,
    pub share: ShareBps,
    /// Display metadata, opaque to the core.
    pub name: String,
    pub relationship: String,
    pub contact_hash: ContactHash,
    /// Flips false→true exactly once, at claim time.
    pub claimed: bool,
}

impl Beneficiary {
    pub fn new(
        identity: Identity,
        share: ShareBps,
        name: impl Into<String>,
        relationship: impl Into<String>,
        contact_hash: ContactHash,
    ) -> Self {
        Self {
            identity,
            share,
            name: name.into(),
            relationship: relationship.into(),
            contact_hash,
            claimed: false,
        }
    }
}

/// Validate a replacement beneficiary set against the protocol bounds.
///
/// Checks, in order: count bound, per-entry share range, duplicate
/// identities, and the exact-10000 share sum. An empty list is valid and
/// clears the set.
pub fn validate_set(list: &[Beneficiary], params: &ProtocolParams) -> Result<(), EstateError> {
    if list.len() > params.max_beneficiaries {
        return Err(EstateError::TooManyBeneficiaries {
            given: list.len(),
            max: params.max_beneficiaries,
        });
    }

    for b in list {
        if !b.share.is_valid() {
            return Err(EstateError::InvalidShare(format!(
                "share {} for {} outside 1..=10000",
                b.share, b.identity
            )));
        }
    }

    for (i, b) in list.iter().enumerate() {
        if list[..i].iter().any(|other| other.identity == b.identity) {
            return Err(EstateError::DuplicateBeneficiary {
                identity: b.identity.to_string(),
            });
        }
    }

    if !list.is_empty() {
        let total: u32 = list.iter().map(|b| u32::from(b.share.bps())).sum();
        if total != u32::from(ShareBps::FULL.bps()) {
            return Err(EstateError::InvalidShare(format!(
                "shares must sum to 10000 basis points, got {total}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beneficiary(name: &str, bps: u16) -> Beneficiary {
        Beneficiary::new(
            Identity::new(name),
            ShareBps::new(bps),
            name,
            "heir",
            ContactHash::from_plain(name),
        )
    }

    fn params() -> ProtocolParams {
        ProtocolParams::default()
    }

    #[test]
    fn accepts_exact_sum() {
        let list = vec![beneficiary("b1", 6000), beneficiary("b2", 4000)];
        assert!(validate_set(&list, &params()).is_ok());
    }

    #[test]
    fn rejects_partial_sum() {
        let list = vec![beneficiary("b1", 5000), beneficiary("b2", 3000)];
        let err = validate_set(&list, &params()).unwrap_err();
        assert!(matches!(err, EstateError::InvalidShare(_)));
    }

    #[test]
    fn rejects_oversubscription() {
        let list = vec![beneficiary("b1", 7000), beneficiary("b2", 4000)];
        assert!(matches!(
            validate_set(&list, &params()),
            Err(EstateError::InvalidShare(_))
        ));
    }

    #[test]
    fn rejects_zero_share_entry() {
        let list = vec![beneficiary("b1", 0), beneficiary("b2", 10_000)];
        assert!(matches!(
            validate_set(&list, &params()),
            Err(EstateError::InvalidShare(_))
        ));
    }

    #[test]
    fn rejects_eleven_beneficiaries() {
        let list: Vec<_> = (0..11).map(|i| beneficiary(&format!("b{i}"), 909)).collect();
        assert!(matches!(
            validate_set(&list, &params()),
            Err(EstateError::TooManyBeneficiaries { given: 11, max: 10 })
        ));
    }

    #[test]
    fn rejects_duplicate_identity() {
        let list = vec![beneficiary("b1", 5000), beneficiary("b1", 5000)];
        assert!(matches!(
            validate_set(&list, &params()),
            Err(EstateError::DuplicateBeneficiary { .. })
        ));
    }

    #[test]
    fn empty_set_is_valid() {
        assert!(validate_set(&[], &params()).is_ok());
    }
}

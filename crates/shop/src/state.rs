//! The combined shop snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSnapshot;
use crate::contact::ContactProfile;
use crate::ledger::GiftCardLedger;

/// Immutable snapshot of the catalog, the gift card ledger, and the contact
/// profile.
///
/// Snapshots are never mutated once shared. Each transition builds a new
/// `ShopState` that points at the previous subtrees it did not change, so
/// consumers can detect changes with [`Arc::ptr_eq`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopState {
    #[serde(default)]
    pub catalog: Arc<CatalogSnapshot>,
    #[serde(default)]
    pub gift_cards: Arc<GiftCardLedger>,
    #[serde(default)]
    pub contact: Arc<ContactProfile>,
}

impl ShopState {
    /// The empty snapshot a fresh install starts from.
    #[must_use]
    pub fn initial() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn with_catalog(&self, catalog: CatalogSnapshot) -> Arc<Self> {
        Arc::new(Self {
            catalog: Arc::new(catalog),
            gift_cards: Arc::clone(&self.gift_cards),
            contact: Arc::clone(&self.contact),
        })
    }

    #[must_use]
    pub fn with_gift_cards(&self, gift_cards: GiftCardLedger) -> Arc<Self> {
        Arc::new(Self {
            catalog: Arc::clone(&self.catalog),
            gift_cards: Arc::new(gift_cards),
            contact: Arc::clone(&self.contact),
        })
    }

    #[must_use]
    pub fn with_contact(&self, contact: ContactProfile) -> Arc<Self> {
        Arc::new(Self {
            catalog: Arc::clone(&self.catalog),
            gift_cards: Arc::clone(&self.gift_cards),
            contact: Arc::new(contact),
        })
    }
}

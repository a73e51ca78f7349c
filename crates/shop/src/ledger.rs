//! Gift card ledger: purchased cards partitioned by network.
//!
//! Every scoped operation returns `None` when it would not change the
//! partition, so callers can hand back the previous snapshot untouched. The
//! partition that an operation does not target is always shared by `Arc`.

use std::sync::Arc;

use giftshelf_core::{GiftCard, GiftCardStatus, GiftCardUpdate, InvoiceId, NetworkId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Purchased and pending gift cards, one ordered sequence per network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GiftCardLedger {
    #[serde(default)]
    pub main: Arc<Vec<GiftCard>>,
    #[serde(default)]
    pub test: Arc<Vec<GiftCard>>,
}

impl GiftCardLedger {
    /// Returns the partition for `network`.
    #[must_use]
    pub const fn partition(&self, network: NetworkId) -> &Arc<Vec<GiftCard>> {
        match network {
            NetworkId::Main => &self.main,
            NetworkId::Test => &self.test,
        }
    }

    /// Returns a ledger with `network`'s partition swapped for `cards`.
    #[must_use]
    pub fn with_partition(&self, network: NetworkId, cards: Vec<GiftCard>) -> Self {
        let cards = Arc::new(cards);
        match network {
            NetworkId::Main => Self {
                main: cards,
                test: Arc::clone(&self.test),
            },
            NetworkId::Test => Self {
                main: Arc::clone(&self.main),
                test: cards,
            },
        }
    }

    /// Append a freshly initiated purchase as `UNREDEEMED`.
    ///
    /// A card whose invoice id already exists in the partition is rejected so
    /// that invoice ids stay unique per network.
    #[must_use]
    pub fn initialize_unsold(&self, network: NetworkId, mut card: GiftCard) -> Option<Self> {
        let cards = self.partition(network);
        if cards.iter().any(|c| c.invoice_id == card.invoice_id) {
            warn!(
                %network,
                invoice_id = %card.invoice_id,
                "Ignoring unsold gift card with duplicate invoice id"
            );
            return None;
        }

        card.status = GiftCardStatus::Unredeemed;
        let mut next = Vec::with_capacity(cards.len() + 1);
        next.extend(cards.iter().cloned());
        next.push(card);
        Some(self.with_partition(network, next))
    }

    /// Replace the partition with an authoritative list.
    #[must_use]
    pub fn replace_all(&self, network: NetworkId, cards: Vec<GiftCard>) -> Self {
        self.with_partition(network, cards)
    }

    /// Drop every card still marked `UNREDEEMED`.
    #[must_use]
    pub fn delete_unsold(&self, network: NetworkId) -> Option<Self> {
        let cards = self.partition(network);
        if !cards.iter().any(|c| c.status.is_unredeemed()) {
            return None;
        }

        let kept: Vec<GiftCard> = cards
            .iter()
            .filter(|c| !c.status.is_unredeemed())
            .cloned()
            .collect();
        debug!(%network, removed = cards.len() - kept.len(), "Deleted unsold gift cards");
        Some(self.with_partition(network, kept))
    }

    /// Merge a redemption update into the card with the same invoice id.
    #[must_use]
    pub fn mark_redeemed(&self, network: NetworkId, update: &GiftCardUpdate) -> Option<Self> {
        self.update_card(network, &update.invoice_id, |stored| stored.merged_with(update))
    }

    /// Flip the archived flag relative to the caller's copy of the card.
    ///
    /// The new value is `!card.archived`, not the negation of the stored
    /// flag; callers pass the record as they saw it before toggling.
    #[must_use]
    pub fn toggle_archived(&self, network: NetworkId, card: &GiftCard) -> Option<Self> {
        let archived = !card.archived;
        self.update_card(network, &card.invoice_id, |stored| GiftCard {
            archived,
            ..stored.clone()
        })
    }

    /// Overwrite the status of one card.
    #[must_use]
    pub fn update_status(
        &self,
        network: NetworkId,
        invoice_id: &InvoiceId,
        status: GiftCardStatus,
    ) -> Option<Self> {
        self.update_card(network, invoice_id, |stored| GiftCard {
            status,
            ..stored.clone()
        })
    }

    /// Empty both partitions, whatever network is current.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Replace the first card matching `invoice_id` with `update(card)`.
    fn update_card(
        &self,
        network: NetworkId,
        invoice_id: &InvoiceId,
        update: impl FnOnce(&GiftCard) -> GiftCard,
    ) -> Option<Self> {
        let cards = self.partition(network);
        let Some(index) = cards.iter().position(|c| &c.invoice_id == invoice_id) else {
            debug!(%network, %invoice_id, "No gift card matches invoice id");
            return None;
        };

        let mut next = Vec::clone(cards);
        if let Some(slot) = next.get_mut(index) {
            let updated = update(slot);
            *slot = updated;
        }
        Some(self.with_partition(network, next))
    }
}

//! Read-only queries over a snapshot, for rendering and lookups.

use std::collections::{BTreeMap, BTreeSet};

use giftshelf_core::{CardConfig, GiftCard, InvoiceId, NetworkId};

use crate::state::ShopState;

/// Category name to "selected" flag, as driven by a filter sheet.
pub type CategorySelection = BTreeMap<String, bool>;

impl ShopState {
    /// Every card in `network`'s partition, in insertion order.
    #[must_use]
    pub fn gift_cards(&self, network: NetworkId) -> &[GiftCard] {
        self.gift_cards.partition(network)
    }

    /// Cards shown by default (not archived).
    pub fn active_gift_cards(&self, network: NetworkId) -> impl Iterator<Item = &GiftCard> {
        self.gift_cards(network).iter().filter(|c| !c.archived)
    }

    pub fn archived_gift_cards(&self, network: NetworkId) -> impl Iterator<Item = &GiftCard> {
        self.gift_cards(network).iter().filter(|c| c.archived)
    }

    /// Purchases that were initiated but never confirmed.
    pub fn unsold_gift_cards(&self, network: NetworkId) -> impl Iterator<Item = &GiftCard> {
        self.gift_cards(network)
            .iter()
            .filter(|c| c.status.is_unredeemed())
    }

    #[must_use]
    pub fn find_gift_card(&self, network: NetworkId, invoice_id: &InvoiceId) -> Option<&GiftCard> {
        self.gift_cards(network)
            .iter()
            .find(|c| &c.invoice_id == invoice_id)
    }

    /// Catalog entry backing `gift_card`.
    ///
    /// Resolved against the supported map, so cards from brands that have
    /// since left the catalog still resolve.
    #[must_use]
    pub fn card_config_for(&self, gift_card: &GiftCard) -> Option<&CardConfig> {
        self.catalog.supported_card_map.get(&gift_card.name)
    }

    /// Purchasable brands, hidden ones excluded, sorted by display name.
    #[must_use]
    pub fn available_cards_sorted(&self) -> Vec<&CardConfig> {
        let mut cards: Vec<&CardConfig> = self
            .catalog
            .available_card_map
            .values()
            .filter(|c| !c.hidden)
            .collect();
        cards.sort_by_cached_key(|c| c.display_name.to_lowercase());
        cards
    }

    /// Brands of a curation in curation order.
    ///
    /// Brands that are not currently available are skipped.
    #[must_use]
    pub fn curated_cards(&self, curation: &str) -> Vec<&CardConfig> {
        let catalog = &self.catalog;
        catalog
            .categories_and_curations
            .curated
            .get(curation)
            .map(|c| {
                c.gift_cards
                    .iter()
                    .filter_map(|brand| catalog.available_card_map.get(brand))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Initial filter selection: every category, none selected.
    #[must_use]
    pub fn category_filter(&self) -> CategorySelection {
        self.catalog
            .categories_and_curations
            .categories
            .keys()
            .map(|name| (name.clone(), false))
            .collect()
    }

    /// Available brands matching any selected category.
    ///
    /// A brand matches a category when they share at least one tag. With no
    /// category selected, every visible brand matches.
    #[must_use]
    pub fn cards_in_categories(&self, selection: &CategorySelection) -> Vec<&CardConfig> {
        let categories = &self.catalog.categories_and_curations.categories;
        let tags: BTreeSet<&str> = selection
            .iter()
            .filter(|(_, selected)| **selected)
            .filter_map(|(name, _)| categories.get(name))
            .flat_map(|category| category.tags.iter().map(String::as_str))
            .collect();

        let any_selected = selection.values().any(|selected| *selected);
        self.available_cards_sorted()
            .into_iter()
            .filter(|card| !any_selected || card.tags.iter().any(|t| tags.contains(t.as_str())))
            .collect()
    }
}

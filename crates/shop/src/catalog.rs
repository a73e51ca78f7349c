//! Catalog store: the latest fetched catalog plus every brand ever seen.

use std::sync::Arc;

use giftshelf_core::{CardConfigMap, CatalogPayload, CategoriesAndCurations, DirectIntegrationMap};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Catalog portion of the shop snapshot.
///
/// `available_card_map` is what the most recent fetch returned.
/// `supported_card_map` only grows: a brand dropped from the catalog may
/// still back a card the user owns and has to stay displayable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub available_card_map: Arc<CardConfigMap>,
    pub supported_card_map: Arc<CardConfigMap>,
    pub categories_and_curations: Arc<CategoriesAndCurations>,
    pub integrations: Arc<DirectIntegrationMap>,
}

impl CatalogSnapshot {
    /// Apply a successful catalog fetch.
    ///
    /// Everything except the supported map is replaced wholesale. The
    /// supported map becomes the key-wise union of its previous contents and
    /// the new available map, with the fetched entry winning per brand.
    #[must_use]
    pub fn apply_fetch(&self, payload: CatalogPayload) -> Self {
        let CatalogPayload {
            available_card_map,
            categories_and_curations,
            integrations,
        } = payload;

        let mut supported = CardConfigMap::clone(&self.supported_card_map);
        let before = supported.len();
        supported.extend(
            available_card_map
                .iter()
                .map(|(brand, config)| (brand.clone(), config.clone())),
        );

        info!(
            available = available_card_map.len(),
            supported = supported.len(),
            new_brands = supported.len() - before,
            "Applied catalog fetch"
        );

        Self {
            available_card_map: Arc::new(available_card_map),
            supported_card_map: Arc::new(supported),
            categories_and_curations: Arc::new(categories_and_curations),
            integrations: Arc::new(integrations),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use giftshelf_core::BrandName;

    use super::*;
    use crate::fixtures::{card_config, catalog};

    #[test]
    fn test_fetch_replaces_available_and_merges_supported() {
        let first = CatalogSnapshot::default().apply_fetch(catalog(&["Amazon.com", "Target"]));
        let second = first.apply_fetch(catalog(&["Target", "Uber"]));

        let available: Vec<_> = second.available_card_map.keys().map(BrandName::as_str).collect();
        assert_eq!(available, ["Target", "Uber"]);

        let supported: Vec<_> = second.supported_card_map.keys().map(BrandName::as_str).collect();
        assert_eq!(supported, ["Amazon.com", "Target", "Uber"]);
    }

    #[test]
    fn test_latest_entry_wins_per_brand() {
        let first = CatalogSnapshot::default().apply_fetch(catalog(&["Target"]));

        let mut updated = card_config("Target");
        updated.display_name = "Target (new)".to_owned();
        let mut payload = CatalogPayload::default();
        payload
            .available_card_map
            .insert(BrandName::new("Target"), updated);

        let second = first.apply_fetch(payload);
        assert_eq!(
            second.supported_card_map.get("Target").unwrap().display_name,
            "Target (new)"
        );
    }

    #[test]
    fn test_empty_fetch_keeps_supported() {
        let first = CatalogSnapshot::default().apply_fetch(catalog(&["Amazon.com"]));
        let second = first.apply_fetch(CatalogPayload::default());

        assert!(second.available_card_map.is_empty());
        assert!(second.supported_card_map.contains_key("Amazon.com"));
    }
}

//! Snapshots surviving a save and reload.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use giftshelf_core::{GiftCardStatus, InvoiceId, NetworkId, PhoneCountryInfo};
use giftshelf_integration_tests::{catalog, gift_card};
use giftshelf_shop::{PersistError, ShopAction, ShopReducer, ShopState, ShopStore, persist};

// =============================================================================
// Round Trip
// =============================================================================

#[tokio::test]
async fn test_full_session_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.json");

    let mut store = ShopStore::new(ShopReducer::new(NetworkId::Test), ShopState::initial());
    store.dispatch(ShopAction::CatalogFetched(catalog(&["Amazon.com", "Target"])));
    store.dispatch(ShopAction::CatalogFetched(catalog(&["Target"])));
    store.dispatch(ShopAction::UnsoldCardInitialized {
        gift_card: gift_card("inv-1", GiftCardStatus::Unredeemed),
    });
    store.dispatch(ShopAction::CardStatusUpdated {
        invoice_id: InvoiceId::new("inv-1"),
        status: GiftCardStatus::from("SYNCING"),
    });
    store.dispatch(ShopAction::PhoneUpdated {
        phone: "5551234567".to_owned(),
        phone_country_info: PhoneCountryInfo::new("1", "US"),
    });
    let saved = store.snapshot();

    persist::save(&path, &saved).await.unwrap();
    let loaded = persist::load(&path).await.unwrap();

    assert_eq!(*loaded, *saved);
    assert!(loaded.catalog.supported_card_map.contains_key("Amazon.com"));
    assert!(!loaded.catalog.available_card_map.contains_key("Amazon.com"));
    assert_eq!(
        loaded
            .find_gift_card(NetworkId::Test, &InvoiceId::new("inv-1"))
            .unwrap()
            .status
            .as_str(),
        "SYNCING"
    );
    assert!(loaded.gift_cards(NetworkId::Main).is_empty());
}

#[tokio::test]
async fn test_reloaded_store_keeps_dispatching() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.json");

    let mut store = ShopStore::new(ShopReducer::new(NetworkId::Main), ShopState::initial());
    store.dispatch(ShopAction::UnsoldCardInitialized {
        gift_card: gift_card("inv-1", GiftCardStatus::Unredeemed),
    });
    persist::save(&path, &store.snapshot()).await.unwrap();

    let mut reopened = ShopStore::new(
        ShopReducer::new(NetworkId::Main),
        persist::load(&path).await.unwrap(),
    );
    let before = reopened.snapshot();
    let after = reopened.dispatch(ShopAction::UnsoldCardsDeleted);

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(after.gift_cards(NetworkId::Main).is_empty());
}

// =============================================================================
// Failure Modes
// =============================================================================

#[tokio::test]
async fn test_missing_snapshot_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let state = persist::load(&dir.path().join("nothing-here.json"))
        .await
        .unwrap();
    assert_eq!(*state, ShopState::default());
}

#[tokio::test]
async fn test_corrupt_snapshot_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.json");
    tokio::fs::write(&path, b"{not json").await.unwrap();

    let err = persist::load(&path).await.unwrap_err();
    assert!(matches!(err, PersistError::Json { .. }));
}

#[tokio::test]
async fn test_newer_snapshot_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.json");
    let doc = serde_json::json!({
        "version": persist::SNAPSHOT_VERSION + 1,
        "state": ShopState::default(),
    });
    tokio::fs::write(&path, serde_json::to_vec(&doc).unwrap())
        .await
        .unwrap();

    let err = persist::load(&path).await.unwrap_err();
    assert!(matches!(err, PersistError::UnsupportedVersion { found } if found == 2));
}

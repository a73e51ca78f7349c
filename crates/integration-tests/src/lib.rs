//! Integration tests for Giftshelf.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p giftshelf-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop_properties` - Reducer invariants across whole action sequences
//! - `shop_persistence` - Snapshots surviving a save and reload
//!
//! Shared builders live here so every test file constructs cards and
//! catalogs the same way.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use giftshelf_core::{
    BrandName, CardConfig, CatalogPayload, GiftCard, GiftCardStatus, InvoiceId,
};
use rust_decimal::Decimal;
use serde_json::json;

/// A catalog entry selling 1 to 500 USD.
#[must_use]
pub fn card_config(brand: &str) -> CardConfig {
    serde_json::from_value(json!({
        "name": brand,
        "displayName": brand,
        "currency": "USD",
        "minAmount": 1,
        "maxAmount": 500,
    }))
    .unwrap()
}

/// A fetched catalog listing `brands`.
#[must_use]
pub fn catalog(brands: &[&str]) -> CatalogPayload {
    CatalogPayload {
        available_card_map: brands
            .iter()
            .map(|b| (BrandName::new(*b), card_config(b)))
            .collect(),
        ..CatalogPayload::default()
    }
}

/// A 25 USD Amazon.com card.
#[must_use]
pub fn gift_card(invoice_id: &str, status: GiftCardStatus) -> GiftCard {
    let mut card = GiftCard::unsold(
        InvoiceId::new(invoice_id),
        BrandName::new("Amazon.com"),
        Decimal::from(25),
        "USD",
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    );
    card.status = status;
    card
}

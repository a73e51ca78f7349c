//! Builders shared by the unit tests.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use giftshelf_core::{
    BrandName, CardConfig, CatalogPayload, GiftCard, GiftCardStatus, InvoiceId,
};
use rust_decimal::Decimal;

pub fn card_config(brand: &str) -> CardConfig {
    CardConfig {
        name: BrandName::new(brand),
        display_name: brand.to_owned(),
        currency: "USD".to_owned(),
        supported_amounts: None,
        min_amount: Some(Decimal::ONE),
        max_amount: Some(Decimal::from(500)),
        description: None,
        terms: None,
        redeem_instructions: None,
        redeem_url: None,
        website: None,
        card_image: None,
        icon: None,
        brand_color: None,
        hidden: false,
        featured: false,
        email_required: false,
        phone_required: false,
        tags: Vec::new(),
    }
}

pub fn catalog(brands: &[&str]) -> CatalogPayload {
    let mut payload = CatalogPayload::default();
    for brand in brands {
        payload
            .available_card_map
            .insert(BrandName::new(*brand), card_config(brand));
    }
    payload
}

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

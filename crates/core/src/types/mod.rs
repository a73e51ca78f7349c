//! Core types for Giftshelf.
//!
//! This module provides type-safe wrappers for the gift-card domain.

pub mod catalog;
pub mod contact;
pub mod gift_card;
pub mod id;
pub mod network;
pub mod status;

pub use catalog::{
    CardConfig, CardConfigMap, CatalogPayload, CategoriesAndCurations, Category, Curation,
    Denominations, DirectIntegration, DirectIntegrationMap,
};
pub use contact::{ContactError, Email, PhoneCountryInfo, PhoneNumber};
pub use gift_card::{GiftCard, GiftCardUpdate};
pub use id::*;
pub use network::{NetworkId, ParseNetworkError};
pub use status::GiftCardStatus;

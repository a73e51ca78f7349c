//! Gift-card catalog types.
//!
//! These mirror the payload the catalog fetch collaborator hands over after a
//! successful fetch. Field names follow the service's camelCase JSON.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::BrandName;

/// Catalog entries keyed by brand.
pub type CardConfigMap = BTreeMap<BrandName, CardConfig>;

/// Direct-merchant integrations keyed by merchant name.
pub type DirectIntegrationMap = BTreeMap<String, DirectIntegration>;

/// One purchasable gift-card brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    /// Brand key, identical to the key this entry is stored under.
    pub name: BrandName,
    /// Human-facing brand name.
    pub display_name: String,
    /// ISO 4217 currency the card is denominated in.
    pub currency: String,
    /// Fixed denominations, if the brand only sells set amounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_amounts: Option<Vec<Decimal>>,
    /// Lower bound for variable-amount brands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    /// Upper bound for variable-amount brands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    /// Hidden brands stay resolvable for owned cards but are not listed.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub email_required: bool,
    #[serde(default)]
    pub phone_required: bool,
    /// Catalog tags used by category filters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// The amounts a brand can be purchased in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denominations {
    /// Only these exact amounts.
    Fixed(Vec<Decimal>),
    /// Any amount within the inclusive range.
    Range { min: Decimal, max: Decimal },
    /// The catalog entry carries no usable amount information.
    Unspecified,
}

impl CardConfig {
    /// Returns the purchasable amounts for this brand.
    ///
    /// Fixed amounts take precedence over a range when the service sends both.
    #[must_use]
    pub fn denominations(&self) -> Denominations {
        match (&self.supported_amounts, self.min_amount, self.max_amount) {
            (Some(amounts), _, _) if !amounts.is_empty() => Denominations::Fixed(amounts.clone()),
            (_, Some(min), Some(max)) if min <= max => Denominations::Range { min, max },
            _ => Denominations::Unspecified,
        }
    }

    /// Whether `amount` can be purchased for this brand.
    #[must_use]
    pub fn accepts_amount(&self, amount: Decimal) -> bool {
        match self.denominations() {
            Denominations::Fixed(amounts) => amounts.contains(&amount),
            Denominations::Range { min, max } => (min..=max).contains(&amount),
            Denominations::Unspecified => false,
        }
    }
}

/// A hand-picked list of brands shown together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curation {
    pub display_name: String,
    /// Brands in display order.
    #[serde(default)]
    pub gift_cards: Vec<BrandName>,
    #[serde(default)]
    pub index: u32,
}

/// A browsing category, matched against brand tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Browsing metadata, replaced wholesale on every catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesAndCurations {
    #[serde(default)]
    pub curated: BTreeMap<String, Curation>,
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
}

/// A merchant that accepts payment directly instead of through a gift card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectIntegration {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub display_categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parsed result of a successful catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPayload {
    #[serde(default)]
    pub available_card_map: CardConfigMap,
    #[serde(default)]
    pub categories_and_curations: CategoriesAndCurations,
    #[serde(default)]
    pub integrations: DirectIntegrationMap,
}

//! Actions accepted by the shop reducer.
//!
//! On the wire an action is `{"type": "KIND", "payload": {...}}`. Any `type`
//! this crate does not know deserializes to [`ShopAction::Unrecognized`], so
//! actions meant for other parts of an application can flow through the
//! reducer unchanged.

use giftshelf_core::{
    CatalogPayload, GiftCard, GiftCardStatus, GiftCardUpdate, InvoiceId, PhoneCountryInfo,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum ShopAction {
    /// A catalog fetch succeeded.
    CatalogFetched(CatalogPayload),
    /// A purchase was initiated; the card is pending until confirmed.
    #[serde(rename_all = "camelCase")]
    UnsoldCardInitialized { gift_card: GiftCard },
    /// The purchased-card list was resynced from the server.
    #[serde(rename_all = "camelCase")]
    PurchasedCardsSet { gift_cards: Vec<GiftCard> },
    /// Clean up purchases that were never confirmed.
    UnsoldCardsDeleted,
    /// Fields missing from `gift_card` keep their stored values.
    #[serde(rename_all = "camelCase")]
    CardRedeemed { gift_card: GiftCardUpdate },
    /// `gift_card` is the record as the caller saw it before toggling.
    #[serde(rename_all = "camelCase")]
    CardArchiveToggled { gift_card: GiftCard },
    EmailUpdated { email: String },
    #[serde(rename_all = "camelCase")]
    CardStatusUpdated {
        invoice_id: InvoiceId,
        status: GiftCardStatus,
    },
    #[serde(rename_all = "camelCase")]
    PhoneUpdated {
        phone: String,
        phone_country_info: PhoneCountryInfo,
    },
    /// Wipe both network partitions.
    CardsCleared,
    /// Any action kind that belongs to someone else.
    #[serde(other)]
    Unrecognized,
}

impl ShopAction {
    /// Every action kind this reducer handles.
    pub const KINDS: [&'static str; 10] = [
        "CATALOG_FETCHED",
        "UNSOLD_CARD_INITIALIZED",
        "PURCHASED_CARDS_SET",
        "UNSOLD_CARDS_DELETED",
        "CARD_REDEEMED",
        "CARD_ARCHIVE_TOGGLED",
        "EMAIL_UPDATED",
        "CARD_STATUS_UPDATED",
        "PHONE_UPDATED",
        "CARDS_CLEARED",
    ];

    /// Decode an action from an application-wide action value.
    ///
    /// Unlike plain deserialization this also accepts foreign actions that
    /// carry a payload, mapping them to [`ShopAction::Unrecognized`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no string `type`, or if the kind is
    /// one of [`Self::KINDS`] and its payload does not match.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            _kind: String,
        }

        let known = value
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|kind| Self::KINDS.contains(&kind));
        if known {
            serde_json::from_value(value)
        } else {
            serde_json::from_value::<Tagged>(value).map(|_| Self::Unrecognized)
        }
    }

    /// Wire name of the action kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CatalogFetched(_) => "CATALOG_FETCHED",
            Self::UnsoldCardInitialized { .. } => "UNSOLD_CARD_INITIALIZED",
            Self::PurchasedCardsSet { .. } => "PURCHASED_CARDS_SET",
            Self::UnsoldCardsDeleted => "UNSOLD_CARDS_DELETED",
            Self::CardRedeemed { .. } => "CARD_REDEEMED",
            Self::CardArchiveToggled { .. } => "CARD_ARCHIVE_TOGGLED",
            Self::EmailUpdated { .. } => "EMAIL_UPDATED",
            Self::CardStatusUpdated { .. } => "CARD_STATUS_UPDATED",
            Self::PhoneUpdated { .. } => "PHONE_UPDATED",
            Self::CardsCleared => "CARDS_CLEARED",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Whether the action is applied to the current network's partition.
    #[must_use]
    pub const fn is_network_scoped(&self) -> bool {
        matches!(
            self,
            Self::UnsoldCardInitialized { .. }
                | Self::PurchasedCardsSet { .. }
                | Self::UnsoldCardsDeleted
                | Self::CardRedeemed { .. }
                | Self::CardArchiveToggled { .. }
                | Self::CardStatusUpdated { .. }
        )
    }
}

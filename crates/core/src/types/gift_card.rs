//! Purchased gift-card records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{BrandName, InvoiceId};
use super::status::GiftCardStatus;

/// A gift card the user purchased, or started purchasing.
///
/// The ledger only interprets `invoice_id`, `status`, and `archived`. Every
/// other field is payload carried through unchanged, including fields the
/// redemption service adds that this type does not model (kept in `extra`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCard {
    pub invoice_id: InvoiceId,
    /// Brand this card was bought from; resolves against the supported catalog.
    pub name: BrandName,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub status: GiftCardStatus,
    #[serde(default)]
    pub archived: bool,
    /// When the purchase was initiated.
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GiftCard {
    /// Create a pending purchase for `brand`.
    #[must_use]
    pub fn unsold(
        invoice_id: InvoiceId,
        brand: BrandName,
        amount: Decimal,
        currency: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            invoice_id,
            name: brand,
            amount,
            currency: currency.into(),
            status: GiftCardStatus::Unredeemed,
            archived: false,
            date,
            claim_code: None,
            claim_link: None,
            pin: None,
            barcode_data: None,
            barcode_format: None,
            invoice_url: None,
            total_discount: None,
            extra: Map::new(),
        }
    }

    /// Overwrite this record with every field `incoming` carries.
    ///
    /// Fields absent from `incoming` keep their stored values, so a
    /// redemption update that omits `archived` or the invoice URL leaves them
    /// as they were. Extra fields merge key-wise.
    #[must_use]
    pub fn merged_with(&self, incoming: &GiftCardUpdate) -> Self {
        let mut extra = self.extra.clone();
        extra.extend(incoming.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            invoice_id: self.invoice_id.clone(),
            name: incoming.name.clone().unwrap_or_else(|| self.name.clone()),
            amount: incoming.amount.unwrap_or(self.amount),
            currency: incoming.currency.clone().unwrap_or_else(|| self.currency.clone()),
            status: incoming.status.clone().unwrap_or_else(|| self.status.clone()),
            archived: incoming.archived.unwrap_or(self.archived),
            date: incoming.date.unwrap_or(self.date),
            claim_code: pick(incoming.claim_code.as_ref(), self.claim_code.as_ref()),
            claim_link: pick(incoming.claim_link.as_ref(), self.claim_link.as_ref()),
            pin: pick(incoming.pin.as_ref(), self.pin.as_ref()),
            barcode_data: pick(incoming.barcode_data.as_ref(), self.barcode_data.as_ref()),
            barcode_format: pick(incoming.barcode_format.as_ref(), self.barcode_format.as_ref()),
            invoice_url: pick(incoming.invoice_url.as_ref(), self.invoice_url.as_ref()),
            total_discount: incoming.total_discount.or(self.total_discount),
            extra,
        }
    }
}

/// A partial gift-card record, as sent by the redemption service.
///
/// Only `invoice_id` is required. Every other field is applied by
/// [`GiftCard::merged_with`] when present and ignored when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardUpdate {
    pub invoice_id: InvoiceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<BrandName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GiftCardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GiftCardUpdate {
    /// An update that changes nothing but names its card.
    #[must_use]
    pub fn new(invoice_id: InvoiceId) -> Self {
        Self {
            invoice_id,
            name: None,
            amount: None,
            currency: None,
            status: None,
            archived: None,
            date: None,
            claim_code: None,
            claim_link: None,
            pin: None,
            barcode_data: None,
            barcode_format: None,
            invoice_url: None,
            total_discount: None,
            extra: Map::new(),
        }
    }
}

impl From<GiftCard> for GiftCardUpdate {
    fn from(card: GiftCard) -> Self {
        Self {
            invoice_id: card.invoice_id,
            name: Some(card.name),
            amount: Some(card.amount),
            currency: Some(card.currency),
            status: Some(card.status),
            archived: Some(card.archived),
            date: Some(card.date),
            claim_code: card.claim_code,
            claim_link: card.claim_link,
            pin: card.pin,
            barcode_data: card.barcode_data,
            barcode_format: card.barcode_format,
            invoice_url: card.invoice_url,
            total_discount: card.total_discount,
            extra: card.extra,
        }
    }
}

fn pick(incoming: Option<&String>, stored: Option<&String>) -> Option<String> {
    incoming.or(stored).cloned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn card(value: serde_json::Value) -> GiftCard {
        serde_json::from_value(value).unwrap()
    }

    fn update(value: serde_json::Value) -> GiftCardUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_defaults_status_and_archived() {
        let gc = card(json!({
            "invoiceId": "inv_1",
            "name": "Amazon.com",
            "amount": 25,
            "currency": "USD",
            "date": "2024-01-01T00:00:00Z"
        }));
        assert_eq!(gc.status, GiftCardStatus::Unredeemed);
        assert!(!gc.archived);
        assert!(gc.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let gc = card(json!({
            "invoiceId": "inv_1",
            "name": "Amazon.com",
            "amount": 25,
            "currency": "USD",
            "date": "2024-01-01T00:00:00Z",
            "accessKey": "abc",
            "userEid": "eid_9"
        }));
        assert_eq!(gc.extra.get("accessKey"), Some(&json!("abc")));

        let value = serde_json::to_value(&gc).unwrap();
        assert_eq!(value["userEid"], json!("eid_9"));
        assert_eq!(value["invoiceId"], json!("inv_1"));
    }

    #[test]
    fn test_merge_keeps_fields_absent_from_incoming() {
        let mut stored = card(json!({
            "invoiceId": "inv_1",
            "name": "Amazon.com",
            "amount": 25,
            "currency": "USD",
            "date": "2024-01-01T00:00:00Z",
            "invoiceUrl": "https://example.test/i/inv_1",
            "clientId": "c1"
        }));
        stored.archived = true;

        let incoming = update(json!({
            "invoiceId": "inv_1",
            "status": "REDEEMED",
            "claimCode": "AAAA-BBBB",
            "clientId": "c2"
        }));

        let merged = stored.merged_with(&incoming);
        assert_eq!(merged.status, GiftCardStatus::Redeemed);
        assert_eq!(merged.claim_code.as_deref(), Some("AAAA-BBBB"));
        assert_eq!(
            merged.invoice_url.as_deref(),
            Some("https://example.test/i/inv_1")
        );
        assert_eq!(merged.extra.get("clientId"), Some(&json!("c2")));
        assert!(merged.archived);
    }

    #[test]
    fn test_merge_without_status_or_archived_keeps_stored_flags() {
        let mut stored = card(json!({
            "invoiceId": "inv_1",
            "name": "Amazon.com",
            "amount": 25,
            "currency": "USD",
            "date": "2024-01-01T00:00:00Z",
            "status": "REDEEMED"
        }));
        stored.archived = true;

        let merged = stored.merged_with(&update(json!({
            "invoiceId": "inv_1",
            "claimCode": "NEW"
        })));

        assert!(merged.archived);
        assert_eq!(merged.status, GiftCardStatus::Redeemed);
        assert_eq!(merged.claim_code.as_deref(), Some("NEW"));
        assert_eq!(merged.amount, Decimal::from(25));
    }

    #[test]
    fn test_full_record_update_overwrites_flags() {
        let stored = card(json!({
            "invoiceId": "inv_1",
            "name": "Amazon.com",
            "amount": 25,
            "currency": "USD",
            "date": "2024-01-01T00:00:00Z"
        }));
        let mut incoming = stored.clone();
        incoming.status = GiftCardStatus::Redeemed;
        incoming.archived = true;

        let merged = stored.merged_with(&GiftCardUpdate::from(incoming.clone()));
        assert_eq!(merged, incoming);
    }
}

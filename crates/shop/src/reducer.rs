//! Lifecycle reducer: `(state, action) -> state`.

use std::sync::Arc;

use giftshelf_core::NetworkId;

use crate::action::ShopAction;
use crate::ledger::GiftCardLedger;
use crate::state::ShopState;

/// Applies [`ShopAction`]s to [`ShopState`] snapshots.
///
/// The reducer is pure and total: it never fails, never performs I/O, and
/// returns the input snapshot itself whenever an action changes nothing.
/// Ledger actions are scoped to the network the reducer was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShopReducer {
    network: NetworkId,
}

impl ShopReducer {
    #[must_use]
    pub const fn new(network: NetworkId) -> Self {
        Self { network }
    }

    /// The network scoped ledger actions are applied to.
    #[must_use]
    pub const fn network(&self) -> NetworkId {
        self.network
    }

    /// Produce the snapshot that follows `state` under `action`.
    #[must_use]
    pub fn reduce(&self, state: &Arc<ShopState>, action: ShopAction) -> Arc<ShopState> {
        let network = self.network;
        let ledger = &state.gift_cards;

        match action {
            ShopAction::CatalogFetched(payload) => {
                state.with_catalog(state.catalog.apply_fetch(payload))
            }
            ShopAction::UnsoldCardInitialized { gift_card } => {
                with_ledger(state, ledger.initialize_unsold(network, gift_card))
            }
            ShopAction::PurchasedCardsSet { gift_cards } => {
                state.with_gift_cards(ledger.replace_all(network, gift_cards))
            }
            ShopAction::UnsoldCardsDeleted => with_ledger(state, ledger.delete_unsold(network)),
            ShopAction::CardRedeemed { gift_card } => {
                with_ledger(state, ledger.mark_redeemed(network, &gift_card))
            }
            ShopAction::CardArchiveToggled { gift_card } => {
                with_ledger(state, ledger.toggle_archived(network, &gift_card))
            }
            ShopAction::CardStatusUpdated { invoice_id, status } => {
                with_ledger(state, ledger.update_status(network, &invoice_id, status))
            }
            ShopAction::CardsCleared => state.with_gift_cards(GiftCardLedger::cleared()),
            ShopAction::EmailUpdated { email } => state.with_contact(state.contact.with_email(email)),
            ShopAction::PhoneUpdated {
                phone,
                phone_country_info,
            } => state.with_contact(state.contact.with_phone(phone, phone_country_info)),
            ShopAction::Unrecognized => Arc::clone(state),
        }
    }
}

fn with_ledger(state: &Arc<ShopState>, ledger: Option<GiftCardLedger>) -> Arc<ShopState> {
    ledger.map_or_else(|| Arc::clone(state), |ledger| state.with_gift_cards(ledger))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use giftshelf_core::{GiftCard, GiftCardStatus, InvoiceId, PhoneCountryInfo};

    use super::*;
    use crate::fixtures::{catalog, gift_card};

    fn seeded(reducer: ShopReducer) -> Arc<ShopState> {
        let state = ShopState::initial();
        let state = reducer.reduce(&state, ShopAction::CatalogFetched(catalog(&["Amazon.com"])));
        let state = reducer.reduce(
            &state,
            ShopAction::PurchasedCardsSet {
                gift_cards: vec![
                    gift_card("a", GiftCardStatus::Unredeemed),
                    gift_card("b", GiftCardStatus::Unredeemed),
                ],
            },
        );
        ShopReducer::new(NetworkId::Test).reduce(
            &state,
            ShopAction::PurchasedCardsSet {
                gift_cards: vec![gift_card("t", GiftCardStatus::Unredeemed)],
            },
        )
    }

    #[test]
    fn test_unrecognized_returns_same_reference() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let state = seeded(reducer);
        let next = reducer.reduce(&state, ShopAction::Unrecognized);
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_catalog_fetch_shares_ledger_and_contact() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let state = seeded(reducer);
        let next = reducer.reduce(&state, ShopAction::CatalogFetched(catalog(&["Target"])));

        assert!(Arc::ptr_eq(&state.gift_cards, &next.gift_cards));
        assert!(Arc::ptr_eq(&state.contact, &next.contact));
        assert!(next.catalog.supported_card_map.contains_key("Amazon.com"));
    }

    #[test]
    fn test_redeem_changes_only_target_card_on_current_network() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let state = seeded(reducer);
        let next = reducer.reduce(
            &state,
            ShopAction::CardRedeemed {
                gift_card: gift_card("b", GiftCardStatus::Redeemed).into(),
            },
        );

        let main = &next.gift_cards.main;
        assert_eq!(main[0].status, GiftCardStatus::Unredeemed);
        assert_eq!(main[1].status, GiftCardStatus::Redeemed);
        assert!(Arc::ptr_eq(&state.gift_cards.test, &next.gift_cards.test));
        assert!(Arc::ptr_eq(&state.catalog, &next.catalog));
    }

    #[test]
    fn test_redeem_payload_without_flags_keeps_owned_card() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let mut owned = gift_card("a", GiftCardStatus::Redeemed);
        owned.archived = true;
        let state = reducer.reduce(
            &ShopState::initial(),
            ShopAction::PurchasedCardsSet {
                gift_cards: vec![owned],
            },
        );

        let action = ShopAction::from_value(serde_json::json!({
            "type": "CARD_REDEEMED",
            "payload": {"giftCard": {
                "invoiceId": "a",
                "name": "Amazon.com",
                "amount": 25,
                "currency": "USD",
                "date": "2024-01-01T00:00:00Z",
                "claimCode": "NEW"
            }}
        }))
        .unwrap();
        let next = reducer.reduce(&state, action);
        let card = &next.gift_cards.main[0];

        assert!(card.archived);
        assert_eq!(card.status, GiftCardStatus::Redeemed);
        assert_eq!(card.claim_code.as_deref(), Some("NEW"));

        let cleaned = reducer.reduce(&next, ShopAction::UnsoldCardsDeleted);
        assert!(Arc::ptr_eq(&next, &cleaned));
    }

    #[test]
    fn test_test_network_reducer_leaves_main_alone() {
        let state = seeded(ShopReducer::new(NetworkId::Main));
        let reducer = ShopReducer::new(NetworkId::Test);
        let next = reducer.reduce(&state, ShopAction::UnsoldCardsDeleted);

        assert!(next.gift_cards.test.is_empty());
        assert!(Arc::ptr_eq(&state.gift_cards.main, &next.gift_cards.main));
    }

    #[test]
    fn test_noop_ledger_actions_return_same_reference() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let state = seeded(reducer);

        let missing = reducer.reduce(
            &state,
            ShopAction::CardStatusUpdated {
                invoice_id: InvoiceId::new("ghost"),
                status: GiftCardStatus::Redeemed,
            },
        );
        assert!(Arc::ptr_eq(&state, &missing));

        let cleaned = reducer.reduce(&state, ShopAction::UnsoldCardsDeleted);
        let cleaned_again = reducer.reduce(&cleaned, ShopAction::UnsoldCardsDeleted);
        assert!(Arc::ptr_eq(&cleaned, &cleaned_again));
    }

    #[test]
    fn test_archive_toggle_and_status_are_independent() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let state = seeded(reducer);
        let before: GiftCard = state.gift_cards.main[0].clone();

        let archived = reducer.reduce(
            &state,
            ShopAction::CardArchiveToggled {
                gift_card: before.clone(),
            },
        );
        assert!(archived.gift_cards.main[0].archived);
        assert_eq!(archived.gift_cards.main[0].status, before.status);

        let redeemed = reducer.reduce(
            &archived,
            ShopAction::CardStatusUpdated {
                invoice_id: before.invoice_id.clone(),
                status: GiftCardStatus::Redeemed,
            },
        );
        assert!(redeemed.gift_cards.main[0].archived);
    }

    #[test]
    fn test_cards_cleared_wipes_both_networks() {
        let state = seeded(ShopReducer::new(NetworkId::Main));
        let next = ShopReducer::new(NetworkId::Test).reduce(&state, ShopAction::CardsCleared);

        assert!(next.gift_cards.main.is_empty());
        assert!(next.gift_cards.test.is_empty());
        assert!(Arc::ptr_eq(&state.catalog, &next.catalog));
    }

    #[test]
    fn test_contact_updates_share_catalog_and_ledger() {
        let reducer = ShopReducer::new(NetworkId::Main);
        let state = seeded(reducer);
        let next = reducer.reduce(
            &state,
            ShopAction::EmailUpdated {
                email: "buyer@example.com".into(),
            },
        );
        let next = reducer.reduce(
            &next,
            ShopAction::PhoneUpdated {
                phone: "5551234567".into(),
                phone_country_info: PhoneCountryInfo::new("1", "US"),
            },
        );

        assert_eq!(next.contact.email, "buyer@example.com");
        assert_eq!(next.contact.phone, "5551234567");
        assert!(Arc::ptr_eq(&state.catalog, &next.catalog));
        assert!(Arc::ptr_eq(&state.gift_cards, &next.gift_cards));
    }
}

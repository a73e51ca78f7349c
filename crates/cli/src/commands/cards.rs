//! Gift card commands.
//!
//! # Usage
//!
//! ```bash
//! gs-cli cards init --brand Amazon.com --amount 25
//! gs-cli cards list
//! gs-cli cards redeem <invoice-id> --claim-code AAAA-BBBB
//! gs-cli cards archive <invoice-id>
//! gs-cli cards status <invoice-id> SYNCING
//! gs-cli cards set cards.json
//! gs-cli cards delete-unsold
//! gs-cli cards clear
//! ```

use std::path::Path;

use chrono::Utc;
use giftshelf_core::{CardConfig, GiftCard, GiftCardStatus, GiftCardUpdate, InvoiceId};
use giftshelf_shop::{ShopAction, ShopState};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::{CliError, Session, print_json, read_file};

/// Print the current network's active or archived cards.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list(session: &Session, archived: bool) -> Result<(), CliError> {
    let state = session.snapshot();
    let network = session.network();
    let cards: Vec<&GiftCard> = if archived {
        state.archived_gift_cards(network).collect()
    } else {
        state.active_gift_cards(network).collect()
    };
    print_json(&cards)
}

/// Start a purchase of `amount` from `brand`.
///
/// # Errors
///
/// Returns an error if the brand is unknown, does not sell `amount`, or the
/// snapshot cannot be saved.
pub async fn init(
    session: &mut Session,
    brand: &str,
    amount: Decimal,
    currency: Option<String>,
    invoice_id: Option<String>,
) -> Result<(), CliError> {
    let state = session.snapshot();
    let config = purchasable(&state, brand, amount)?;
    let currency = currency.unwrap_or_else(|| config.currency.clone());
    let invoice_id = invoice_id.map_or_else(|| InvoiceId::new(Uuid::new_v4().to_string()), InvoiceId::from);

    let card = GiftCard::unsold(
        invoice_id.clone(),
        config.name.clone(),
        amount,
        currency,
        Utc::now(),
    );
    session
        .apply(ShopAction::UnsoldCardInitialized { gift_card: card })
        .await?;

    info!(%invoice_id, brand, %amount, network = %session.network(), "Initialized unsold gift card");
    Ok(())
}

/// Replace the current network's cards with a JSON array.
///
/// # Errors
///
/// Returns an error if the file is not a card list or the snapshot cannot be saved.
pub async fn set(session: &mut Session, path: &Path) -> Result<(), CliError> {
    let gift_cards: Vec<GiftCard> = serde_json::from_slice(&read_file(path).await?)?;
    let count = gift_cards.len();
    session
        .apply(ShopAction::PurchasedCardsSet { gift_cards })
        .await?;
    info!(count, network = %session.network(), "Replaced purchased gift cards");
    Ok(())
}

/// Record the redemption of a card.
///
/// # Errors
///
/// Returns an error if no such card exists or the snapshot cannot be saved.
pub async fn redeem(
    session: &mut Session,
    invoice_id: &str,
    claim_code: String,
    pin: Option<String>,
) -> Result<(), CliError> {
    let card = stored_card(session, invoice_id)?;
    let mut update = GiftCardUpdate::new(card.invoice_id);
    update.status = Some(GiftCardStatus::Redeemed);
    update.claim_code = Some(claim_code);
    update.pin = pin;

    session
        .apply(ShopAction::CardRedeemed { gift_card: update })
        .await?;
    info!(invoice_id, "Gift card redeemed");
    Ok(())
}

/// Toggle whether a card is archived.
///
/// # Errors
///
/// Returns an error if no such card exists or the snapshot cannot be saved.
pub async fn archive(session: &mut Session, invoice_id: &str) -> Result<(), CliError> {
    let card = stored_card(session, invoice_id)?;
    let archived = !card.archived;

    session
        .apply(ShopAction::CardArchiveToggled { gift_card: card })
        .await?;
    info!(invoice_id, archived, "Gift card archive flag toggled");
    Ok(())
}

/// Overwrite a card's status.
///
/// Unknown invoice ids are not an error: the reducer leaves the snapshot as is.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be saved.
pub async fn status(session: &mut Session, invoice_id: String, status: String) -> Result<(), CliError> {
    session
        .apply(ShopAction::CardStatusUpdated {
            invoice_id: InvoiceId::from(invoice_id),
            status: GiftCardStatus::from(status),
        })
        .await?;
    Ok(())
}

/// Remove purchases that were never confirmed.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be saved.
pub async fn delete_unsold(session: &mut Session) -> Result<(), CliError> {
    let before = session
        .snapshot()
        .unsold_gift_cards(session.network())
        .count();
    session.apply(ShopAction::UnsoldCardsDeleted).await?;
    info!(removed = before, network = %session.network(), "Deleted unsold gift cards");
    Ok(())
}

/// Remove every card on every network.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be saved.
pub async fn clear(session: &mut Session) -> Result<(), CliError> {
    session.apply(ShopAction::CardsCleared).await?;
    info!("Cleared gift cards on all networks");
    Ok(())
}

/// Catalog entry for `brand`, checked to sell `amount`.
fn purchasable<'a>(state: &'a ShopState, brand: &str, amount: Decimal) -> Result<&'a CardConfig, CliError> {
    let config = state
        .catalog
        .available_card_map
        .get(brand)
        .ok_or_else(|| CliError::UnknownBrand(brand.to_owned()))?;
    if !config.accepts_amount(amount) {
        return Err(CliError::InvalidAmount {
            brand: brand.to_owned(),
            amount: amount.to_string(),
        });
    }
    Ok(config)
}

fn stored_card(session: &Session, invoice_id: &str) -> Result<GiftCard, CliError> {
    let invoice_id = InvoiceId::new(invoice_id);
    session
        .snapshot()
        .find_gift_card(session.network(), &invoice_id)
        .cloned()
        .ok_or_else(|| CliError::CardNotFound(invoice_id, session.network()))
}

//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! gs-cli catalog load catalog.json
//! gs-cli catalog load catalog.yaml
//! gs-cli catalog list
//! ```

use std::path::Path;

use giftshelf_core::CatalogPayload;
use giftshelf_shop::ShopAction;
use serde::Serialize;
use tracing::info;

use super::{CliError, Session, print_json, read_file};

/// Apply a fetched catalog payload from `path`.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the snapshot cannot be saved.
pub async fn load(session: &mut Session, path: &Path) -> Result<(), CliError> {
    let bytes = read_file(path).await?;
    let payload = parse_payload(path, &bytes)?;

    let state = session.apply(ShopAction::CatalogFetched(payload)).await?;
    info!(
        available = state.catalog.available_card_map.len(),
        supported = state.catalog.supported_card_map.len(),
        "Catalog loaded"
    );
    Ok(())
}

/// Print the purchasable brands.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list(session: &Session) -> Result<(), CliError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row<'a> {
        name: &'a str,
        display_name: &'a str,
        currency: &'a str,
    }

    let state = session.snapshot();
    let rows: Vec<Row<'_>> = state
        .available_cards_sorted()
        .into_iter()
        .map(|c| Row {
            name: c.name.as_str(),
            display_name: &c.display_name,
            currency: &c.currency,
        })
        .collect();
    print_json(&rows)
}

fn parse_payload(path: &Path, bytes: &[u8]) -> Result<CatalogPayload, CliError> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml::from_slice(bytes)?)
    } else {
        Ok(serde_json::from_slice(bytes)?)
    }
}

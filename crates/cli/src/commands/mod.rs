//! CLI commands.
//!
//! Every mutating command follows the same shape: open the persisted
//! snapshot, dispatch exactly one action, save. [`Session`] owns that cycle.

pub mod cards;
pub mod catalog;
pub mod contact;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use giftshelf_core::{ContactError, InvoiceId, NetworkId};
use giftshelf_shop::{
    AnalyticsGuard, ShopAction, ShopConfig, ShopError, ShopReducer, ShopState, ShopStore, persist,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration or persistence failed.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON for the expected shape.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An input file is not valid YAML for the expected shape.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Contact details failed validation.
    #[error("Invalid contact details: {0}")]
    Contact(#[from] ContactError),

    /// No gift card with this invoice id on the current network.
    #[error("No gift card with invoice id {0} on the {1} network")]
    CardNotFound(InvoiceId, NetworkId),

    /// The brand is not in the catalog.
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    /// The brand does not sell this amount.
    #[error("{brand} does not sell gift cards for {amount}")]
    InvalidAmount { brand: String, amount: String },

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// A loaded snapshot plus everything needed to change and save it.
pub struct Session {
    config: ShopConfig,
    store: ShopStore,
    analytics: AnalyticsGuard,
}

impl Session {
    /// Load configuration and the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the snapshot cannot be loaded.
    pub async fn open(
        state_path: Option<PathBuf>,
        network: Option<NetworkId>,
    ) -> Result<Self, CliError> {
        let mut config = ShopConfig::from_env().map_err(ShopError::from)?;
        if let Some(path) = state_path {
            config.state_path = path;
        }
        if let Some(network) = network {
            config.network = network;
        }

        let state = persist::load(&config.state_path)
            .await
            .map_err(ShopError::from)?;
        let store = ShopStore::new(ShopReducer::new(config.network), state);

        // Events tracked while the command runs are delivered on close.
        let analytics = AnalyticsGuard::new(config.analytics_enabled);
        analytics.begin_initialize();

        Ok(Self {
            config,
            store,
            analytics,
        })
    }

    #[must_use]
    pub const fn network(&self) -> NetworkId {
        self.config.network
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<ShopState> {
        self.store.snapshot()
    }

    /// Dispatch `action` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub async fn apply(&mut self, action: ShopAction) -> Result<Arc<ShopState>, CliError> {
        let kind = action.kind();
        let before = self.store.snapshot();
        let after = self.store.dispatch(action);

        if Arc::ptr_eq(&before, &after) {
            info!(kind, "Action changed nothing");
            return Ok(after);
        }

        persist::save(&self.config.state_path, &after)
            .await
            .map_err(ShopError::from)?;
        self.track(kind);
        Ok(after)
    }

    /// Print the whole snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn show(&self) -> Result<(), CliError> {
        print_json(&*self.store.snapshot())
    }

    /// Apply a raw action read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, is not an action, or the
    /// result cannot be saved.
    pub async fn dispatch_file(&mut self, path: &Path) -> Result<(), CliError> {
        let value: serde_json::Value = serde_json::from_slice(&read_file(path).await?)?;
        let action = ShopAction::from_value(value)?;
        if action == ShopAction::Unrecognized {
            info!(path = %path.display(), "Action is not a shop action");
        }
        self.apply(action).await?;
        Ok(())
    }

    /// Wipe the whole snapshot, as on logout.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub async fn reset(&mut self) -> Result<(), CliError> {
        let state = self.store.reset();
        persist::save(&self.config.state_path, &state)
            .await
            .map_err(ShopError::from)?;
        self.track("RESET");
        Ok(())
    }

    /// Deliver tracked events.
    pub fn close(self) {
        self.analytics.finish_initialize();
    }

    fn track(&self, event: &'static str) {
        let network = self.config.network;
        self.analytics.guard(move || {
            info!(target: "giftshelf::analytics", event, %network, "Tracked event");
        });
    }
}

/// Read a whole input file.
pub(crate) async fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path).await.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").map_err(CliError::Output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use giftshelf_core::{GiftCardStatus, InvoiceId};

    use super::*;

    async fn open(path: &Path, network: NetworkId) -> Session {
        Session::open(Some(path.to_path_buf()), Some(network))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_apply_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");

        let mut session = open(&path, NetworkId::Test).await;
        session
            .apply(ShopAction::CardStatusUpdated {
                invoice_id: InvoiceId::new("missing"),
                status: GiftCardStatus::Redeemed,
            })
            .await
            .unwrap();
        assert!(!path.exists(), "a no-op must not write the snapshot");

        session
            .apply(ShopAction::EmailUpdated {
                email: "buyer@example.com".to_owned(),
            })
            .await
            .unwrap();
        session.close();

        let reopened = open(&path, NetworkId::Main).await;
        assert_eq!(reopened.snapshot().contact.email, "buyer@example.com");
        assert_eq!(reopened.network(), NetworkId::Main);
    }

    #[tokio::test]
    async fn test_dispatch_file_ignores_foreign_actions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        let action = dir.path().join("action.json");
        tokio::fs::write(&action, br#"{"type": "APP_READY", "payload": {"x": 1}}"#)
            .await
            .unwrap();

        let mut session = open(&path, NetworkId::Main).await;
        let before = session.snapshot();
        session.dispatch_file(&action).await.unwrap();

        assert!(Arc::ptr_eq(&before, &session.snapshot()));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_reset_writes_initial_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");

        let mut session = open(&path, NetworkId::Main).await;
        session
            .apply(ShopAction::EmailUpdated {
                email: "buyer@example.com".to_owned(),
            })
            .await
            .unwrap();
        session.reset().await.unwrap();

        let reopened = open(&path, NetworkId::Main).await;
        assert_eq!(*reopened.snapshot(), ShopState::default());
    }
}

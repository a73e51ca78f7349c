//! Snapshot persistence.
//!
//! The whole [`ShopState`] is written as one JSON document. Nothing is left
//! out: catalog, both ledger partitions, and contact details all survive a
//! restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::ShopState;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot version {found} is newer than supported version {}", SNAPSHOT_VERSION)]
    UnsupportedVersion { found: u32 },
}

#[derive(Serialize)]
struct PersistedShopRef<'a> {
    version: u32,
    state: &'a ShopState,
}

#[derive(Deserialize)]
struct PersistedShop {
    version: u32,
    state: ShopState,
}

/// Load the snapshot at `path`.
///
/// A missing file is a fresh install and yields the initial state.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid snapshot, or
/// was written by a newer version.
pub async fn load(path: &Path) -> Result<Arc<ShopState>, PersistError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No snapshot found, starting fresh");
            return Ok(ShopState::initial());
        }
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let persisted: PersistedShop =
        serde_json::from_slice(&bytes).map_err(|source| PersistError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    if persisted.version > SNAPSHOT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: persisted.version,
        });
    }

    info!(path = %path.display(), "Loaded shop snapshot");
    Ok(Arc::new(persisted.state))
}

/// Write `state` to `path`.
///
/// The document is written to a sibling temp file first and renamed into
/// place, so a crash never leaves a half-written snapshot behind.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized or written.
pub async fn save(path: &Path, state: &ShopState) -> Result<(), PersistError> {
    let json = serde_json::to_vec_pretty(&PersistedShopRef {
        version: SNAPSHOT_VERSION,
        state,
    })
    .map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = temp_path(path);
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    tokio::fs::write(&tmp, &json).await.map_err(io_err)?;
    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        if let Err(e) = tokio::fs::remove_file(&tmp).await {
            warn!(path = %tmp.display(), error = %e, "Failed to remove temp snapshot");
        }
        return Err(io_err(source));
    }

    info!(path = %path.display(), bytes = json.len(), "Saved shop snapshot");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

//! Unified error type for shop operations that touch the outside world.
//!
//! State transitions never fail; only configuration and persistence do.

use thiserror::Error;

use crate::config::ConfigError;
use crate::persist::PersistError;

#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot could not be loaded or saved.
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

//! Network environments that partition the gift-card ledger.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known network.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid network: {0} (expected `main` or `test`)")]
pub struct ParseNetworkError(pub String);

/// The network environment a gift card was purchased under.
///
/// Purchases made against the test environment never mix with production
/// purchases; every ledger mutation is scoped to exactly one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Production environment.
    #[default]
    #[serde(alias = "livenet", alias = "mainnet")]
    Main,
    /// Test environment.
    #[serde(alias = "testnet")]
    Test,
}

impl NetworkId {
    /// Both networks, in partition order.
    pub const ALL: [Self; 2] = [Self::Main, Self::Test];

    /// Returns the network name as used in persisted snapshots.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "livenet" => Ok(Self::Main),
            "test" | "testnet" => Ok(Self::Test),
            _ => Err(ParseNetworkError(s.to_owned())),
        }
    }
}

//! Gift-card lifecycle status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Status of a purchased gift card.
///
/// Only two values carry meaning for the ledger: [`Unredeemed`](Self::Unredeemed)
/// marks a pending purchase that may be cleaned up, and
/// [`Redeemed`](Self::Redeemed) marks a consumed claim code. Any other status
/// reported by the redemption service (`PENDING`, `FAILURE`, `SYNCING`, ...)
/// is stored verbatim as [`Other`](Self::Other).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum GiftCardStatus {
    #[default]
    Unredeemed,
    Redeemed,
    Other(String),
}

impl GiftCardStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unredeemed => "UNREDEEMED",
            Self::Redeemed => "REDEEMED",
            Self::Other(status) => status,
        }
    }

    /// Whether this card is an abandoned or still-pending purchase.
    #[must_use]
    pub const fn is_unredeemed(&self) -> bool {
        matches!(self, Self::Unredeemed)
    }
}

impl From<String> for GiftCardStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "UNREDEEMED" => Self::Unredeemed,
            "REDEEMED" => Self::Redeemed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for GiftCardStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<GiftCardStatus> for String {
    fn from(status: GiftCardStatus) -> Self {
        match status {
            GiftCardStatus::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for GiftCardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

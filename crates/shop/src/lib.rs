//! Giftshelf Shop - gift-card catalog and lifecycle state container.
//!
//! The shop keeps three things in one immutable snapshot:
//! - the merchant catalog, including every brand ever fetched
//! - purchased and pending gift cards, partitioned by network
//! - the contact details used during purchase flows
//!
//! All changes go through [`ShopReducer::reduce`], a pure function from
//! `(snapshot, action)` to the next snapshot. Unchanged subtrees are shared
//! by `Arc`, and a transition that changes nothing returns its input.
//!
//! # Modules
//!
//! - [`action`] - Actions the reducer understands
//! - [`reducer`] - The reducer itself
//! - [`store`] - Single-writer wrapper holding the current snapshot
//! - [`catalog`], [`ledger`], [`contact`] - The three state subtrees
//! - [`query`] - Read-only selectors over a snapshot
//! - [`persist`] - JSON snapshot load/save
//! - [`config`] - Environment configuration
//! - [`analytics`] - Initialization guard for analytics calls

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod ledger;
pub mod persist;
pub mod query;
pub mod reducer;
pub mod state;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use action::ShopAction;
pub use analytics::{AnalyticsGuard, AnalyticsPhase, GuardOutcome};
pub use catalog::CatalogSnapshot;
pub use config::{ConfigError, ShopConfig};
pub use contact::ContactProfile;
pub use error::ShopError;
pub use ledger::GiftCardLedger;
pub use persist::PersistError;
pub use query::CategorySelection;
pub use reducer::ShopReducer;
pub use state::ShopState;
pub use store::ShopStore;

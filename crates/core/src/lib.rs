//! Giftshelf Core - Shared gift-card domain types.
//!
//! This crate provides the types shared by every Giftshelf component:
//! - `shop` - Catalog, ledger, and contact state container
//! - `cli` - Command-line operation of a persisted shop snapshot
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no state
//! transitions, no clocks. This keeps it lightweight and allows it to be used
//! anywhere a gift-card record or catalog entry has to be parsed.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, networks, statuses, catalog entries, gift cards, and contact data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

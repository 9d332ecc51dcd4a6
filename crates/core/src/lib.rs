//! Vitrina Core - Shared types library.
//!
//! This crate provides common types used across all Vitrina components:
//! - `storefront` - Catalogue search, cart and checkout services
//! - `cli` - Command-line front end over the storefront services
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no formatting of whole views. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, phone numbers and cart state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

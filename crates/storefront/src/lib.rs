//! Vitrina storefront library.
//!
//! Everything a storefront front end needs, with no UI of its own:
//!
//! - [`catalog`] - static product catalogue loaded from YAML
//! - [`search`] - substring search, snippets, highlighting and history
//! - [`cart`] - persistent shopping cart
//! - [`checkout`] - order message and messaging deep link
//! - [`storage`] - key-value persistence shared by cart and history
//! - [`views`] - plain-text rendering of each screen

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod search;
pub mod state;
pub mod storage;
pub mod views;

pub use error::{AppError, Result};
pub use state::AppState;

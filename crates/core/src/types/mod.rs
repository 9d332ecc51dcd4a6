//! Core types for Vitrina.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod price;
pub mod status;

pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, CurrencyError, Price};
pub use status::*;

//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `order` - Order records, amounts, currencies, and order errors
//! - `signing` - Canonicalization and verification of signed site requests

pub mod order;
pub mod signing;

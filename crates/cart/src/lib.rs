//! Cart domain module.
//!
//! Owns the shopping cart's line items and is the single source of truth the
//! storefront renders from. Deterministic domain logic only (no IO, no rendering).

pub mod cart;
pub mod engine;

pub use cart::{Cart, CartCommand, CartEvent, CartLine};
pub use engine::CartEngine;

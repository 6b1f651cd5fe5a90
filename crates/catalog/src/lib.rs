//! Catalog domain module.
//!
//! The fixed, read-only set of purchasable health products plus the queries the
//! storefront runs over it (lookup, category filter, search, sort). Pure domain logic:
//! no IO, no rendering.

pub mod catalog;
pub mod product;
pub mod rating;
mod seed;

pub use catalog::{Catalog, SortKey};
pub use product::{Category, CategoryFilter, Product};
pub use rating::{Star, stars};

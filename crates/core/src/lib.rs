//! `vitashop-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, cart and
//! storefront crates (no IO, no rendering).

pub mod aggregate;
pub mod error;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{InquiryId, ProductId};

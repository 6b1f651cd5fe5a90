use core::str::FromStr;
use std::collections::HashSet;

use vitashop_core::{DomainError, DomainResult, ProductId};

use crate::product::{CategoryFilter, Product};
use crate::seed;

/// Ordering options for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Best rated first.
    Rating,
    /// Alphabetical by name.
    Name,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            other => Err(DomainError::validation(format!("unknown sort key: {other}"))),
        }
    }
}

/// The read-only product catalog.
///
/// Populated once and never mutated afterwards. Every query preserves catalog order
/// unless it is explicitly a sort.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range ratings.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(DomainError::validation(format!(
                    "rating {} of product {} is outside [0, 5]",
                    product.rating, product.id
                )));
            }
        }
        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// The storefront's fixed health-product catalog.
    pub fn seeded() -> Self {
        Self {
            products: seed::products(),
        }
    }

    /// Full catalog, insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Linear lookup by id; `None` when absent.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in the given category (or all of them), catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    /// Case-insensitive match on name or description, catalog order.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches_query(query)).collect()
    }

    /// A sorted copy of the catalog; ties keep catalog order.
    pub fn sorted(&self, key: SortKey) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        match key {
            SortKey::PriceLow => products.sort_by_key(|p| p.price),
            SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortKey::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        products
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

//! Cart engine: the cart aggregate bound to the catalog it sells from.

use std::sync::Arc;

use vitashop_catalog::{Catalog, Product};
use vitashop_core::{Aggregate, DomainResult, ProductId};

use crate::cart::{Cart, CartCommand, CartEvent, CartLine};

/// Owns the session's cart and answers every cart query from current state.
///
/// Mutations return the events they applied; an empty list means the call was a
/// no-op (unknown product, absent line). Totals are never cached.
#[derive(Debug, Clone)]
pub struct CartEngine {
    catalog: Arc<Catalog>,
    cart: Cart,
}

impl CartEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.line(product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one unit of `product_id`. Unknown products are ignored.
    pub fn add(&mut self, product_id: ProductId) -> DomainResult<Vec<CartEvent>> {
        if self.catalog.find(product_id).is_none() {
            tracing::debug!(product_id = %product_id, "add ignored: product not in catalog");
            return Ok(Vec::new());
        }
        self.run(CartCommand::AddItem { product_id })
    }

    pub fn remove(&mut self, product_id: ProductId) -> DomainResult<Vec<CartEvent>> {
        self.run(CartCommand::RemoveItem { product_id })
    }

    /// Shift a line's quantity; a result of zero or less removes the line.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> DomainResult<Vec<CartEvent>> {
        self.run(CartCommand::AdjustQuantity { product_id, delta })
    }

    pub fn clear(&mut self) -> DomainResult<Vec<CartEvent>> {
        self.run(CartCommand::Clear)
    }

    /// Sum of all line quantities (the badge count).
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of `price * quantity`; lines whose product cannot be resolved count as 0.
    pub fn total_price(&self) -> u64 {
        self.cart.lines().iter().map(|l| self.line_subtotal(l)).sum()
    }

    pub fn line_subtotal(&self, line: &CartLine) -> u64 {
        self.catalog
            .find(line.product_id)
            .map(|p| p.price.saturating_mul(u64::from(line.quantity)))
            .unwrap_or(0)
    }

    /// Lines paired with their catalog product, skipping unresolvable ones.
    pub fn resolved_lines(&self) -> impl Iterator<Item = (&CartLine, &Product)> + '_ {
        self.cart
            .lines()
            .iter()
            .filter_map(|l| self.catalog.find(l.product_id).map(|p| (l, p)))
    }

    /// Replace the cart with previously persisted lines.
    ///
    /// Lines for products missing from the catalog and zero quantities are dropped;
    /// duplicate products are merged. Returns how many input lines were discarded.
    pub fn restore(&mut self, persisted: Vec<CartLine>) -> usize {
        let total = persisted.len();
        let mut lines: Vec<CartLine> = Vec::with_capacity(total);
        let mut discarded = 0;

        for line in persisted {
            if line.quantity == 0 || self.catalog.find(line.product_id).is_none() {
                discarded += 1;
                continue;
            }
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                    discarded += 1;
                }
                None => lines.push(line),
            }
        }

        if discarded > 0 {
            tracing::warn!(discarded, total, "dropped invalid persisted cart lines");
        }
        self.cart = Cart::from_lines(lines);
        discarded
    }

    fn run(&mut self, command: CartCommand) -> DomainResult<Vec<CartEvent>> {
        let events = self.cart.execute(&command)?;
        if events.is_empty() {
            tracing::debug!(?command, "cart command was a no-op");
        } else {
            tracing::debug!(?command, lines = self.cart.lines().len(), "cart updated");
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CartEngine {
        CartEngine::new(Arc::new(Catalog::seeded()))
    }

    fn pid(raw: u32) -> ProductId {
        ProductId::new(raw)
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut engine = engine();
        engine.add(pid(1)).unwrap();
        engine.add(pid(1)).unwrap();
        engine.add(pid(2)).unwrap();
        assert_eq!(engine.total_item_count(), 3);
    }

    #[test]
    fn total_price_sums_price_times_quantity() {
        let mut engine = engine();
        engine.add(pid(1)).unwrap();
        engine.add(pid(1)).unwrap();
        engine.add(pid(3)).unwrap();
        assert_eq!(engine.total_price(), 62_000);
    }

    #[test]
    fn add_unknown_product_leaves_cart_unchanged() {
        let mut engine = engine();
        engine.add(pid(1)).unwrap();
        let before = engine.cart().clone();

        let events = engine.add(pid(404)).unwrap();

        assert!(events.is_empty());
        assert_eq!(engine.cart(), &before);
    }

    #[test]
    fn decrement_by_full_quantity_equals_remove() {
        let mut via_update = engine();
        let mut via_remove = engine();
        for e in [&mut via_update, &mut via_remove] {
            e.add(pid(2)).unwrap();
            e.add(pid(2)).unwrap();
            e.add(pid(4)).unwrap();
        }

        via_update.update_quantity(pid(2), -2).unwrap();
        via_remove.remove(pid(2)).unwrap();

        assert_eq!(via_update.lines(), via_remove.lines());
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let engine = engine();
        assert_eq!(engine.total_item_count(), 0);
        assert_eq!(engine.total_price(), 0);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut engine = engine();
        engine.add(pid(7)).unwrap();
        let events = engine.clear().unwrap();
        assert_eq!(events, vec![CartEvent::CartCleared]);
        assert!(engine.is_empty());
    }

    #[test]
    fn restore_drops_unknown_and_zero_lines_and_merges_duplicates() {
        let mut engine = engine();
        let discarded = engine.restore(vec![
            CartLine {
                product_id: pid(1),
                quantity: 2,
            },
            CartLine {
                product_id: pid(999),
                quantity: 1,
            },
            CartLine {
                product_id: pid(3),
                quantity: 0,
            },
            CartLine {
                product_id: pid(1),
                quantity: 1,
            },
        ]);

        assert_eq!(discarded, 3);
        assert_eq!(
            engine.lines(),
            &[CartLine {
                product_id: pid(1),
                quantity: 3
            }]
        );
    }

    #[test]
    fn resolved_lines_pair_each_line_with_its_product() {
        let mut engine = engine();
        engine.add(pid(9)).unwrap();
        let names: Vec<&str> = engine.resolved_lines().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["홍삼"]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u32),
            Remove(u32),
            Update(u32, i64),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            // Ids 0 and 13..=15 are outside the seeded catalog.
            let id = 0u32..=15;
            prop_oneof![
                6 => id.clone().prop_map(Op::Add),
                2 => id.clone().prop_map(Op::Remove),
                4 => (id, -4i64..=4).prop_map(|(i, d)| Op::Update(i, d)),
                1 => Just(Op::Clear),
            ]
        }

        fn run(engine: &mut CartEngine, op: &Op) {
            match op {
                Op::Add(i) => engine.add(pid(*i)).unwrap(),
                Op::Remove(i) => engine.remove(pid(*i)).unwrap(),
                Op::Update(i, d) => engine.update_quantity(pid(*i), *d).unwrap(),
                Op::Clear => engine.clear().unwrap(),
            };
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: lines stay unique by product and every quantity stays >= 1.
            #[test]
            fn lines_are_unique_and_positive(ops in prop::collection::vec(op(), 0..60)) {
                let mut engine = engine();
                for op in &ops {
                    run(&mut engine, op);

                    let mut ids: Vec<ProductId> =
                        engine.lines().iter().map(|l| l.product_id).collect();
                    let len = ids.len();
                    ids.sort();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), len);
                    prop_assert!(engine.lines().iter().all(|l| l.quantity >= 1));
                }
            }

            /// Property: totals always equal a fresh recomputation over the lines.
            #[test]
            fn totals_match_recomputation(ops in prop::collection::vec(op(), 0..60)) {
                let mut engine = engine();
                for op in &ops {
                    run(&mut engine, op);
                }

                let count: u64 = engine.lines().iter().map(|l| u64::from(l.quantity)).sum();
                let price: u64 = engine
                    .lines()
                    .iter()
                    .map(|l| {
                        let p = engine.catalog().find(l.product_id).unwrap();
                        p.price * u64::from(l.quantity)
                    })
                    .sum();

                prop_assert_eq!(engine.total_item_count(), count);
                prop_assert_eq!(engine.total_price(), price);
            }

            /// Property: unknown products never enter the cart.
            #[test]
            fn only_catalog_products_are_held(ops in prop::collection::vec(op(), 0..60)) {
                let mut engine = engine();
                for op in &ops {
                    run(&mut engine, op);
                }
                for line in engine.lines() {
                    prop_assert!(engine.catalog().find(line.product_id).is_some());
                }
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use vitashop_core::{Aggregate, AggregateRoot, DomainError, ProductId};
use vitashop_events::Event;

/// Cart line: a product and how many of it.
///
/// `quantity` is always at least 1 for a line held by a [`Cart`]; reaching zero
/// removes the line instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Aggregate root: Cart.
///
/// Lines are unique by product and kept in insertion order, which is also the
/// display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines, recomputed on every call.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Build a cart directly from already-normalized lines (unique, quantity >= 1).
    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        debug_assert!(lines.iter().all(|l| l.quantity >= 1));
        Self { lines, version: 0 }
    }
}

impl AggregateRoot for Cart {
    fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    /// Add one unit of a product (merging into an existing line).
    AddItem { product_id: ProductId },
    /// Drop a product's line entirely.
    RemoveItem { product_id: ProductId },
    /// Shift a line's quantity by `delta`; at or below zero the line is removed.
    AdjustQuantity { product_id: ProductId, delta: i64 },
    /// Empty the cart.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    /// One unit was added; `quantity` is the line's quantity afterwards.
    ItemAdded { product_id: ProductId, quantity: u32 },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    ItemRemoved { product_id: ProductId },
    CartCleared,
}

impl CartEvent {
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartEvent::ItemAdded { product_id, .. }
            | CartEvent::QuantityChanged { product_id, .. }
            | CartEvent::ItemRemoved { product_id } => Some(*product_id),
            CartEvent::CartCleared => None,
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "cart.item.added",
            CartEvent::QuantityChanged { .. } => "cart.item.quantity_changed",
            CartEvent::ItemRemoved { .. } => "cart.item.removed",
            CartEvent::CartCleared => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded {
                product_id,
                quantity,
            }
            | CartEvent::QuantityChanged {
                product_id,
                quantity,
            } => match self.lines.iter_mut().find(|l| l.product_id == *product_id) {
                Some(line) => line.quantity = *quantity,
                None => self.lines.push(CartLine {
                    product_id: *product_id,
                    quantity: *quantity,
                }),
            },
            CartEvent::ItemRemoved { product_id } => {
                self.lines.retain(|l| l.product_id != *product_id);
            }
            CartEvent::CartCleared => self.lines.clear(),
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem { product_id } => self.handle_add(*product_id),
            CartCommand::RemoveItem { product_id } => Ok(self.handle_remove(*product_id)),
            CartCommand::AdjustQuantity { product_id, delta } => {
                self.handle_adjust(*product_id, *delta)
            }
            CartCommand::Clear => Ok(self.handle_clear()),
        }
    }
}

impl Cart {
    fn handle_add(&self, product_id: ProductId) -> Result<Vec<CartEvent>, DomainError> {
        let quantity = match self.line(product_id) {
            Some(line) => line
                .quantity
                .checked_add(1)
                .ok_or_else(|| DomainError::invariant("line quantity overflow"))?,
            None => 1,
        };

        Ok(vec![CartEvent::ItemAdded {
            product_id,
            quantity,
        }])
    }

    fn handle_remove(&self, product_id: ProductId) -> Vec<CartEvent> {
        if self.line(product_id).is_none() {
            return Vec::new();
        }
        vec![CartEvent::ItemRemoved { product_id }]
    }

    fn handle_adjust(
        &self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<Vec<CartEvent>, DomainError> {
        let Some(line) = self.line(product_id) else {
            return Ok(Vec::new());
        };
        if delta == 0 {
            return Ok(Vec::new());
        }

        let next = i64::from(line.quantity).saturating_add(delta);
        if next <= 0 {
            return Ok(vec![CartEvent::ItemRemoved { product_id }]);
        }

        let quantity =
            u32::try_from(next).map_err(|_| DomainError::invariant("line quantity overflow"))?;
        Ok(vec![CartEvent::QuantityChanged {
            product_id,
            quantity,
        }])
    }

    fn handle_clear(&self) -> Vec<CartEvent> {
        if self.lines.is_empty() {
            return Vec::new();
        }
        vec![CartEvent::CartCleared]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u32) -> ProductId {
        ProductId::new(raw)
    }

    fn add(raw: u32) -> CartCommand {
        CartCommand::AddItem {
            product_id: pid(raw),
        }
    }

    #[test]
    fn add_to_empty_cart_emits_item_added_with_quantity_one() {
        let cart = Cart::new();
        let events = cart.handle(&add(1)).unwrap();
        assert_eq!(
            events,
            vec![CartEvent::ItemAdded {
                product_id: pid(1),
                quantity: 1
            }]
        );
    }

    #[test]
    fn repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.execute(&add(1)).unwrap();
        cart.execute(&add(1)).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(pid(1)).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new();
        for raw in [3, 1, 2, 1] {
            cart.execute(&add(raw)).unwrap();
        }
        let order: Vec<u32> = cart.lines().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn remove_absent_line_is_a_no_op() {
        let cart = Cart::new();
        let events = cart
            .handle(&CartCommand::RemoveItem { product_id: pid(4) })
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn adjust_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.execute(&add(5)).unwrap();
        cart.execute(&add(5)).unwrap();

        let events = cart
            .execute(&CartCommand::AdjustQuantity {
                product_id: pid(5),
                delta: -2,
            })
            .unwrap();

        assert_eq!(events, vec![CartEvent::ItemRemoved { product_id: pid(5) }]);
        assert!(cart.is_empty());
    }

    #[test]
    fn adjust_below_zero_also_removes() {
        let mut cart = Cart::new();
        cart.execute(&add(5)).unwrap();
        cart.execute(&CartCommand::AdjustQuantity {
            product_id: pid(5),
            delta: -10,
        })
        .unwrap();
        assert!(cart.line(pid(5)).is_none());
    }

    #[test]
    fn adjust_absent_line_or_zero_delta_is_a_no_op() {
        let mut cart = Cart::new();
        cart.execute(&add(1)).unwrap();

        let absent = cart
            .handle(&CartCommand::AdjustQuantity {
                product_id: pid(2),
                delta: 1,
            })
            .unwrap();
        let zero = cart
            .handle(&CartCommand::AdjustQuantity {
                product_id: pid(1),
                delta: 0,
            })
            .unwrap();

        assert!(absent.is_empty());
        assert!(zero.is_empty());
    }

    #[test]
    fn adjust_overflow_is_rejected() {
        let mut cart = Cart::new();
        cart.execute(&add(1)).unwrap();
        let err = cart
            .handle(&CartCommand::AdjustQuantity {
                product_id: pid(1),
                delta: i64::from(u32::MAX),
            })
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for overflow"),
        }
    }

    #[test]
    fn clear_empty_cart_emits_nothing() {
        assert!(Cart::new().handle(&CartCommand::Clear).unwrap().is_empty());
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = Cart::new();
        cart.execute(&add(1)).unwrap();
        let before = cart.clone();

        let first = cart.handle(&add(1)).unwrap();
        let second = cart.handle(&add(1)).unwrap();

        assert_eq!(cart, before);
        assert_eq!(first, second);
    }

    #[test]
    fn version_increments_per_applied_event() {
        let mut cart = Cart::new();
        assert_eq!(cart.version(), 0);
        cart.execute(&add(1)).unwrap();
        cart.execute(&add(2)).unwrap();
        cart.execute(&CartCommand::Clear).unwrap();
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn event_types_are_stable() {
        assert_eq!(CartEvent::CartCleared.event_type(), "cart.cleared");
        assert_eq!(
            CartEvent::ItemRemoved { product_id: pid(1) }.event_type(),
            "cart.item.removed"
        );
    }

    #[test]
    fn cart_line_serializes_with_plain_fields() {
        let json = serde_json::to_string(&CartLine {
            product_id: pid(3),
            quantity: 2,
        })
        .unwrap();
        assert_eq!(json, r#"{"product_id":3,"quantity":2}"#);
    }
}

//! Render sync: pure view models derived from engine and catalog state.
//!
//! Every function here reads current state and returns a value; nothing is cached
//! and nothing is mutated, so rendering twice yields equal views. The `Display`
//! impls are the text adapter the binary draws with.

use std::fmt;
use std::time::Duration;

use vitashop_cart::CartEngine;
use vitashop_catalog::{Product, Star, stars};
use vitashop_core::ProductId;

use crate::format::{format_number, format_won};

pub const EMPTY_CART_MESSAGE: &str = "장바구니가 비어있습니다.";
/// Entrance delay of the first card; each later card waits one more step.
pub const CARD_STAGGER_BASE: Duration = Duration::from_millis(100);
pub const CARD_STAGGER_STEP: Duration = Duration::from_millis(100);

/// Controls on a cart row. Each maps back onto one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Decrement(ProductId),
    Increment(ProductId),
    Remove(ProductId),
}

impl CartAction {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartAction::Decrement(id) | CartAction::Increment(id) | CartAction::Remove(id) => *id,
        }
    }
}

/// Controls on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    AddToCart(ProductId),
    BuyNow(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub product_id: ProductId,
    pub name: String,
    pub icon: String,
    pub unit_price: u64,
    pub unit_price_display: String,
    pub quantity: u32,
    pub subtotal: u64,
    pub subtotal_display: String,
    pub actions: [CartAction; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPanelView {
    Empty {
        message: String,
        total_display: String,
    },
    Items {
        rows: Vec<CartRowView>,
        total: u64,
        total_display: String,
    },
}

impl CartPanelView {
    pub fn total_display(&self) -> &str {
        match self {
            CartPanelView::Empty { total_display, .. }
            | CartPanelView::Items { total_display, .. } => total_display,
        }
    }

    pub fn rows(&self) -> &[CartRowView] {
        match self {
            CartPanelView::Empty { .. } => &[],
            CartPanelView::Items { rows, .. } => rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub count: u64,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardView {
    pub product_id: ProductId,
    pub name: String,
    pub category_label: &'static str,
    pub description: String,
    pub icon: String,
    pub stars: Vec<Star>,
    pub rating_text: String,
    pub price_display: String,
    pub actions: [CardAction; 2],
    pub enter_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogGridView {
    pub cards: Vec<ProductCardView>,
}

impl CatalogGridView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Cart modal contents. Lines whose product is missing from the catalog are skipped.
pub fn render_cart_panel(engine: &CartEngine) -> CartPanelView {
    if engine.is_empty() {
        return CartPanelView::Empty {
            message: EMPTY_CART_MESSAGE.to_string(),
            total_display: "0".to_string(),
        };
    }

    let rows: Vec<CartRowView> = engine
        .resolved_lines()
        .map(|(line, product)| {
            let subtotal = engine.line_subtotal(line);
            CartRowView {
                product_id: product.id,
                name: product.name.clone(),
                icon: product.icon.clone(),
                unit_price: product.price,
                unit_price_display: format_won(product.price),
                quantity: line.quantity,
                subtotal,
                subtotal_display: format_won(subtotal),
                actions: [
                    CartAction::Decrement(product.id),
                    CartAction::Increment(product.id),
                    CartAction::Remove(product.id),
                ],
            }
        })
        .collect();
    let total = engine.total_price();

    CartPanelView::Items {
        rows,
        total,
        total_display: format_number(total),
    }
}

pub fn render_badge(engine: &CartEngine) -> BadgeView {
    let count = engine.total_item_count();
    BadgeView {
        count,
        visible: count > 0,
    }
}

pub fn render_product_card(product: &Product, index: usize) -> ProductCardView {
    let step = u32::try_from(index).unwrap_or(u32::MAX);
    ProductCardView {
        product_id: product.id,
        name: product.name.clone(),
        category_label: product.category.label(),
        description: product.description.clone(),
        icon: product.icon.clone(),
        stars: stars(product.rating),
        rating_text: format!("{} ({}개 리뷰)", product.rating, product.reviews),
        price_display: format_won(product.price),
        actions: [
            CardAction::AddToCart(product.id),
            CardAction::BuyNow(product.id),
        ],
        enter_delay: CARD_STAGGER_BASE.saturating_add(CARD_STAGGER_STEP.saturating_mul(step)),
    }
}

/// One card per product, in the given order.
pub fn render_catalog_grid(products: &[&Product]) -> CatalogGridView {
    CatalogGridView {
        cards: products
            .iter()
            .enumerate()
            .map(|(i, p)| render_product_card(p, i))
            .collect(),
    }
}

impl fmt::Display for BadgeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible {
            write!(f, "[장바구니 {}]", self.count)
        } else {
            write!(f, "[장바구니]")
        }
    }
}

fn write_stars(f: &mut fmt::Formatter<'_>, stars: &[Star]) -> fmt::Result {
    for star in stars {
        let glyph = match star {
            Star::Full => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        };
        write!(f, "{glyph}")?;
    }
    Ok(())
}

impl fmt::Display for ProductCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<3}{} [{}] ", self.product_id, self.name, self.category_label)?;
        write_stars(f, &self.stars)?;
        write!(f, " {}  {}", self.rating_text, self.price_display)
    }
}

impl fmt::Display for CatalogGridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return writeln!(f, "(표시할 제품이 없습니다)");
        }
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CartPanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---- 장바구니 ----")?;
        match self {
            CartPanelView::Empty { message, .. } => writeln!(f, "{message}")?,
            CartPanelView::Items { rows, .. } => {
                for row in rows {
                    writeln!(
                        f,
                        "#{:<3}{}  {} x{}  = {}",
                        row.product_id,
                        row.name,
                        row.unit_price_display,
                        row.quantity,
                        row.subtotal_display
                    )?;
                }
            }
        }
        writeln!(f, "합계: {}원", self.total_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vitashop_catalog::Catalog;

    fn engine() -> CartEngine {
        CartEngine::new(Arc::new(Catalog::seeded()))
    }

    fn pid(raw: u32) -> ProductId {
        ProductId::new(raw)
    }

    #[test]
    fn empty_cart_renders_placeholder_and_zero_total() {
        let engine = engine();
        let panel = render_cart_panel(&engine);
        assert_eq!(
            panel,
            CartPanelView::Empty {
                message: EMPTY_CART_MESSAGE.to_string(),
                total_display: "0".to_string(),
            }
        );
        assert_eq!(
            render_badge(&engine),
            BadgeView {
                count: 0,
                visible: false
            }
        );
    }

    #[test]
    fn populated_cart_renders_rows_in_line_order() {
        let mut engine = engine();
        engine.add(pid(1)).unwrap();
        engine.add(pid(1)).unwrap();
        engine.add(pid(3)).unwrap();

        let panel = render_cart_panel(&engine);
        let CartPanelView::Items {
            rows,
            total,
            total_display,
        } = &panel
        else {
            panic!("Expected Items panel");
        };

        assert_eq!(*total, 62_000);
        assert_eq!(total_display, "62,000");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "종합 비타민");
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[0].subtotal_display, "50,000원");
        assert_eq!(rows[1].unit_price_display, "12,000원");
        assert_eq!(rows[1].actions[2], CartAction::Remove(pid(3)));
        assert_eq!(render_badge(&engine).count, 3);
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut engine = engine();
        engine.add(pid(5)).unwrap();
        engine.add(pid(8)).unwrap();

        assert_eq!(render_cart_panel(&engine), render_cart_panel(&engine));
        assert_eq!(render_badge(&engine), render_badge(&engine));

        let catalog = Catalog::seeded();
        let products: Vec<&Product> = catalog.list().iter().collect();
        assert_eq!(render_catalog_grid(&products), render_catalog_grid(&products));
    }

    #[test]
    fn product_card_texts_and_stagger() {
        let catalog = Catalog::seeded();
        let products: Vec<&Product> = catalog.list().iter().collect();
        let grid = render_catalog_grid(&products);

        assert_eq!(grid.cards.len(), 12);
        let first = &grid.cards[0];
        assert_eq!(first.rating_text, "4.8 (1250개 리뷰)");
        assert_eq!(first.price_display, "25,000원");
        assert_eq!(first.category_label, "비타민 & 미네랄");
        assert_eq!(first.enter_delay, Duration::from_millis(100));
        assert_eq!(grid.cards[3].enter_delay, Duration::from_millis(400));
        assert_eq!(
            first.actions,
            [CardAction::AddToCart(pid(1)), CardAction::BuyNow(pid(1))]
        );
    }

    #[test]
    fn text_adapter_draws_panel_and_badge() {
        let mut engine = engine();
        assert_eq!(render_badge(&engine).to_string(), "[장바구니]");
        assert!(render_cart_panel(&engine).to_string().contains(EMPTY_CART_MESSAGE));

        engine.add(pid(2)).unwrap();
        let text = render_cart_panel(&engine).to_string();
        assert!(text.contains("x1"));
        assert!(text.contains("합계: "));
        assert_eq!(render_badge(&engine).to_string(), "[장바구니 1]");
    }
}

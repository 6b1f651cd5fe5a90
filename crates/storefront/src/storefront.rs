//! The storefront session controller.
//!
//! Every user-facing operation follows the same path: engine mutation, then a
//! notification, then the applied events go out on the bus and (when enabled) the
//! cart is saved. Views are never stored; [`Storefront::screen`] re-renders them
//! from current state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use vitashop_cart::{CartEngine, CartEvent};
use vitashop_catalog::{Catalog, CategoryFilter, Product, SortKey};
use vitashop_core::{DomainResult, ProductId};
use vitashop_events::{Event, EventBus, InMemoryEventBus, Subscription};

use crate::clock::Clock;
use crate::contact::{CONTACT_INCOMPLETE_MESSAGE, CONTACT_SENT_MESSAGE, ContactForm, Inquiry};
use crate::notify::{Notification, NotificationCenter};
use crate::render::{
    BadgeView, CardAction, CartAction, CartPanelView, CatalogGridView, render_badge,
    render_cart_panel, render_catalog_grid,
};
use crate::storage::{CartStore, KeyValueStore, SharedStore};

pub const REMOVED_MESSAGE: &str = "제품이 장바구니에서 제거되었습니다.";

pub fn added_message(product_name: &str) -> String {
    format!("{product_name}이(가) 장바구니에 추가되었습니다.")
}

/// Which products the grid shows. Each query starts from the full catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridQuery {
    Filter(CategoryFilter),
    Search(String),
    Sort(SortKey),
}

impl Default for GridQuery {
    fn default() -> Self {
        GridQuery::Filter(CategoryFilter::All)
    }
}

/// Snapshot of everything currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub grid: CatalogGridView,
    pub badge: BadgeView,
    /// Present only while the cart modal is open.
    pub cart_panel: Option<CartPanelView>,
    pub notification: Option<Notification>,
}

pub struct Storefront<C, S = SharedStore> {
    engine: CartEngine,
    clock: C,
    notifications: NotificationCenter,
    bus: InMemoryEventBus<CartEvent>,
    cart_store: Option<CartStore<S>>,
    query: GridQuery,
    cart_open: bool,
}

impl<C: Clock> Storefront<C, SharedStore> {
    /// A session without persistence.
    pub fn new(catalog: Arc<Catalog>, clock: C) -> Self {
        Self::build(catalog, clock, None)
    }
}

impl<C: Clock, S: KeyValueStore> Storefront<C, S> {
    /// A session that restores the cart from `store` and saves it after every change.
    pub fn with_persistence(catalog: Arc<Catalog>, clock: C, store: S) -> Self {
        let cart_store = CartStore::new(store);
        let persisted = cart_store.load();
        let mut storefront = Self::build(catalog, clock, None);

        let discarded = storefront.engine.restore(persisted);
        tracing::info!(
            lines = storefront.engine.lines().len(),
            discarded,
            "restored persisted cart"
        );
        if discarded > 0 && !cart_store.save(storefront.engine.lines()) {
            tracing::warn!("cleaned cart was not persisted");
        }

        storefront.cart_store = Some(cart_store);
        storefront
    }

    fn build(catalog: Arc<Catalog>, clock: C, cart_store: Option<CartStore<S>>) -> Self {
        Self {
            engine: CartEngine::new(catalog),
            clock,
            notifications: NotificationCenter::default(),
            bus: InMemoryEventBus::new(),
            cart_store,
            query: GridQuery::default(),
            cart_open: false,
        }
    }

    pub fn with_notification_display(mut self, display_for: Duration) -> Self {
        self.notifications = NotificationCenter::new(display_for);
        self
    }

    pub fn engine(&self) -> &CartEngine {
        &self.engine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn query(&self) -> &GridQuery {
        &self.query
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn is_persistent(&self) -> bool {
        self.cart_store.is_some()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// Receive every cart event applied after this call.
    pub fn subscribe(&self) -> Subscription<CartEvent> {
        self.bus.subscribe()
    }

    pub fn add_to_cart(&mut self, product_id: ProductId) -> DomainResult<Vec<CartEvent>> {
        let events = self.engine.add(product_id)?;
        if let Some(product) = self
            .engine
            .catalog()
            .find(product_id)
            .filter(|_| !events.is_empty())
        {
            let message = added_message(&product.name);
            self.notify(message);
        }
        self.commit(&events);
        Ok(events)
    }

    /// Drop a line. The removal notice is shown even when the line was absent.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> DomainResult<Vec<CartEvent>> {
        let events = self.engine.remove(product_id)?;
        self.notify(REMOVED_MESSAGE);
        self.commit(&events);
        Ok(events)
    }

    /// Shift a line's quantity; reaching zero removes it with the removal notice.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> DomainResult<Vec<CartEvent>> {
        let events = self.engine.update_quantity(product_id, delta)?;
        if events
            .iter()
            .any(|e| matches!(e, CartEvent::ItemRemoved { .. }))
        {
            self.notify(REMOVED_MESSAGE);
        }
        self.commit(&events);
        Ok(events)
    }

    pub fn clear_cart(&mut self) -> DomainResult<Vec<CartEvent>> {
        let events = self.engine.clear()?;
        self.commit(&events);
        Ok(events)
    }

    /// Add one unit and open the cart.
    pub fn buy_now(&mut self, product_id: ProductId) -> DomainResult<Vec<CartEvent>> {
        let events = self.add_to_cart(product_id)?;
        self.open_cart();
        Ok(events)
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    pub fn dispatch_cart(&mut self, action: CartAction) -> DomainResult<Vec<CartEvent>> {
        match action {
            CartAction::Decrement(id) => self.update_quantity(id, -1),
            CartAction::Increment(id) => self.update_quantity(id, 1),
            CartAction::Remove(id) => self.remove_from_cart(id),
        }
    }

    pub fn dispatch_card(&mut self, action: CardAction) -> DomainResult<Vec<CartEvent>> {
        match action {
            CardAction::AddToCart(id) => self.add_to_cart(id),
            CardAction::BuyNow(id) => self.buy_now(id),
        }
    }

    pub fn filter(&mut self, filter: CategoryFilter) {
        self.query = GridQuery::Filter(filter);
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = GridQuery::Search(query.into());
    }

    pub fn sort(&mut self, key: SortKey) {
        self.query = GridQuery::Sort(key);
    }

    /// Validate and accept a contact form, notifying either way.
    pub fn submit_contact(&mut self, form: ContactForm) -> DomainResult<Inquiry> {
        match form.submit(Utc::now()) {
            Ok(inquiry) => {
                self.notify(CONTACT_SENT_MESSAGE);
                Ok(inquiry)
            }
            Err(err) => {
                tracing::debug!(error = %err, "contact form rejected");
                self.notify(CONTACT_INCOMPLETE_MESSAGE);
                Err(err)
            }
        }
    }

    /// Fire any timers that are due on the injected clock.
    pub fn tick(&mut self) {
        self.notifications.tick(self.clock.now());
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        let catalog = self.engine.catalog();
        match &self.query {
            GridQuery::Filter(filter) => catalog.filter(*filter),
            GridQuery::Search(query) => catalog.search(query),
            GridQuery::Sort(key) => catalog.sorted(*key),
        }
    }

    pub fn screen(&self) -> Screen {
        Screen {
            grid: render_catalog_grid(&self.visible_products()),
            badge: render_badge(&self.engine),
            cart_panel: self.cart_open.then(|| render_cart_panel(&self.engine)),
            notification: self.notifications.current().cloned(),
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        let now = self.clock.now();
        self.notifications.tick(now);
        self.notifications.show(message, now);
    }

    /// Publish applied events and save the cart. Empty batches change nothing.
    fn commit(&mut self, events: &[CartEvent]) {
        if events.is_empty() {
            return;
        }

        for event in events {
            if let Err(err) = self.bus.publish(event.clone()) {
                tracing::warn!(
                    event_type = event.event_type(),
                    ?err,
                    "failed to publish cart event"
                );
            }
        }

        if let Some(store) = &self.cart_store {
            if !store.save(self.engine.lines()) {
                tracing::warn!("cart changes were not persisted");
            }
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.badge)?;
        if let Some(notification) = &self.notification {
            writeln!(f, "» {}", notification.message)?;
        }
        write!(f, "{}", self.grid)?;
        if let Some(panel) = &self.cart_panel {
            write!(f, "{panel}")?;
        }
        Ok(())
    }
}

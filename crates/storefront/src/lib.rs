//! `vitashop-storefront`
//!
//! **Responsibility:** the storefront session around the cart engine.
//!
//! This crate provides:
//! - Render sync: pure view models for the product grid, cart panel and badge
//! - Notifications with cancellable, clock-driven dismissal
//! - Best-effort key-value storage (cart contents, user settings)
//! - The contact form and a generic JSON API client
//! - Formatting and validation helpers
//!
//! The [`Storefront`] controller wires these together; the `vitashop` binary is a
//! thin text shell around it.

pub mod animation;
pub mod api;
pub mod clock;
pub mod config;
pub mod contact;
pub mod format;
pub mod notify;
pub mod pacing;
pub mod render;
pub mod storage;
pub mod storefront;
pub mod util;
pub mod validate;

pub use animation::{Frame, Tween, TweenKind};
pub use api::{ApiClient, ApiError, ApiResult};
pub use clock::{Clock, SystemClock, TimerId, TimerQueue, VirtualClock};
pub use config::{ConfigError, StorageBackend, StorefrontConfig};
pub use contact::{ContactForm, Inquiry};
pub use notify::{Notification, NotificationCenter, NotificationPhase};
pub use pacing::{Debouncer, Throttle};
pub use render::{
    BadgeView, CardAction, CartAction, CartPanelView, CartRowView, CatalogGridView,
    ProductCardView, render_badge, render_cart_panel, render_catalog_grid,
};
pub use storage::{
    CartStore, KeyValueStore, MemoryStore, Settings, SharedStore, SqliteStore, Storage,
    StorageError, UserSettings,
};
pub use storefront::{GridQuery, Screen, Storefront};

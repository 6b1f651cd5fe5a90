//! Typed records kept in the key-value store: the cart and user settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vitashop_cart::CartLine;

use super::{KeyValueStore, Storage};
use crate::util::merge_json;

pub const CART_KEY: &str = "healthcare_cart";
pub const SETTINGS_KEY: &str = "healthcare_settings";

/// Cart lines under [`CART_KEY`].
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: Storage<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: Storage::new(store),
        }
    }

    pub fn save(&self, lines: &[CartLine]) -> bool {
        self.storage.set(CART_KEY, lines)
    }

    /// Saved lines, or an empty cart when nothing usable is stored.
    pub fn load(&self) -> Vec<CartLine> {
        self.storage.get(CART_KEY, Vec::new())
    }

    pub fn clear(&self) -> bool {
        self.storage.remove(CART_KEY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub theme: String,
    pub language: String,
    pub currency: String,
    pub notifications: bool,
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            language: "ko".to_string(),
            currency: "KRW".to_string(),
            notifications: true,
            auto_save: true,
        }
    }
}

/// Settings under [`SETTINGS_KEY`], stored as a JSON object over the defaults.
///
/// Keys outside [`Settings`] are kept as-is so newer writers don't lose data.
#[derive(Debug, Clone)]
pub struct UserSettings<S> {
    storage: Storage<S>,
}

impl<S: KeyValueStore> UserSettings<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: Storage::new(store),
        }
    }

    pub fn load(&self) -> Settings {
        match serde_json::from_value(Value::Object(self.raw())) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(error = %err, "stored settings are invalid; using defaults");
                Settings::default()
            }
        }
    }

    /// Deep-merge `patch` (a JSON object) over the current settings and store the
    /// result. Patches that are not objects or that break a typed field are rejected.
    pub fn save(&self, patch: &Value) -> bool {
        if !patch.is_object() {
            tracing::warn!("settings patch must be a JSON object");
            return false;
        }

        let mut merged = Value::Object(self.raw());
        merge_json(&mut merged, patch);

        if let Err(err) = serde_json::from_value::<Settings>(merged.clone()) {
            tracing::warn!(error = %err, "rejected settings patch");
            return false;
        }
        self.storage.set(SETTINGS_KEY, &merged)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.raw().remove(key)
    }

    pub fn set(&self, key: &str, value: Value) -> bool {
        let mut patch = Map::new();
        patch.insert(key.to_string(), value);
        self.save(&Value::Object(patch))
    }

    /// Defaults overlaid with whatever object is stored.
    fn raw(&self) -> Map<String, Value> {
        let mut merged = serde_json::to_value(Settings::default()).unwrap_or(Value::Null);
        if let Value::Object(stored) = self.storage.get(SETTINGS_KEY, Value::Null) {
            merge_json(&mut merged, &Value::Object(stored));
        }
        match merged {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

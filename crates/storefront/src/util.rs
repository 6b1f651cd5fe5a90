//! String helpers, id generation and JSON deep merge.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel pattern is valid"));
static KEBAB_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([a-z])").expect("kebab pattern is valid"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Cut to `max` characters and append `...` when anything was removed.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `backgroundColor` → `background-color`.
pub fn camel_to_kebab(s: &str) -> String {
    CAMEL_BOUNDARY.replace_all(s, "$1-$2").to_lowercase()
}

/// `background-color` → `backgroundColor`.
pub fn kebab_to_camel(s: &str) -> String {
    KEBAB_SEGMENT
        .replace_all(s, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Text content of an HTML fragment: tags dropped, basic entities decoded.
pub fn strip_html(html: &str) -> String {
    HTML_TAG
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// `{prefix}_{unix millis}_{9 base36 chars}`.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    // The low bits of a v7 UUID are random.
    let mut bits = uuid::Uuid::now_v7().as_u128() as u64;
    let mut suffix = String::with_capacity(9);
    for _ in 0..9 {
        let digit = (bits % 36) as u32;
        bits /= 36;
        suffix.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    format!("{prefix}_{millis}_{suffix}")
}

/// Recursively merge `patch` into `target`.
///
/// Objects merge key by key; any other patch value (arrays included) replaces the
/// target value wholesale.
pub fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                let nested = value.is_object() && target.get(key).is_some_and(Value::is_object);
                if let Some(existing) = target.get_mut(key).filter(|_| nested) {
                    merge_json(existing, value);
                } else {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

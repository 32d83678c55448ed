//! Canonical wishlist records
//!
//! The wishlist backend returns each field under its `snake_case` name, its
//! sheet-style `"Title Case"` name, or both. Records are folded into one
//! shape here so nothing downstream has to look at both keys.

use crate::booking::SearchQuery;
use crate::error::{BookingCoreError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// `(canonical key, title-case key)` for every wishlist field
const FIELD_KEYS: [(&str, &str); 13] = [
    ("wishlist_id", "Wishlist ID"),
    ("customer_id", "Customer ID"),
    ("hotel_code", "Hotel Code"),
    ("hotel_name", "Hotel Name"),
    ("hotel_rating", "Hotel Rating"),
    ("address", "Address"),
    ("city", "City"),
    ("country", "Country"),
    ("price", "Price"),
    ("currency", "Currency"),
    ("image_url", "Image URL"),
    ("search_params", "Search Params"),
    ("created_at", "Created At"),
];

/// Currency assumed when a record has none
const DEFAULT_CURRENCY: &str = "USD";

/// Strings, or numbers rendered as strings (sheet IDs often come back numeric)
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers, or numeric strings; anything else is treated as absent
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// One saved hotel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub wishlist_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hotel_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hotel_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hotel_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    /// Search parameters as stored: a JSON object encoded as a string
    #[serde(default, deserialize_with = "lenient_string")]
    pub search_params: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

impl WishlistItem {
    /// Fold a raw record into canonical keys
    ///
    /// The `snake_case` key wins when it holds a non-null, non-empty value.
    /// Keys outside the known field set are dropped.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let Value::Object(fields) = raw else {
            return Err(BookingCoreError::DeserializationError(
                "wishlist record is not an object".to_string(),
            ));
        };

        let mut canonical = Map::with_capacity(FIELD_KEYS.len());
        for (snake, title) in FIELD_KEYS {
            let picked = [snake, title]
                .into_iter()
                .filter_map(|key| fields.get(key))
                .find(|value| !is_blank(value));
            if let Some(value) = picked {
                canonical.insert(snake.to_string(), value.clone());
            }
        }

        serde_json::from_value(Value::Object(canonical))
            .map_err(|e| BookingCoreError::DeserializationError(e.to_string()))
    }

    pub fn currency_or_default(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// Stored search parameters, if present and decodable
    pub fn search_query(&self) -> Option<SearchQuery> {
        let raw = self.search_params.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => Some(SearchQuery::from_json_object(&object)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, wishlist_id = ?self.wishlist_id, "unreadable wishlist search params");
                None
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Wishlist endpoint response with normalized items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WishlistResponse {
    pub success: bool,
    pub message: Option<String>,
    pub data: Vec<WishlistItem>,
    pub count: usize,
}

impl WishlistResponse {
    /// Parse a response body; records that cannot be normalized are skipped
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: Value =
            serde_json::from_str(body).map_err(|e| BookingCoreError::DeserializationError(e.to_string()))?;

        let data: Vec<WishlistItem> = match raw.get("data") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match WishlistItem::from_value(item) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(error = %e, "skipping wishlist record");
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        let count = raw
            .get("count")
            .and_then(Value::as_u64)
            .map(|count| count as usize)
            .unwrap_or(data.len());

        Ok(Self {
            success: raw.get("success").and_then(Value::as_bool).unwrap_or(false),
            message: raw.get("message").and_then(Value::as_str).map(str::to_string),
            data,
            count,
        })
    }
}

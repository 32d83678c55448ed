//! Price conversion for hotel inventory records
//!
//! Inventory records are loosely typed JSON, so conversion works on
//! `serde_json::Value` and only touches the price fields it knows.

use super::converter::{CurrencyTable, BASE_CURRENCY};
use serde_json::{Map, Value};

const ROOM_PRICE_FIELDS: [&str; 3] = ["TotalFare", "TotalTax", "BasePrice"];

/// USD amount held by a price field, if it is a non-zero number or a numeric string
fn usd_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| *v != 0.0),
        Value::String(s) if !s.is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn tag_currency(record: &mut Map<String, Value>, target: &str) {
    record.insert("Currency".to_string(), Value::from(target));
    record.insert("OriginalCurrency".to_string(), Value::from(BASE_CURRENCY));
}

/// Convert a room's fare fields from USD into `target`
pub fn convert_room_prices(room: &Value, target: &str, table: &CurrencyTable) -> Value {
    let Value::Object(fields) = room else {
        return room.clone();
    };

    let mut converted = fields.clone();
    for field in ROOM_PRICE_FIELDS {
        if let Some(usd) = fields.get(field).and_then(usd_amount) {
            converted.insert(field.to_string(), Value::from(table.convert(usd, target)));
        }
    }
    tag_currency(&mut converted, target);
    Value::Object(converted)
}

/// Convert a hotel's headline price and all of its rooms from USD into `target`
pub fn convert_hotel_prices(hotel: &Value, target: &str, table: &CurrencyTable) -> Value {
    let Value::Object(fields) = hotel else {
        return hotel.clone();
    };

    let mut converted = fields.clone();
    if let Some(usd) = fields.get("Price").and_then(usd_amount) {
        converted.insert("Price".to_string(), Value::from(table.convert(usd, target)));
    }
    tag_currency(&mut converted, target);

    match fields.get("Rooms") {
        Some(Value::Array(rooms)) => {
            let rooms = rooms
                .iter()
                .map(|room| convert_room_prices(room, target, table))
                .collect();
            converted.insert("Rooms".to_string(), Value::Array(rooms));
        }
        Some(room @ Value::Object(_)) => {
            converted.insert("Rooms".to_string(), convert_room_prices(room, target, table));
        }
        _ => {}
    }

    Value::Object(converted)
}

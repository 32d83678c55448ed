//! Room Guests Core - room and guest configuration for hotel search and booking
//!
//! This crate holds the per-room guest model shared by the availability
//! widget and the booking-details modal, plus the pure helpers that turn it
//! into a search or booking request: stay dates, query decoding, display
//! currency conversion and wishlist normalization. Python bindings are
//! provided via PyO3.

use pyo3::prelude::*;

pub mod booking;
pub mod config;
pub mod currency;
pub mod error;
pub mod guests;
pub mod wishlist;

use crate::booking::{format_date_range as render_date_range, StayDates};
use crate::config::{deserialize_core_config, CoreConfig};
use crate::currency::convert_hotel_prices as convert_hotel_value;
use crate::error::BookingCoreError;
use crate::guests::{format_summary, RoomGuestSession};
use crate::wishlist::WishlistResponse;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use pyo3::types::PyDict;
use std::sync::Arc;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Global cached configuration
static CACHED_CONFIG: OnceCell<Arc<RwLock<CoreConfig>>> = OnceCell::new();

/// Built-in configuration used until `init_config` is called
static DEFAULT_CONFIG: Lazy<CoreConfig> = Lazy::new(CoreConfig::new);

/// Run `f` against the active configuration
pub fn with_config<R>(f: impl FnOnce(&CoreConfig) -> R) -> R {
    match CACHED_CONFIG.get() {
        Some(cached) => f(&*cached.read()),
        None => f(&DEFAULT_CONFIG),
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Initialize or replace the cached configuration
///
/// # Arguments
/// * `config` - Optional dict with `limits`, `age_policies` and `exchange_rates`;
///   omitted keys keep their defaults
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
    let core = match config {
        Some(dict) => deserialize_core_config(dict)?,
        None => CoreConfig::new(),
    };

    tracing::debug!(
        max_rooms = core.limits.max_rooms,
        currencies = core.currencies.supported_currencies().len(),
        "guest core configuration loaded"
    );

    // If already initialized, update the config
    if let Some(existing) = CACHED_CONFIG.get() {
        let mut guard = existing.write();
        *guard = core;
    } else {
        let _ = CACHED_CONFIG.set(Arc::new(RwLock::new(core)));
    }

    Ok(())
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_CONFIG.get().is_some()
}

/// Guest label such as "2 adults · 1 child · 1 room"
#[pyfunction]
fn format_guest_summary(adults: u32, children: u32, rooms: usize) -> String {
    format_summary(adults, children, rooms)
}

/// Validate a stay and return its number of nights
///
/// # Raises
/// ValueError if a date is missing, malformed, or check-out is not after check-in
#[pyfunction]
#[pyo3(signature = (check_in, check_out))]
fn validate_stay(check_in: Option<&str>, check_out: Option<&str>) -> PyResult<i64> {
    Ok(StayDates::parse(check_in, check_out)?.nights())
}

/// Search bar date label, "Select dates" when the stay is incomplete or invalid
#[pyfunction]
#[pyo3(signature = (check_in=None, check_out=None))]
fn format_date_range(check_in: Option<&str>, check_out: Option<&str>) -> String {
    render_date_range(StayDates::parse(check_in, check_out).ok().as_ref())
}

/// Convert a USD amount into `currency`
#[pyfunction]
fn convert_currency(usd_amount: f64, currency: &str) -> f64 {
    with_config(|config| config.currencies.convert(usd_amount, currency))
}

/// Format an amount already expressed in `currency`
#[pyfunction]
#[pyo3(signature = (amount, currency, decimals=2))]
fn format_price(amount: f64, currency: &str, decimals: usize) -> String {
    with_config(|config| config.currencies.format_price(amount, currency, decimals))
}

/// Convert a USD amount and format it in one step
#[pyfunction]
#[pyo3(signature = (usd_amount, currency, decimals=2))]
fn convert_and_format_price(usd_amount: f64, currency: &str, decimals: usize) -> String {
    with_config(|config| {
        config
            .currencies
            .convert_and_format(usd_amount, currency, decimals)
    })
}

/// Supported currency codes in table order
#[pyfunction]
fn supported_currencies() -> Vec<String> {
    with_config(|config| {
        config
            .currencies
            .supported_currencies()
            .into_iter()
            .map(str::to_string)
            .collect()
    })
}

/// Symbol and name of a supported currency
///
/// # Raises
/// KeyError if the currency is not in the table
#[pyfunction]
fn currency_info(currency: &str) -> PyResult<(f64, String, String)> {
    let info = with_config(|config| config.currencies.require(currency).cloned())?;
    Ok((info.rate, info.symbol, info.name))
}

/// Convert a hotel record (JSON) from USD into `currency`, returning JSON
#[pyfunction]
fn convert_hotel_prices(hotel_json: &str, currency: &str) -> PyResult<String> {
    let hotel: serde_json::Value = serde_json::from_str(hotel_json)
        .map_err(|e| BookingCoreError::DeserializationError(e.to_string()))?;
    let converted = with_config(|config| convert_hotel_value(&hotel, currency, &config.currencies));
    Ok(serde_json::to_string(&converted)
        .map_err(|e| BookingCoreError::SerializationError(e.to_string()))?)
}

/// Normalize a wishlist response body into canonical keys, returning JSON
#[pyfunction]
fn normalize_wishlist(body: &str) -> PyResult<String> {
    let response = WishlistResponse::from_json(body)?;
    Ok(serde_json::to_string(&response)
        .map_err(|e| BookingCoreError::SerializationError(e.to_string()))?)
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn room_guests_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(format_guest_summary, m)?)?;
    m.add_function(wrap_pyfunction!(validate_stay, m)?)?;
    m.add_function(wrap_pyfunction!(format_date_range, m)?)?;
    m.add_function(wrap_pyfunction!(convert_currency, m)?)?;
    m.add_function(wrap_pyfunction!(format_price, m)?)?;
    m.add_function(wrap_pyfunction!(convert_and_format_price, m)?)?;
    m.add_function(wrap_pyfunction!(supported_currencies, m)?)?;
    m.add_function(wrap_pyfunction!(currency_info, m)?)?;
    m.add_function(wrap_pyfunction!(convert_hotel_prices, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_wishlist, m)?)?;
    m.add_class::<RoomGuestSession>()?;
    Ok(())
}

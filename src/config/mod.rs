//! Configuration module for guest limits, age policies and currency rates
//!
//! This module handles deserialization of the core configuration from Python dicts.

mod age;
mod currency;
mod limits;

pub use age::*;
pub use currency::*;
pub use limits::*;

use crate::currency::CurrencyTable;
use crate::error::BookingCoreError;
use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
use pyo3::Bound;

/// Complete configuration injected into sessions
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub limits: GuestLimits,
    /// Child ages offered by the availability widget
    pub availability_ages: AgePolicy,
    /// Child ages offered by the booking-details modal
    pub booking_ages: AgePolicy,
    pub currencies: CurrencyTable,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreConfig {
    pub fn new() -> Self {
        Self {
            limits: GuestLimits::default(),
            availability_ages: AgePolicy::free_choice(),
            booking_ages: AgePolicy::with_unset_sentinel(),
            currencies: CurrencyTable::default(),
        }
    }

    /// Age policy used by `widget`
    pub fn age_policy(&self, widget: GuestWidget) -> AgePolicy {
        match widget {
            GuestWidget::Availability => self.availability_ages,
            GuestWidget::BookingDetails => self.booking_ages,
        }
    }
}

/// Helper to get optional attribute from either dict or object
fn get_attr_opt<'py>(obj: &Bound<'py, pyo3::PyAny>, name: &str) -> Option<Bound<'py, pyo3::PyAny>> {
    let value = if let Ok(dict) = obj.downcast::<PyDict>() {
        dict.get_item(name).ok().flatten()
    } else {
        obj.getattr(name).ok()
    };
    value.filter(|v| !v.is_none())
}

/// Deserialize the core configuration from a Python dict
///
/// Every key is optional:
/// `{"limits": {...}, "age_policies": {"availability": {...}, "booking": {...}},
///   "exchange_rates": {"AED": {"rate": 3.67, "symbol": "AED", "name": "UAE Dirham"}}}`
pub fn deserialize_core_config(config: &Bound<'_, PyDict>) -> pyo3::PyResult<CoreConfig> {
    let mut core = CoreConfig::new();
    let config = config.as_any();

    if let Some(limits_obj) = get_attr_opt(config, "limits") {
        core.limits = extract_limits(&limits_obj)?;
    }

    if let Some(policies) = get_attr_opt(config, "age_policies") {
        if let Some(policy) = get_attr_opt(&policies, "availability") {
            core.availability_ages = extract_age_policy(&policy, core.availability_ages)?;
        }
        // Support both "booking" and "booking_details" keys
        if let Some(policy) =
            get_attr_opt(&policies, "booking").or_else(|| get_attr_opt(&policies, "booking_details"))
        {
            core.booking_ages = extract_age_policy(&policy, core.booking_ages)?;
        }
    }

    if let Some(rates_obj) = get_attr_opt(config, "exchange_rates") {
        core.currencies = extract_currency_table(&rates_obj)?;
    }

    Ok(core)
}

fn extract_limits(obj: &Bound<'_, pyo3::PyAny>) -> pyo3::PyResult<GuestLimits> {
    let defaults = GuestLimits::default();
    let limits = GuestLimits {
        max_rooms: get_attr_opt(obj, "max_rooms").and_then(|v| v.extract().ok()).unwrap_or(defaults.max_rooms),
        min_adults: get_attr_opt(obj, "min_adults").and_then(|v| v.extract().ok()).unwrap_or(defaults.min_adults),
        max_adults: get_attr_opt(obj, "max_adults").and_then(|v| v.extract().ok()).unwrap_or(defaults.max_adults),
        max_children: get_attr_opt(obj, "max_children").and_then(|v| v.extract().ok()).unwrap_or(defaults.max_children),
        default_child_age: get_attr_opt(obj, "default_child_age")
            .and_then(|v| v.extract().ok())
            .unwrap_or(defaults.default_child_age),
    };

    if limits.max_rooms == 0 || limits.min_adults == 0 || limits.min_adults > limits.max_adults {
        return Err(BookingCoreError::DeserializationError(format!(
            "invalid guest limits: {:?}",
            limits
        ))
        .into());
    }
    Ok(limits)
}

fn extract_age_policy(obj: &Bound<'_, pyo3::PyAny>, fallback: AgePolicy) -> pyo3::PyResult<AgePolicy> {
    let policy = AgePolicy {
        min: get_attr_opt(obj, "min").and_then(|v| v.extract().ok()).unwrap_or(fallback.min),
        max: get_attr_opt(obj, "max").and_then(|v| v.extract().ok()).unwrap_or(fallback.max),
        // Support both "has_unset_sentinel" and "hasUnsetSentinel" field names
        has_unset_sentinel: get_attr_opt(obj, "has_unset_sentinel")
            .or_else(|| get_attr_opt(obj, "hasUnsetSentinel"))
            .and_then(|v| v.extract().ok())
            .unwrap_or(fallback.has_unset_sentinel),
    };

    if policy.min > policy.max {
        return Err(BookingCoreError::DeserializationError(format!(
            "age policy min {} exceeds max {}",
            policy.min, policy.max
        ))
        .into());
    }
    Ok(policy)
}

fn extract_currency_table(obj: &Bound<'_, pyo3::PyAny>) -> pyo3::PyResult<CurrencyTable> {
    let rates: Bound<'_, PyDict> = obj.extract()?;
    let mut entries = Vec::with_capacity(rates.len());

    for (key, value) in rates.iter() {
        let code: String = key.extract()?;
        // Accept either a bare rate or a full {rate, symbol, name} entry
        let info = if let Ok(rate) = value.extract::<f64>() {
            CurrencyInfo::new(rate, &code, &code)
        } else {
            let rate: f64 = get_attr_opt(&value, "rate")
                .ok_or_else(|| {
                    BookingCoreError::DeserializationError(format!("rate missing for {}", code))
                })?
                .extract()?;
            let symbol: String = get_attr_opt(&value, "symbol")
                .and_then(|v| v.extract().ok())
                .unwrap_or_else(|| code.clone());
            let name: String = get_attr_opt(&value, "name")
                .and_then(|v| v.extract().ok())
                .unwrap_or_else(|| code.clone());
            CurrencyInfo { rate, symbol, name }
        };
        entries.push((code, info));
    }

    Ok(CurrencyTable::new(entries))
}

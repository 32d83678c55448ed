//! USD to display-currency conversion table and price formatting
//!
//! Hotel inventory prices arrive in USD only. Payment is still taken in AED,
//! so these conversions are for display.

use crate::config::CurrencyInfo;
use crate::error::{BookingCoreError, Result};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

/// Currency every inventory price is quoted in
pub const BASE_CURRENCY: &str = "USD";

/// Built-in rates relative to USD
const DEFAULT_RATES: [(&str, f64, &str, &str); 13] = [
    ("USD", 1.0, "$", "US Dollar"),
    ("AED", 3.67, "AED", "UAE Dirham"),
    ("SAR", 3.75, "SAR", "Saudi Riyal"),
    ("EUR", 0.92, "€", "Euro"),
    ("GBP", 0.79, "£", "British Pound"),
    ("INR", 83.12, "₹", "Indian Rupee"),
    ("PKR", 278.50, "PKR", "Pakistani Rupee"),
    ("BDT", 109.50, "BDT", "Bangladeshi Taka"),
    ("EGP", 30.90, "EGP", "Egyptian Pound"),
    ("JPY", 149.50, "¥", "Japanese Yen"),
    ("CNY", 7.24, "¥", "Chinese Yuan"),
    ("AUD", 1.52, "A$", "Australian Dollar"),
    ("CAD", 1.36, "C$", "Canadian Dollar"),
];

static DEFAULT_TABLE: Lazy<CurrencyTable> = Lazy::new(|| {
    CurrencyTable::new(
        DEFAULT_RATES
            .iter()
            .map(|(code, rate, symbol, name)| (code.to_string(), CurrencyInfo::new(*rate, symbol, name))),
    )
});

/// Converted price with its display string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedPrice {
    pub price: f64,
    pub currency: String,
    pub formatted: String,
}

/// Ordered currency table with a code index
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    entries: Vec<(String, CurrencyInfo)>,
    index: AHashMap<String, usize>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl CurrencyTable {
    /// Build a table; a repeated code replaces the earlier entry in place
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, CurrencyInfo)>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: AHashMap::new(),
        };
        for (code, info) in entries {
            match table.index.get(&code) {
                Some(&idx) => table.entries[idx].1 = info,
                None => {
                    table.index.insert(code.clone(), table.entries.len());
                    table.entries.push((code, info));
                }
            }
        }
        table
    }

    #[inline]
    pub fn info(&self, code: &str) -> Option<&CurrencyInfo> {
        self.index.get(code).map(|&idx| &self.entries[idx].1)
    }

    /// Like `info`, but an unknown code is an error
    pub fn require(&self, code: &str) -> Result<&CurrencyInfo> {
        self.info(code)
            .ok_or_else(|| BookingCoreError::UnsupportedCurrency(code.to_string()))
    }

    /// Rate for `code`; unknown codes and zero rates fall back to 1
    #[inline]
    pub fn rate(&self, code: &str) -> f64 {
        self.info(code)
            .map(|info| info.rate)
            .filter(|rate| *rate != 0.0)
            .unwrap_or(1.0)
    }

    /// Convert a USD amount into `code`
    pub fn convert(&self, usd_amount: f64, code: &str) -> f64 {
        let converted = usd_amount * self.rate(code);
        debug!(usd_amount, currency = code, converted, "currency conversion");
        converted
    }

    /// Format `amount` as `"<symbol> <grouped amount>"`
    ///
    /// Unknown codes use the USD symbol.
    pub fn format_price(&self, amount: f64, code: &str, decimals: usize) -> String {
        let symbol = self
            .info(code)
            .or_else(|| self.info(BASE_CURRENCY))
            .map(|info| info.symbol.as_str())
            .unwrap_or("$");
        format!("{} {}", symbol, group_thousands(amount, decimals))
    }

    pub fn convert_and_format(&self, usd_amount: f64, code: &str, decimals: usize) -> String {
        self.format_price(self.convert(usd_amount, code), code, decimals)
    }

    pub fn convert_price(&self, usd_amount: f64, code: &str) -> ConvertedPrice {
        let price = self.convert(usd_amount, code);
        ConvertedPrice {
            price,
            currency: code.to_string(),
            formatted: self.format_price(price, code, 2),
        }
    }

    /// Display symbol, or the code itself when unknown
    pub fn symbol<'a>(&'a self, code: &'a str) -> &'a str {
        self.info(code).map(|info| info.symbol.as_str()).unwrap_or(code)
    }

    /// Display name, or the code itself when unknown
    pub fn name<'a>(&'a self, code: &'a str) -> &'a str {
        self.info(code).map(|info| info.name.as_str()).unwrap_or(code)
    }

    #[inline]
    pub fn is_supported(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Supported codes in table order
    pub fn supported_currencies(&self) -> Vec<&str> {
        self.entries.iter().map(|(code, _)| code.as_str()).collect()
    }
}

/// en-US number formatting: comma thousands separators, fixed decimals
pub fn group_thousands(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    // Negative zero after rounding prints without a sign
    if amount < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_known_and_unknown() {
        let table = CurrencyTable::default();
        assert!((table.convert(100.0, "AED") - 367.0).abs() < 1e-9);
        assert!((table.convert(100.0, "XYZ") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_price() {
        let table = CurrencyTable::default();
        assert_eq!(table.format_price(1234567.891, "USD", 2), "$ 1,234,567.89");
        assert_eq!(table.format_price(999.6, "EUR", 0), "€ 1,000");
        assert_eq!(table.format_price(12.0, "XYZ", 2), "$ 12.00");
        assert_eq!(table.format_price(3.5, "AED", 2), "AED 3.50");
    }

    #[test]
    fn test_convert_and_format() {
        let table = CurrencyTable::default();
        assert_eq!(table.convert_and_format(1000.0, "INR", 2), "₹ 83,120.00");
    }

    #[test]
    fn test_group_thousands_edges() {
        assert_eq!(group_thousands(0.0, 2), "0.00");
        assert_eq!(group_thousands(100.0, 0), "100");
        assert_eq!(group_thousands(1000.0, 0), "1,000");
        assert_eq!(group_thousands(-1234.5, 1), "-1,234.5");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn test_symbol_and_name_fallbacks() {
        let table = CurrencyTable::default();
        assert_eq!(table.symbol("GBP"), "£");
        assert_eq!(table.symbol("CHF"), "CHF");
        assert_eq!(table.name("SAR"), "Saudi Riyal");
        assert_eq!(table.name("CHF"), "CHF");
    }

    #[test]
    fn test_supported_currencies_in_order() {
        let table = CurrencyTable::default();
        let codes = table.supported_currencies();
        assert_eq!(codes.len(), 13);
        assert_eq!(codes[0], "USD");
        assert_eq!(codes[1], "AED");
        assert_eq!(codes[12], "CAD");
        assert!(table.is_supported("JPY"));
        assert!(!table.is_supported("jpy"));
    }

    #[test]
    fn test_require_unknown() {
        let table = CurrencyTable::default();
        assert_eq!(
            table.require("CHF"),
            Err(BookingCoreError::UnsupportedCurrency("CHF".to_string()))
        );
    }

    #[test]
    fn test_override_keeps_position() {
        let table = CurrencyTable::new(vec![
            ("USD".to_string(), CurrencyInfo::new(1.0, "$", "US Dollar")),
            ("AED".to_string(), CurrencyInfo::new(3.67, "AED", "UAE Dirham")),
            ("USD".to_string(), CurrencyInfo::new(1.0, "US$", "US Dollar")),
        ]);
        assert_eq!(table.supported_currencies(), vec!["USD", "AED"]);
        assert_eq!(table.symbol("USD"), "US$");
    }

    #[test]
    fn test_zero_rate_falls_back_to_one() {
        let table = CurrencyTable::new(vec![(
            "XTS".to_string(),
            CurrencyInfo::new(0.0, "X", "Test"),
        )]);
        assert_eq!(table.rate("XTS"), 1.0);
    }

    #[test]
    fn test_convert_price_object() {
        let table = CurrencyTable::default();
        let converted = table.convert_price(10.0, "GBP");
        assert!((converted.price - 7.9).abs() < 1e-9);
        assert_eq!(converted.currency, "GBP");
        assert_eq!(converted.formatted, "£ 7.90");
    }
}

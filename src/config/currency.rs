//! Currency table entries

/// Exchange rate and display data for one currency, relative to USD
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyInfo {
    pub rate: f64,
    pub symbol: String,
    pub name: String,
}

impl CurrencyInfo {
    pub fn new(rate: f64, symbol: &str, name: &str) -> Self {
        Self {
            rate,
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }
}

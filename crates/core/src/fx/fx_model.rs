use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::constants::USD;

/// Display-currency conversion rates relative to USD.
///
/// USD implicitly resolves to 1. A missing rate is not an error:
/// valuation simply leaves the converted column out of the table.
#[derive(Clone, Debug, Default)]
pub struct FxRates {
    rates: HashMap<String, Decimal>,
}

impl FxRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rate for a currency (units per USD). Codes are stored
    /// lowercase.
    pub fn insert(&mut self, currency: &str, rate: Decimal) {
        self.rates.insert(currency.to_lowercase(), rate);
    }

    /// Rate for a currency; USD always resolves to 1.
    pub fn rate(&self, currency: &str) -> Option<Decimal> {
        let code = currency.to_lowercase();
        if code == USD {
            return Some(Decimal::ONE);
        }
        self.rates.get(&code).copied()
    }

    /// Derive a single-currency rate set from a simple/price entry. Both
    /// prices quote the same asset, so units-per-USD is their ratio. A
    /// zero or missing USD price yields no rate.
    pub fn from_price_entry(
        price_usd: Decimal,
        currency: &str,
        price_in_currency: Option<Decimal>,
    ) -> Self {
        let mut rates = Self::new();
        if let Some(price) = price_in_currency {
            if !price_usd.is_zero() {
                rates.insert(currency, price / price_usd);
            }
        }
        rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_is_always_one() {
        let rates = FxRates::new();
        assert_eq!(rates.rate("usd"), Some(Decimal::ONE));
        assert_eq!(rates.rate("USD"), Some(Decimal::ONE));
    }

    #[test]
    fn test_missing_rate_is_none() {
        let rates = FxRates::new();
        assert_eq!(rates.rate("eur"), None);
    }

    #[test]
    fn test_rate_derived_from_price_entry() {
        let rates = FxRates::from_price_entry(dec!(40000), "eur", Some(dec!(36000)));
        assert_eq!(rates.rate("eur"), Some(dec!(0.9)));
        assert_eq!(rates.rate("EUR"), Some(dec!(0.9)));
    }

    #[test]
    fn test_zero_usd_price_yields_no_rate() {
        let rates = FxRates::from_price_entry(Decimal::ZERO, "eur", Some(dec!(36000)));
        assert_eq!(rates.rate("eur"), None);

        let rates = FxRates::from_price_entry(dec!(40000), "eur", None);
        assert_eq!(rates.rate("eur"), None);
    }
}

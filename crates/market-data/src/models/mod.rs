//! Data models for treasury and price responses.
//!
//! Treasury payloads are deliberately kept as raw [`serde_json::Value`]:
//! the upstream shape drifts (keyed object, bare list, single record) and
//! interpreting it is the normalizer's job, not the transport's.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Batched response of the `simple/price` endpoint.
///
/// Maps asset id → quote currency → numeric rate, e.g.
/// `{"bitcoin": {"usd": 64000.0, "eur": 59000.0}}`. Currency keys are
/// lowercase, matching the upstream convention.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMatrix(HashMap<String, HashMap<String, f64>>);

impl PriceMatrix {
    /// Rate for an asset in the given quote currency, `None` when the
    /// upstream omitted either key.
    pub fn rate(&self, asset_id: &str, currency: &str) -> Option<f64> {
        self.0
            .get(asset_id)
            .and_then(|per_currency| per_currency.get(&currency.to_lowercase()))
            .copied()
    }

    /// USD price for an asset, zero when the upstream omitted it.
    pub fn usd(&self, asset_id: &str) -> f64 {
        self.rate(asset_id, "usd").unwrap_or(0.0)
    }

    /// True when the response carried no assets at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_price_response() {
        let json = r#"{"bitcoin": {"usd": 64000.5, "eur": 59123.0}, "ethereum": {"usd": 3400.0}}"#;
        let matrix: PriceMatrix = serde_json::from_str(json).unwrap();

        assert_eq!(matrix.usd("bitcoin"), 64000.5);
        assert_eq!(matrix.rate("bitcoin", "eur"), Some(59123.0));
        assert_eq!(matrix.rate("bitcoin", "EUR"), Some(59123.0));
        assert_eq!(matrix.usd("ethereum"), 3400.0);
    }

    #[test]
    fn test_missing_keys_degrade_to_defaults() {
        let matrix: PriceMatrix = serde_json::from_str("{}").unwrap();

        assert!(matrix.is_empty());
        assert_eq!(matrix.rate("bitcoin", "usd"), None);
        assert_eq!(matrix.usd("bitcoin"), 0.0);
    }
}

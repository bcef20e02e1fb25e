//! Treasury data provider trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::UpstreamError;
use crate::models::PriceMatrix;

/// Trait for public-treasury data sources.
///
/// Implement this trait to add support for a new upstream. Each call is
/// a single request/response pass: a fixed per-request deadline, no
/// caching, no retry. Failure policy belongs to the caller.
#[async_trait]
pub trait TreasuryDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "COINGECKO", used in logs and error payloads.
    fn id(&self) -> &'static str;

    /// Fetch the raw public-treasury payload for one asset.
    ///
    /// The payload is returned as untyped JSON; its shape is
    /// upstream-defined and normalization is the consumer's concern.
    async fn treasury_holdings(&self, asset_id: &str) -> Result<Value, UpstreamError>;

    /// Batched price lookup for the given asset ids and quote currencies.
    async fn simple_price(
        &self,
        asset_ids: &[&str],
        vs_currencies: &[&str],
    ) -> Result<PriceMatrix, UpstreamError>;
}

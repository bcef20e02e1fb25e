use std::sync::Arc;

use log::{info, warn};
use rust_decimal::Decimal;

use coffer_market_data::{PriceMatrix, TreasuryDataProvider};

use crate::analytics::merge_valuations;
use crate::constants::USD;
use crate::errors::{Error, Result};
use crate::fx::FxRates;
use crate::normalize::normalize;
use crate::snapshot::{Snapshot, SnapshotRepositoryTrait};
use crate::table::{decimal_from_f64, Table};
use crate::valuation::{apply_values, compute_pnl};

/// Run-time settings for a capture run. These are per-run parameters,
/// not persisted configuration.
#[derive(Clone, Debug)]
pub struct CaptureOptions {
    /// Display currency for the converted value column; USD adds none.
    pub display_currency: String,
    /// Assumed acquisition cost per coin for what-if PnL; absent or zero
    /// leaves the PnL group null.
    pub assumed_cost_per_coin_usd: Option<Decimal>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            display_currency: USD.to_string(),
            assumed_cost_per_coin_usd: None,
        }
    }
}

/// What happened to one asset during a capture run.
#[derive(Debug)]
pub enum CaptureStatus {
    /// A snapshot was appended.
    Captured(Snapshot),
    /// The normalized table was empty; nothing was stored.
    SkippedEmpty,
    /// The fetch failed; the remaining assets keep processing.
    Failed(Error),
}

/// Per-asset result of a capture run.
#[derive(Debug)]
pub struct CaptureOutcome {
    pub asset_id: String,
    pub status: CaptureStatus,
}

/// Orchestrates one synchronous pass per asset: fetch treasury payload
/// and prices, normalize, valuate, compute PnL, append a snapshot.
pub struct TreasuryTracker {
    provider: Arc<dyn TreasuryDataProvider>,
    store: Arc<dyn SnapshotRepositoryTrait>,
}

impl TreasuryTracker {
    pub fn new(
        provider: Arc<dyn TreasuryDataProvider>,
        store: Arc<dyn SnapshotRepositoryTrait>,
    ) -> Self {
        Self { provider, store }
    }

    /// Capture one snapshot per asset.
    ///
    /// Upstream failures are contained per asset and reported in that
    /// asset's outcome. Store failures abort the whole run: once the
    /// history cannot be appended to, there is nothing left to do.
    pub async fn capture(
        &self,
        asset_ids: &[String],
        options: &CaptureOptions,
    ) -> Result<Vec<CaptureOutcome>> {
        let mut outcomes = Vec::with_capacity(asset_ids.len());

        for asset_id in asset_ids {
            let status = match self.capture_one(asset_id, options).await {
                Ok(status) => status,
                Err(Error::Upstream(e)) => {
                    warn!("Fetch failed for {}: {}", asset_id, e);
                    CaptureStatus::Failed(Error::Upstream(e))
                }
                Err(e) => return Err(e),
            };
            outcomes.push(CaptureOutcome {
                asset_id: asset_id.clone(),
                status,
            });
        }

        Ok(outcomes)
    }

    async fn capture_one(
        &self,
        asset_id: &str,
        options: &CaptureOptions,
    ) -> Result<CaptureStatus> {
        let display_currency = options.display_currency.to_lowercase();

        let payload = self.provider.treasury_holdings(asset_id).await?;
        let prices = self.fetch_prices(asset_id, &display_currency).await?;

        let price_usd = decimal_from_f64(prices.usd(asset_id));
        let fx_rates = FxRates::from_price_entry(
            price_usd,
            &display_currency,
            prices
                .rate(asset_id, &display_currency)
                .map(decimal_from_f64),
        );

        let mut table = normalize(&payload);
        if table.is_empty() {
            warn!("Normalized payload empty for {}", asset_id);
            return Ok(CaptureStatus::SkippedEmpty);
        }

        apply_values(&mut table, price_usd, &fx_rates, &display_currency);
        compute_pnl(&mut table, options.assumed_cost_per_coin_usd);

        let snapshot = self.store.append(table, asset_id)?;
        info!(
            "Captured snapshot for {} ({} rows)",
            asset_id,
            snapshot.data.len()
        );

        Ok(CaptureStatus::Captured(snapshot))
    }

    async fn fetch_prices(&self, asset_id: &str, display_currency: &str) -> Result<PriceMatrix> {
        let currencies: Vec<&str> = if display_currency == USD {
            vec![USD]
        } else {
            vec![USD, display_currency]
        };
        Ok(self.provider.simple_price(&[asset_id], &currencies).await?)
    }

    /// Capture both assets and store their outer-joined merge under a
    /// synthetic tag. Unlike [`capture`](Self::capture), a fetch failure
    /// of either leg fails the whole operation - the merge needs both.
    pub async fn capture_merged(
        &self,
        asset_a: &str,
        asset_b: &str,
        label_a: &str,
        label_b: &str,
        tag: &str,
    ) -> Result<Snapshot> {
        let left = self.fetch_valued(asset_a).await?;
        let right = self.fetch_valued(asset_b).await?;

        let merged = merge_valuations(&left, &right, label_a, label_b);
        let snapshot = self.store.append(merged, tag)?;
        info!(
            "Captured merged snapshot {} ({} rows)",
            tag,
            snapshot.data.len()
        );

        Ok(snapshot)
    }

    async fn fetch_valued(&self, asset_id: &str) -> Result<Table> {
        let payload = self.provider.treasury_holdings(asset_id).await?;
        let prices = self.provider.simple_price(&[asset_id], &[USD]).await?;

        let mut table = normalize(&payload);
        apply_values(
            &mut table,
            decimal_from_f64(prices.usd(asset_id)),
            &FxRates::new(),
            USD,
        );
        Ok(table)
    }
}

//! Analytics domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// KPI summary over one valued table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasurySummary {
    /// Sum of the `coins` column.
    pub total_coins: Decimal,
    /// Sum of the `value_usd` column.
    pub total_value_usd: Decimal,
    /// Average holding per company; zero for an empty table.
    pub avg_coins: Decimal,
    /// Number of companies (rows).
    pub company_count: usize,
}

/// Held-versus-rest split of an asset's circulating supply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyShare {
    /// Coins held by the tracked companies.
    pub held: Decimal,
    /// Remaining supply, clamped at zero when holdings exceed the given
    /// supply figure.
    pub rest: Decimal,
}

/// Totals of a what-if price scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    /// Price implied by the snapshot: total value over total coins.
    pub implied_price_usd: Decimal,
    /// Implied price scaled by the scenario multiplier.
    pub projected_price_usd: Decimal,
    /// Total value at the implied price.
    pub current_total_usd: Decimal,
    /// Total value at the projected price.
    pub projected_total_usd: Decimal,
}

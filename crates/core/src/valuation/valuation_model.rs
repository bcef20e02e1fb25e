//! Valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COL_COINS, COL_COST_BASIS_USD, COL_NAME, COL_PNL_PCT, COL_PNL_USD, COL_VALUE_USD,
};
use crate::table::{decimal_from_value, Row};

/// Column name carrying the converted display value, e.g. `value_eur`.
pub fn display_value_column(currency: &str) -> String {
    format!("value_{}", currency.to_lowercase())
}

/// Typed view of one valued row.
///
/// The table keeps whatever columns the upstream sent; this view exposes
/// the ones valuation guarantees. The PnL fields exist as a group once
/// `compute_pnl` has run, and are all `None` when no assumed cost was
/// supplied or when a cell was stored as null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHolding {
    pub name: String,
    pub coins: Decimal,
    pub value_usd: Decimal,
    pub cost_basis_usd: Option<Decimal>,
    pub pnl_usd: Option<Decimal>,
    pub pnl_pct: Option<Decimal>,
}

impl CompanyHolding {
    /// Extract the typed view from a valued row. Missing or non-numeric
    /// cells degrade to zero/None, mirroring the valuation fallbacks.
    pub fn from_row(row: &Row) -> Self {
        let cell = |column: &str| row.get(column).and_then(decimal_from_value);

        Self {
            name: row
                .get(COL_NAME)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            coins: cell(COL_COINS).unwrap_or_default(),
            value_usd: cell(COL_VALUE_USD).unwrap_or_default(),
            cost_basis_usd: cell(COL_COST_BASIS_USD),
            pnl_usd: cell(COL_PNL_USD),
            pnl_pct: cell(COL_PNL_PCT),
        }
    }
}

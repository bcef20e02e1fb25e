use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use super::display_value_column;
use crate::constants::{
    AMOUNT_COLUMN_CANDIDATES, COL_COINS, COL_COST_BASIS_USD, COL_PNL_PCT, COL_PNL_USD,
    COL_VALUE_USD, USD,
};
use crate::fx::FxRates;
use crate::table::{decimal_from_value, decimal_to_value, Table};

/// Resolve which input column carries the held-asset quantity.
///
/// The fixed candidate names win in priority order; otherwise the first
/// column whose cells are all JSON numbers; otherwise `None`, in which
/// case the amount is treated as all-zero. Must stay stable across
/// upstream schema drift - this ordering is a compatibility contract.
pub fn resolve_amount_column(table: &Table) -> Option<String> {
    for candidate in AMOUNT_COLUMN_CANDIDATES {
        if table.has_column(candidate) {
            return Some((*candidate).to_string());
        }
    }

    table
        .columns()
        .into_iter()
        .find(|column| is_numeric_column(table, column))
}

/// A column counts as numeric only when every present, non-null cell is
/// a JSON number. Numeric strings do not qualify for the fallback scan,
/// though they still coerce once a column has been chosen.
fn is_numeric_column(table: &Table, column: &str) -> bool {
    let mut saw_number = false;
    for row in table.rows() {
        match row.get(column) {
            Some(Value::Number(_)) => saw_number = true,
            None | Some(Value::Null) => {}
            Some(_) => return false,
        }
    }
    saw_number
}

/// Attach `coins`, `value_usd` and optionally `value_<fiat>` columns.
///
/// Never fails: an unresolvable amount column and unparseable cells
/// coerce to zero, and a missing FX rate leaves the converted column out
/// of the table entirely.
pub fn apply_values(
    table: &mut Table,
    coin_price_usd: Decimal,
    fx_rates: &FxRates,
    display_currency: &str,
) {
    let amount_column = resolve_amount_column(table);
    if amount_column.is_none() && !table.is_empty() {
        debug!("no amount column resolved; coins default to zero");
    }

    let display_column = if display_currency.eq_ignore_ascii_case(USD) {
        None
    } else {
        fx_rates
            .rate(display_currency)
            .map(|rate| (display_value_column(display_currency), rate))
    };

    for row in table.rows_mut() {
        let coins = amount_column
            .as_deref()
            .and_then(|column| row.get(column))
            .and_then(decimal_from_value)
            .unwrap_or(Decimal::ZERO);
        let value_usd = coins * coin_price_usd;

        row.insert(COL_COINS.to_string(), decimal_to_value(coins));
        row.insert(COL_VALUE_USD.to_string(), decimal_to_value(value_usd));

        if let Some((column, rate)) = &display_column {
            row.insert(column.clone(), decimal_to_value(value_usd * *rate));
        }
    }
}

/// Attach what-if PnL columns from an assumed acquisition cost per coin.
///
/// With no assumed cost (absent or zero) every PnL cell is null for
/// every row - the expected path, not a degraded one. A zero cost basis
/// yields a null `pnl_pct`, never an infinity.
pub fn compute_pnl(table: &mut Table, assumed_cost_per_coin_usd: Option<Decimal>) {
    let Some(assumed_cost) = assumed_cost_per_coin_usd.filter(|cost| !cost.is_zero()) else {
        for row in table.rows_mut() {
            row.insert(COL_COST_BASIS_USD.to_string(), Value::Null);
            row.insert(COL_PNL_USD.to_string(), Value::Null);
            row.insert(COL_PNL_PCT.to_string(), Value::Null);
        }
        return;
    };

    for row in table.rows_mut() {
        let coins = row
            .get(COL_COINS)
            .and_then(decimal_from_value)
            .unwrap_or(Decimal::ZERO);
        let value_usd = row
            .get(COL_VALUE_USD)
            .and_then(decimal_from_value)
            .unwrap_or(Decimal::ZERO);

        let cost_basis = coins * assumed_cost;
        let pnl_usd = value_usd - cost_basis;
        let pnl_pct = if cost_basis.is_zero() {
            Value::Null
        } else {
            decimal_to_value(pnl_usd / cost_basis)
        };

        row.insert(COL_COST_BASIS_USD.to_string(), decimal_to_value(cost_basis));
        row.insert(COL_PNL_USD.to_string(), decimal_to_value(pnl_usd));
        row.insert(COL_PNL_PCT.to_string(), pnl_pct);
    }
}

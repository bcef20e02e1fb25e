use std::collections::HashMap;

use rust_decimal::Decimal;

use super::{ScenarioProjection, SupplyShare, TreasurySummary};
use crate::constants::{COL_COINS, COL_NAME, COL_PROJECTED_VALUE_USD, COL_TOTAL_VALUE_USD, COL_VALUE_USD};
use crate::table::{decimal_from_value, decimal_to_value, Row, Table};

fn cell_decimal(row: &Row, column: &str) -> Decimal {
    row.get(column)
        .and_then(decimal_from_value)
        .unwrap_or(Decimal::ZERO)
}

/// KPI summary of a valued table: totals, average holding, company count.
pub fn summarize(table: &Table) -> TreasurySummary {
    let mut total_coins = Decimal::ZERO;
    let mut total_value_usd = Decimal::ZERO;

    for row in table.rows() {
        total_coins += cell_decimal(row, COL_COINS);
        total_value_usd += cell_decimal(row, COL_VALUE_USD);
    }

    let company_count = table.len();
    let avg_coins = if company_count == 0 {
        Decimal::ZERO
    } else {
        total_coins / Decimal::from(company_count as u64)
    };

    TreasurySummary {
        total_coins,
        total_value_usd,
        avg_coins,
        company_count,
    }
}

/// Split an asset's circulating supply into tracked holdings and the
/// rest, the rest clamped at zero.
pub fn supply_share(total_held: Decimal, circulating_supply: Decimal) -> SupplyShare {
    SupplyShare {
        held: total_held,
        rest: (circulating_supply - total_held).max(Decimal::ZERO),
    }
}

/// The `n` largest holders by USD value, descending. Ties keep their
/// original order.
pub fn top_holders(table: &Table, n: usize) -> Table {
    let mut rows: Vec<Row> = table.rows().to_vec();
    rows.sort_by(|a, b| cell_decimal(b, COL_VALUE_USD).cmp(&cell_decimal(a, COL_VALUE_USD)));
    rows.truncate(n);
    Table::from_rows(rows)
}

/// Outer-join two valued tables on company name, zero-filling the gaps.
///
/// Output columns: `name`, then `<label>_holdings` and `<label>_value_usd`
/// for each side, then `total_value_usd` summing both value columns.
/// Companies keep first-appearance order, left table first.
pub fn merge_valuations(
    left: &Table,
    right: &Table,
    left_label: &str,
    right_label: &str,
) -> Table {
    fn collect(table: &Table) -> (Vec<String>, HashMap<String, (Decimal, Decimal)>) {
        let mut order = Vec::new();
        let mut by_name = HashMap::new();
        for row in table.rows() {
            let name = row
                .get(COL_NAME)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            if !by_name.contains_key(&name) {
                order.push(name.clone());
            }
            by_name.insert(
                name,
                (cell_decimal(row, COL_COINS), cell_decimal(row, COL_VALUE_USD)),
            );
        }
        (order, by_name)
    }

    let (left_order, left_by_name) = collect(left);
    let (right_order, right_by_name) = collect(right);

    let mut names = left_order;
    for name in right_order {
        if !left_by_name.contains_key(&name) {
            names.push(name);
        }
    }

    let left_holdings_col = format!("{}_holdings", left_label.to_lowercase());
    let left_value_col = format!("{}_value_usd", left_label.to_lowercase());
    let right_holdings_col = format!("{}_holdings", right_label.to_lowercase());
    let right_value_col = format!("{}_value_usd", right_label.to_lowercase());

    let mut merged = Table::new();
    for name in names {
        let zero = (Decimal::ZERO, Decimal::ZERO);
        let (left_coins, left_value) = left_by_name.get(&name).copied().unwrap_or(zero);
        let (right_coins, right_value) = right_by_name.get(&name).copied().unwrap_or(zero);

        let mut row = Row::new();
        row.insert(COL_NAME.to_string(), serde_json::Value::String(name));
        row.insert(left_holdings_col.clone(), decimal_to_value(left_coins));
        row.insert(left_value_col.clone(), decimal_to_value(left_value));
        row.insert(right_holdings_col.clone(), decimal_to_value(right_coins));
        row.insert(right_value_col.clone(), decimal_to_value(right_value));
        row.insert(
            COL_TOTAL_VALUE_USD.to_string(),
            decimal_to_value(left_value + right_value),
        );
        merged.push(row);
    }

    merged
}

/// What-if scenario: scale the price implied by a snapshot and re-value.
///
/// The implied price is total value over total coins, the denominator
/// guarded to 1 when the table holds no coins. Adds a `proj_value_usd`
/// column and returns the before/after totals.
pub fn project_scenario(table: &mut Table, change_multiplier: Decimal) -> ScenarioProjection {
    let summary = summarize(table);

    let denominator = if summary.total_coins.is_zero() {
        Decimal::ONE
    } else {
        summary.total_coins
    };
    let implied_price_usd = summary.total_value_usd / denominator;
    let projected_price_usd = implied_price_usd * change_multiplier;

    let mut projected_total_usd = Decimal::ZERO;
    for row in table.rows_mut() {
        let projected = cell_decimal(row, COL_COINS) * projected_price_usd;
        projected_total_usd += projected;
        row.insert(
            COL_PROJECTED_VALUE_USD.to_string(),
            decimal_to_value(projected),
        );
    }

    ScenarioProjection {
        implied_price_usd,
        projected_price_usd,
        current_total_usd: summary.total_value_usd,
        projected_total_usd,
    }
}

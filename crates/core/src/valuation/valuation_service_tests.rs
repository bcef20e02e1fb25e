//! Tests for amount-column resolution, valuation arithmetic and PnL.

use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::fx::FxRates;
use crate::table::{decimal_from_value, Table};
use crate::valuation::{apply_values, compute_pnl, resolve_amount_column, CompanyHolding};

fn table(rows: Value) -> Table {
    serde_json::from_value(rows).expect("test rows must deserialize")
}

fn cell(table: &Table, row: usize, column: &str) -> Value {
    table.rows()[row]
        .get(column)
        .cloned()
        .unwrap_or_else(|| panic!("missing column {column}"))
}

#[test]
fn test_candidate_columns_win_in_priority_order() {
    let t = table(json!([{"holdings": 1, "total_holdings": 2, "amount": 3}]));
    assert_eq!(resolve_amount_column(&t).as_deref(), Some("total_holdings"));

    let t = table(json!([{"quantity": 1, "amount": 3}]));
    assert_eq!(resolve_amount_column(&t).as_deref(), Some("amount"));
}

#[test]
fn test_fallback_picks_sole_numeric_column() {
    let t = table(json!([
        {"company": "A", "stash": 10.5},
        {"company": "B", "stash": 2}
    ]));
    assert_eq!(resolve_amount_column(&t).as_deref(), Some("stash"));
}

#[test]
fn test_fallback_skips_numeric_string_columns() {
    // Numeric strings coerce once a column is chosen, but do not make a
    // column eligible for the fallback scan.
    let t = table(json!([{"company": "A", "stash": "10.5", "count": 3}]));
    assert_eq!(resolve_amount_column(&t).as_deref(), Some("count"));
}

#[test]
fn test_no_amount_column_yields_all_zero_coins() {
    let mut t = table(json!([{"company": "A"}, {"company": "B"}]));
    assert_eq!(resolve_amount_column(&t), None);

    apply_values(&mut t, dec!(40000), &FxRates::new(), "usd");

    for row in t.rows() {
        assert_eq!(row["coins"], json!(0.0));
        assert_eq!(row["value_usd"], json!(0.0));
    }
}

#[test]
fn test_valuation_arithmetic() {
    let mut t = table(json!([{"name": "A", "total_holdings": 2.5}]));

    apply_values(&mut t, dec!(40000), &FxRates::new(), "usd");

    assert_eq!(
        decimal_from_value(&cell(&t, 0, "value_usd")),
        Some(dec!(100000))
    );
    // USD display adds no converted column
    assert_eq!(
        t.columns(),
        vec!["name", "total_holdings", "coins", "value_usd"]
    );
}

#[test]
fn test_non_numeric_cells_coerce_to_zero() {
    let mut t = table(json!([
        {"name": "A", "total_holdings": "not-a-number"},
        {"name": "B", "total_holdings": null},
        {"name": "C", "total_holdings": "7"}
    ]));

    apply_values(&mut t, dec!(10), &FxRates::new(), "usd");

    assert_eq!(cell(&t, 0, "value_usd"), json!(0.0));
    assert_eq!(cell(&t, 1, "value_usd"), json!(0.0));
    assert_eq!(cell(&t, 2, "value_usd"), json!(70.0));
}

#[test]
fn test_display_currency_column_present_only_with_a_rate() {
    let mut with_rate = table(json!([{"name": "A", "total_holdings": 2}]));
    let mut rates = FxRates::new();
    rates.insert("eur", dec!(0.9));
    apply_values(&mut with_rate, dec!(100), &rates, "eur");
    assert_eq!(cell(&with_rate, 0, "value_eur"), json!(180.0));

    let mut without_rate = table(json!([{"name": "A", "total_holdings": 2}]));
    apply_values(&mut without_rate, dec!(100), &FxRates::new(), "eur");
    assert!(!without_rate.has_column("value_eur"));
}

#[test]
fn test_pnl_null_group_without_assumed_cost() {
    for assumed in [None, Some(dec!(0))] {
        let mut t = table(json!([{"name": "A", "total_holdings": 2.5}]));
        apply_values(&mut t, dec!(40000), &FxRates::new(), "usd");
        compute_pnl(&mut t, assumed);

        assert_eq!(cell(&t, 0, "cost_basis_usd"), Value::Null);
        assert_eq!(cell(&t, 0, "pnl_usd"), Value::Null);
        assert_eq!(cell(&t, 0, "pnl_pct"), Value::Null);
    }
}

#[test]
fn test_pnl_arithmetic_with_assumed_cost() {
    let mut t = table(json!([{"name": "A", "total_holdings": 2}]));
    apply_values(&mut t, dec!(30000), &FxRates::new(), "usd");
    compute_pnl(&mut t, Some(dec!(20000)));

    assert_eq!(
        decimal_from_value(&cell(&t, 0, "cost_basis_usd")),
        Some(dec!(40000))
    );
    assert_eq!(
        decimal_from_value(&cell(&t, 0, "pnl_usd")),
        Some(dec!(20000))
    );
    assert_eq!(decimal_from_value(&cell(&t, 0, "pnl_pct")), Some(dec!(0.5)));
}

#[test]
fn test_zero_cost_basis_normalizes_pct_to_null() {
    // Zero coins with a nonzero value column: cost basis is zero while
    // value is 100, and the division must yield null, not infinity.
    let mut t = table(json!([{"name": "A", "coins": 0.0, "value_usd": 100.0}]));
    compute_pnl(&mut t, Some(dec!(20000)));

    assert_eq!(cell(&t, 0, "cost_basis_usd"), json!(0.0));
    assert_eq!(cell(&t, 0, "pnl_usd"), json!(100.0));
    assert_eq!(cell(&t, 0, "pnl_pct"), Value::Null);
}

#[test]
fn test_company_holding_view_of_a_valued_row() {
    let mut t = table(json!([{"name": "A", "total_holdings": 2}]));
    apply_values(&mut t, dec!(30000), &FxRates::new(), "usd");
    compute_pnl(&mut t, None);

    let holding = CompanyHolding::from_row(&t.rows()[0]);
    assert_eq!(holding.name, "A");
    assert_eq!(holding.coins, dec!(2));
    assert_eq!(holding.value_usd, dec!(60000));
    assert_eq!(holding.cost_basis_usd, None);
    assert_eq!(holding.pnl_usd, None);
    assert_eq!(holding.pnl_pct, None);
}

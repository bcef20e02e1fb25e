//! Row/column table primitives.
//!
//! A row is an ordered mapping of column name to JSON value; a table is
//! an ordered sequence of rows. Column order follows first appearance
//! across rows, which matters: amount-column resolution scans columns in
//! that order. `serde_json` is built with `preserve_order` so the maps
//! keep insertion order.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// One row: column name → JSON value, in insertion order.
pub type Row = serde_json::Map<String, Value>;

/// An ordered sequence of rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table(Vec<Row>);

impl Table {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.0
    }

    pub fn push(&mut self, row: Row) {
        self.0.push(row);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the table has no rows. A one-row table wrapping an empty
    /// object is not empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column names in first-appearance order across all rows.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for row in &self.0 {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    /// True when any row carries the column.
    pub fn has_column(&self, name: &str) -> bool {
        self.0.iter().any(|row| row.contains_key(name))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse a JSON cell as a decimal. Numbers and numeric strings succeed;
/// everything else is `None` and callers coerce to zero where the policy
/// asks for it.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let repr = n.to_string();
            Decimal::from_str(&repr)
                .or_else(|_| Decimal::from_scientific(&repr))
                .ok()
                .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
        }
        Value::String(s) => {
            let trimmed = s.trim();
            Decimal::from_str(trimmed)
                .or_else(|_| Decimal::from_scientific(trimmed))
                .ok()
        }
        _ => None,
    }
}

/// Write a decimal back into a JSON cell as a number. Values outside the
/// f64 range degrade to null rather than panicking.
pub fn decimal_to_value(value: Decimal) -> Value {
    value
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Decimal from an upstream f64, zero when not representable (NaN, ±inf).
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or_default()
}

use serde_json::Value;

use super::PayloadShape;
use crate::constants::COL_SCALAR;
use crate::table::{Row, Table};

/// Convert a raw treasury payload into a row-per-company table.
///
/// Nested objects flatten into dotted-path columns (`parent.child`);
/// arrays and scalars pass through untouched. An empty table is a valid
/// result, never an error - callers check emptiness explicitly.
pub fn normalize(payload: &Value) -> Table {
    let records: Vec<&Value> = match PayloadShape::classify(payload) {
        PayloadShape::ListUnderKnownKey(key) => payload[key]
            .as_array()
            .map(|list| list.iter().collect())
            .unwrap_or_default(),
        PayloadShape::BareList => payload
            .as_array()
            .map(|list| list.iter().collect())
            .unwrap_or_default(),
        PayloadShape::SingleObject => vec![payload],
    };

    Table::from_rows(records.into_iter().map(flatten_record).collect())
}

/// Flatten one record into a row. A non-object record (scalar in a list,
/// or a scalar payload) becomes a single-column row.
fn flatten_record(record: &Value) -> Row {
    let mut row = Row::new();
    match record {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(&mut row, key, value);
            }
        }
        other => {
            row.insert(COL_SCALAR.to_string(), other.clone());
        }
    }
    row
}

fn flatten_into(row: &mut Row, path: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_into(row, &format!("{}.{}", path, key), nested);
            }
        }
        other => {
            row.insert(path.to_string(), other.clone());
        }
    }
}

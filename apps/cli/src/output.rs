//! Plain-text rendering for tables and KPI lines.

use rust_decimal::Decimal;
use serde_json::Value;

use coffer_core::analytics::{ScenarioProjection, SupplyShare, TreasurySummary};
use coffer_core::snapshot::Snapshot;
use coffer_core::Table;

const MAX_CELL_WIDTH: usize = 28;

/// Render a table with fixed-width columns, two spaces apart.
pub fn print_table(table: &Table) {
    if table.is_empty() {
        println!("(empty table)");
        return;
    }

    let columns = table.columns();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| truncate(render_cell(row.get(column))))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(column, width)| format!("{:<width$}", column))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header);
    println!("{}", "-".repeat(header.chars().count()));

    for row in &rows {
        let line = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{:<width$}", cell))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn truncate(cell: String) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell;
    }
    let mut truncated: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    truncated.push_str("...");
    truncated
}

pub fn print_summary(coin: &str, snapshot: &Snapshot, summary: &TreasurySummary) {
    println!("Latest snapshot for {} @ {}", coin, snapshot.timestamp);
    println!("  Companies tracked : {}", summary.company_count);
    println!("  Total coins held  : {:.4}", summary.total_coins);
    println!("  Total value       : {}", format_usd(summary.total_value_usd));
    println!("  Avg coins/company : {:.4}", summary.avg_coins);
}

pub fn print_supply_share(share: &SupplyShare) {
    let total = share.held + share.rest;
    let pct = if total.is_zero() {
        Decimal::ZERO
    } else {
        share.held / total * Decimal::from(100u32)
    };
    println!(
        "  Supply share      : {:.2}% held by tracked companies ({:.0} of {:.0})",
        pct, share.held, total
    );
}

pub fn print_projection(coin: &str, change_pct: f64, projection: &ScenarioProjection) {
    println!("What-if for {} at {:+.1}% price change:", coin, change_pct);
    println!(
        "  Implied price     : {}",
        format_usd(projection.implied_price_usd)
    );
    println!(
        "  Projected price   : {}",
        format_usd(projection.projected_price_usd)
    );
    println!(
        "  Current total     : {}",
        format_usd(projection.current_total_usd)
    );
    println!(
        "  Projected total   : {}",
        format_usd(projection.projected_total_usd)
    );
}

/// Dollar amount with thousands separators, two decimal places.
pub fn format_usd(value: Decimal) -> String {
    let formatted = format!("{:.2}", value);
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(999.5)), "$999.50");
        assert_eq!(format_usd(dec!(100000)), "$100,000.00");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(-40000)), "-$40,000.00");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "x".repeat(40);
        let truncated = truncate(long);
        assert_eq!(truncated.chars().count(), MAX_CELL_WIDTH);
        assert!(truncated.ends_with("..."));
    }
}

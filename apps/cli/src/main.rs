mod cli;
mod config;
mod output;

use std::sync::Arc;

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use coffer_core::analytics::{project_scenario, summarize, supply_share, top_holders};
use coffer_core::snapshot::{SnapshotRepositoryTrait, SnapshotStore};
use coffer_core::table::decimal_from_f64;
use coffer_core::tracker::{CaptureOptions, CaptureStatus, TreasuryTracker};
use coffer_market_data::CoinGeckoProvider;

use cli::{Cli, Command};
use config::Config;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn short_label(asset_id: &str) -> &str {
    match asset_id {
        "bitcoin" => "btc",
        "ethereum" => "eth",
        other => other,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing();
    let config = Config::from_env();

    // A corrupt store fails here and aborts the run: no snapshot history
    // can be established from it.
    let store = Arc::new(SnapshotStore::open(config.snapshot_path())?);

    match args.command {
        Command::Capture {
            assets,
            currency,
            assumed_cost,
        } => {
            let provider = Arc::new(CoinGeckoProvider::new(config.api_key.clone()));
            let tracker = TreasuryTracker::new(provider, store);
            let options = CaptureOptions {
                display_currency: currency,
                assumed_cost_per_coin_usd: assumed_cost.map(decimal_from_f64),
            };

            let outcomes = tracker.capture(&assets, &options).await?;
            for outcome in &outcomes {
                match &outcome.status {
                    CaptureStatus::Captured(snapshot) => println!(
                        "{}: captured {} rows @ {}",
                        outcome.asset_id,
                        snapshot.data.len(),
                        snapshot.timestamp
                    ),
                    CaptureStatus::SkippedEmpty => {
                        println!("{}: empty payload, skipped", outcome.asset_id)
                    }
                    CaptureStatus::Failed(e) => println!("{}: failed - {}", outcome.asset_id, e),
                }
            }
        }

        Command::CaptureMerged {
            asset_a,
            asset_b,
            tag,
        } => {
            let provider = Arc::new(CoinGeckoProvider::new(config.api_key.clone()));
            let tracker = TreasuryTracker::new(provider, store);
            let label_a = short_label(&asset_a);
            let label_b = short_label(&asset_b);
            let tag = tag.unwrap_or_else(|| format!("{}_{}_merged", label_a, label_b));

            let snapshot = tracker
                .capture_merged(&asset_a, &asset_b, label_a, label_b, &tag)
                .await?;
            println!(
                "Captured merged snapshot {} ({} rows)",
                tag,
                snapshot.data.len()
            );
            output::print_table(&snapshot.data);
        }

        Command::Latest { coin } => match store.latest(coin.as_deref())? {
            Some(snapshot) => {
                println!("Snapshot for {} @ {}", snapshot.coin, snapshot.timestamp);
                output::print_table(&snapshot.data);
            }
            None => println!("No snapshots yet. Run `coffer capture` first."),
        },

        Command::History => {
            let snapshots = store.load_all()?;
            if snapshots.is_empty() {
                println!("No snapshots yet.");
            }
            for (i, snapshot) in snapshots.iter().enumerate() {
                println!(
                    "{:>4}  {}  {:<18}  {} rows",
                    i + 1,
                    snapshot.timestamp,
                    snapshot.coin,
                    snapshot.data.len()
                );
            }
        }

        Command::Summary { coin, supply } => {
            let snapshot = store
                .latest(Some(&coin))?
                .ok_or_else(|| anyhow::anyhow!("no snapshot stored for {coin}"))?;
            let summary = summarize(&snapshot.data);

            output::print_summary(&coin, &snapshot, &summary);
            if let Some(supply) = supply {
                let share = supply_share(summary.total_coins, decimal_from_f64(supply));
                output::print_supply_share(&share);
            }
            println!();
            println!("Top holders by value:");
            output::print_table(&top_holders(&snapshot.data, 10));
        }

        Command::WhatIf { coin, change_pct } => {
            let snapshot = store
                .latest(Some(&coin))?
                .ok_or_else(|| anyhow::anyhow!("no snapshot stored for {coin}"))?;

            let multiplier =
                Decimal::ONE + decimal_from_f64(change_pct) / Decimal::from(100u32);
            let mut table = snapshot.data.clone();
            let projection = project_scenario(&mut table, multiplier);

            output::print_projection(&coin, change_pct, &projection);
            println!();
            output::print_table(&top_holders(&table, 10));
        }
    }

    Ok(())
}

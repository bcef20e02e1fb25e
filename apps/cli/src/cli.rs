//! Command-line interface definition.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "coffer",
    about = "Public-company crypto treasury tracker",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch, value and snapshot each asset
    Capture {
        /// Comma-separated CoinGecko asset ids
        #[arg(long, value_delimiter = ',', default_value = "bitcoin,ethereum")]
        assets: Vec<String>,

        /// Display currency for a converted value column
        #[arg(long, default_value = "usd")]
        currency: String,

        /// Assumed acquisition cost per coin (USD) for what-if PnL
        #[arg(long)]
        assumed_cost: Option<f64>,
    },

    /// Fetch two assets and snapshot their merged table under one tag
    CaptureMerged {
        #[arg(long, default_value = "bitcoin")]
        asset_a: String,

        #[arg(long, default_value = "ethereum")]
        asset_b: String,

        /// Synthetic coin tag for the merged snapshot (defaults to
        /// "<a>_<b>_merged")
        #[arg(long)]
        tag: Option<String>,
    },

    /// Print the latest snapshot, optionally for one coin tag
    Latest {
        #[arg(long)]
        coin: Option<String>,
    },

    /// List all stored snapshots in append order
    History,

    /// KPI summary of the latest snapshot for a coin tag
    Summary {
        #[arg(long)]
        coin: String,

        /// Circulating supply for the held-vs-rest split
        #[arg(long)]
        supply: Option<f64>,
    },

    /// Project the latest snapshot at a changed price
    WhatIf {
        #[arg(long)]
        coin: String,

        /// Price change in percent, e.g. 10 or -25
        #[arg(long)]
        change_pct: f64,
    },
}

/// Candidate column names for amount-column resolution, in priority order.
pub const AMOUNT_COLUMN_CANDIDATES: &[&str] = &[
    "total_holdings",
    "holdings",
    "amount",
    "quantity",
    "total_btc_holdings",
    "total_eth_holdings",
];

/// Known list-bearing keys in treasury payloads, in priority order.
pub const PAYLOAD_LIST_KEYS: &[&str] = &["companies", "data", "items", "treasury"];

/// Column a scalar payload is wrapped under during normalization.
pub const COL_SCALAR: &str = "value";

/// Holder identifier column.
pub const COL_NAME: &str = "name";

/// Resolved held-asset quantity column.
pub const COL_COINS: &str = "coins";

/// USD valuation column.
pub const COL_VALUE_USD: &str = "value_usd";

/// What-if PnL column group.
pub const COL_COST_BASIS_USD: &str = "cost_basis_usd";
pub const COL_PNL_USD: &str = "pnl_usd";
pub const COL_PNL_PCT: &str = "pnl_pct";

/// Scenario projection column.
pub const COL_PROJECTED_VALUE_USD: &str = "proj_value_usd";

/// Combined value column of a cross-asset merge.
pub const COL_TOTAL_VALUE_USD: &str = "total_value_usd";

/// The valuation base currency.
pub const USD: &str = "usd";

/// Snapshot store file name under the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "treasury_snapshots.jsonl";

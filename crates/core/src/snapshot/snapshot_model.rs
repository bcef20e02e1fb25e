//! Snapshot domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// One timestamped, coin-tagged capture of a valuation table.
///
/// `coin` is an opaque partition key: a single-asset identifier
/// ("bitcoin") or a synthetic merge tag ("btc_eth_merged"). The store
/// does not distinguish the two. Records are immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture time, UTC (RFC 3339 on the wire). Recency queries rank by
    /// insertion order, not by this field; a backfilled history can make
    /// the two diverge.
    pub timestamp: DateTime<Utc>,
    /// Partition key the record was stored under.
    pub coin: String,
    /// The valued row-per-company table.
    pub data: Table,
}

impl Snapshot {
    /// Stamp a table with the current UTC time under a coin tag.
    pub fn new(coin: impl Into<String>, data: Table) -> Self {
        Self {
            timestamp: Utc::now(),
            coin: coin.into(),
            data,
        }
    }
}

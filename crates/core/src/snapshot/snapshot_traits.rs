//! Snapshot repository trait definitions.

use crate::errors::Result;
use crate::snapshot::Snapshot;
use crate::table::Table;

/// Storage seam for snapshot history.
///
/// Implementations are append-only: no update, no delete, no retention
/// bound. Recency is insertion order, never the timestamp field.
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Stamp `data` with the current UTC time and persist it under
    /// `coin_tag`. Returns the record as stored.
    fn append(&self, data: Table, coin_tag: &str) -> Result<Snapshot>;

    /// The full history in append order; empty when nothing has been
    /// stored yet.
    fn load_all(&self) -> Result<Vec<Snapshot>>;

    /// The last appended snapshot, optionally restricted to a coin tag.
    fn latest(&self, coin_tag: Option<&str>) -> Result<Option<Snapshot>>;
}

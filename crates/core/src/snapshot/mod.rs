//! Snapshot history - append-only, coin-tagged capture log.

mod snapshot_model;
mod snapshot_store;
mod snapshot_traits;

pub use snapshot_model::Snapshot;
pub use snapshot_store::SnapshotStore;
pub use snapshot_traits::SnapshotRepositoryTrait;

#[cfg(test)]
mod snapshot_store_tests;

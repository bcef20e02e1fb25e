//! Snapshot analytics - KPI summaries, merges and what-if scenarios.

mod summary_model;
mod summary_service;

pub use summary_model::{ScenarioProjection, SupplyShare, TreasurySummary};
pub use summary_service::{
    merge_valuations, project_scenario, summarize, supply_share, top_holders,
};

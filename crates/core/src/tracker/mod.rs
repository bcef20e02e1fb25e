//! Capture orchestration - fetch, normalize, valuate, persist.

mod tracker_service;

pub use tracker_service::{CaptureOptions, CaptureOutcome, CaptureStatus, TreasuryTracker};

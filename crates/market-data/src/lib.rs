//! Coffer Market Data Crate
//!
//! Provider-agnostic access to public-company crypto treasury holdings
//! and batched spot prices.
//!
//! # Overview
//!
//! The crate exposes a single trait seam, [`TreasuryDataProvider`], with
//! one concrete implementation backed by the CoinGecko Pro API:
//!
//! - `GET /companies/public_treasury/{asset_id}` — holder records for one
//!   asset, returned as raw JSON (the payload shape drifts upstream, so
//!   interpretation is left to the consumer).
//! - `GET /simple/price` — batched asset/currency price matrix.
//!
//! Requests carry a fixed 30 second deadline and are never retried;
//! failures surface as [`UpstreamError`] and the caller owns the policy
//! of skipping an asset versus aborting.
//!
//! # Core Types
//!
//! - [`TreasuryDataProvider`] - the provider trait
//! - [`CoinGeckoProvider`] - CoinGecko Pro implementation
//! - [`PriceMatrix`] - asset id → currency → rate lookup
//! - [`UpstreamError`] - typed fetch failures

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::UpstreamError;
pub use models::PriceMatrix;
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::TreasuryDataProvider;

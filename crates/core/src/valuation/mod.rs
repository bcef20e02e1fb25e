//! Valuation engine - USD values, display-currency conversion, what-if PnL.

mod valuation_model;
mod valuation_service;

pub use valuation_model::{display_value_column, CompanyHolding};
pub use valuation_service::{apply_values, compute_pnl, resolve_amount_column};

#[cfg(test)]
mod valuation_service_tests;

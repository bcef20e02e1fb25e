//! Display-currency conversion rates.

mod fx_model;

pub use fx_model::FxRates;

//! Treasury data providers.

pub mod coingecko;
mod traits;

pub use coingecko::CoinGeckoProvider;
pub use traits::TreasuryDataProvider;

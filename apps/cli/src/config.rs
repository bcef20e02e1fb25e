use std::path::PathBuf;

use coffer_core::constants::SNAPSHOT_FILE_NAME;

pub struct Config {
    /// CoinGecko Pro API key; requests go unauthenticated without one.
    pub api_key: Option<String>,
    /// Directory holding the snapshot store file.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let data_dir = std::env::var("COFFER_DATA_DIR")
            .unwrap_or_else(|_| "data".to_string())
            .into();

        Self { api_key, data_dir }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE_NAME)
    }
}

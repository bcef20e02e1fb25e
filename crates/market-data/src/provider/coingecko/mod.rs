//! CoinGecko Pro treasury data provider.
//!
//! Endpoints used:
//! - `/companies/public_treasury/{asset_id}` for public-company holder records
//! - `/simple/price` for batched spot prices
//!
//! Authentication is an optional static API key sent as the
//! `x-cg-pro-api-key` header. Requests carry a 30 second deadline and are
//! never retried. API documentation: https://docs.coingecko.com/reference

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::UpstreamError;
use crate::models::PriceMatrix;
use crate::provider::TreasuryDataProvider;

const BASE_URL: &str = "https://pro-api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape CoinGecko uses on non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// CoinGecko Pro treasury data provider.
///
/// Without an API key, requests go out unauthenticated; the upstream then
/// rejects Pro-only endpoints with a provider error.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a new provider with an optional static API key.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different base URL. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make a GET request to the CoinGecko API.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, UpstreamError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self.client.get(&url).header("accept", "application/json");

        if let Some(api_key) = &self.api_key {
            request = request.header("x-cg-pro-api-key", api_key);
        }

        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("CoinGecko request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                UpstreamError::Network(e)
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstreamError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(UpstreamError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::AssetNotFound(endpoint.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            // CoinGecko wraps most failures in an {"error": "..."} body
            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(UpstreamError::Provider {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(UpstreamError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| UpstreamError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

#[async_trait]
impl TreasuryDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn treasury_holdings(&self, asset_id: &str) -> Result<Value, UpstreamError> {
        let endpoint = format!("/companies/public_treasury/{}", asset_id);
        let text = self.fetch(&endpoint, &[]).await?;

        serde_json::from_str(&text).map_err(|e| UpstreamError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to decode treasury payload: {}", e),
        })
    }

    async fn simple_price(
        &self,
        asset_ids: &[&str],
        vs_currencies: &[&str],
    ) -> Result<PriceMatrix, UpstreamError> {
        let ids = asset_ids.join(",");
        let vs = vs_currencies.join(",");
        let params = [("ids", ids.as_str()), ("vs_currencies", vs.as_str())];

        let text = self.fetch("/simple/price", &params).await?;

        serde_json::from_str(&text).map_err(|e| UpstreamError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to decode price response: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = CoinGeckoProvider::new(None);
        assert_eq!(provider.id(), "COINGECKO");
    }

    #[test]
    fn test_error_response_decoding() {
        let body = r#"{"error": "coin not found"}"#;
        let resp: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.error.as_deref(), Some("coin not found"));

        let body = r#"{"status": "ok"}"#;
        let resp: ErrorResponse = serde_json::from_str(body).unwrap();
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_treasury_payload_stays_raw() {
        // The provider must not reshape the payload: a keyed object and a
        // bare list both pass through untouched.
        let keyed = r#"{"companies": [{"name": "A", "total_holdings": 5}]}"#;
        let value: Value = serde_json::from_str(keyed).unwrap();
        assert!(value.get("companies").is_some());

        let bare = r#"[{"name": "A", "total_holdings": 5}]"#;
        let value: Value = serde_json::from_str(bare).unwrap();
        assert!(value.is_array());
    }
}

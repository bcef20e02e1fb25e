//! Error types for the market data crate.

use thiserror::Error;

/// Errors surfaced by treasury data providers.
///
/// Fetch failures are never retried automatically. The caller decides
/// whether a failure skips the affected asset or aborts the run.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream does not know the requested asset (HTTP 404).
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The provider rate limited the request (HTTP 429 or quota exhausted).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request hit the fixed per-request deadline.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-2xx status or rejected the request.
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A transport-level failure while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Parse error: {provider} - {message}")]
    Parse {
        /// The provider whose response failed to decode
        provider: String,
        /// Description of the decode failure
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = UpstreamError::AssetNotFound("dogecoin".to_string());
        assert_eq!(format!("{}", error), "Asset not found: dogecoin");

        let error = UpstreamError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: COINGECKO");

        let error = UpstreamError::Provider {
            provider: "COINGECKO".to_string(),
            message: "API key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: COINGECKO - API key invalid"
        );
    }
}

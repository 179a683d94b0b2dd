//! Fee-estimate client for the earn.com recommended-fees API.

use async_trait::async_trait;
use btc_pay::{FeeRateProvider, FeeTier, ProviderError};

use crate::error::HttpProviderError;
use crate::types::{EarnConfig, RecommendedFees};

/// HTTP client for the recommended-fees API.
#[derive(Debug, Clone)]
pub struct EarnClient {
    /// Client configuration.
    config: EarnConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl EarnClient {
    /// Create a new client with the given configuration.
    pub fn new(config: EarnConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the current recommended rates for every tier.
    pub async fn recommended(&self) -> Result<RecommendedFees, HttpProviderError> {
        let url = format!("{}/api/v1/fees/recommended", self.config.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(HttpProviderError::Server {
                status_code: status.as_u16(),
                message,
            });
        }

        let fees: RecommendedFees = serde_json::from_str(&resp.text().await?)?;
        Ok(fees)
    }
}

#[async_trait]
impl FeeRateProvider for EarnClient {
    async fn fee_rate(&self, tier: FeeTier) -> Result<u64, ProviderError> {
        let fees = self.recommended().await.map_err(ProviderError::from)?;
        Ok(fees.rate_for(tier))
    }
}

//! Block explorer client for transaction lookups.

use async_trait::async_trait;
use btc_pay::{ProviderError, TxnInfoProvider};

use crate::error::HttpProviderError;
use crate::types::BlockExplorerConfig;

/// HTTP client for the block explorer transaction API.
#[derive(Debug, Clone)]
pub struct BlockExplorerClient {
    /// Client configuration.
    config: BlockExplorerConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl BlockExplorerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BlockExplorerConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// The service's record for the transaction `tx_hash`, verbatim.
    ///
    /// The record shape is explorer-specific and not standardized.
    pub async fn transaction(
        &self,
        tx_hash: &str,
    ) -> Result<serde_json::Value, HttpProviderError> {
        let url = format!("{}/api/tx/{}", self.config.base_url, tx_hash);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(HttpProviderError::Server {
                status_code: status.as_u16(),
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TxnInfoProvider for BlockExplorerClient {
    async fn txn_info(&self, tx_hash: &str) -> Result<serde_json::Value, ProviderError> {
        self.transaction(tx_hash).await.map_err(ProviderError::from)
    }
}

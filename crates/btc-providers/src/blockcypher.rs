//! BlockCypher client for submitting raw transactions.

use async_trait::async_trait;
use btc_pay::{ProviderError, PushTxProvider};
use serde::Serialize;

use crate::error::HttpProviderError;
use crate::types::BlockCypherConfig;

/// Body of a push request: the raw transaction under a `tx` key.
#[derive(Serialize)]
struct PushTxBody<'a> {
    tx: &'a str,
}

/// HTTP client for the BlockCypher transaction API.
#[derive(Debug, Clone)]
pub struct BlockCypherClient {
    /// Client configuration.
    config: BlockCypherConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl BlockCypherClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BlockCypherConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Submit a raw hex-encoded transaction.
    ///
    /// Returns the service's JSON acknowledgment verbatim.
    pub async fn push_raw_tx(
        &self,
        raw_tx_hex: &str,
    ) -> Result<serde_json::Value, HttpProviderError> {
        let url = format!("{}/txs/push", self.config.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&PushTxBody { tx: raw_tx_hex })
            .send()
            .await?;
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
impl PushTxProvider for BlockCypherClient {
    async fn push_tx(&self, raw_tx_hex: &str) -> Result<serde_json::Value, ProviderError> {
        self.push_raw_tx(raw_tx_hex).await.map_err(ProviderError::from)
    }
}

//! blockchain.info client: confirmed balances and unspent-output listings.

use async_trait::async_trait;
use btc_pay::{BalanceProvider, ProviderError, Utxo, UtxoProvider};

use crate::error::HttpProviderError;
use crate::types::{BlockchainInfoConfig, UnspentListing};

/// Depth a balance must be buried under before the service counts it.
const BALANCE_CONFIRMATIONS: u32 = 6;

/// HTTP client for the blockchain.info query API.
#[derive(Debug, Clone)]
pub struct BlockchainInfoClient {
    /// Client configuration.
    config: BlockchainInfoConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl BlockchainInfoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BlockchainInfoConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Confirmed balance of `address`, in satoshis.
    pub async fn address_balance(&self, address: &str) -> Result<u64, HttpProviderError> {
        let url = format!(
            "{}/q/addressbalance/{}?confirmations={}",
            self.config.base_url, address, BALANCE_CONFIRMATIONS
        );
        let text = self.get_text(&url).await?;
        text.trim().parse::<u64>().map_err(|e| {
            HttpProviderError::UnexpectedResponse(format!("balance `{}`: {}", text.trim(), e))
        })
    }

    /// Unspent outputs of `address`, in the order the service lists them.
    pub async fn unspent_outputs(&self, address: &str) -> Result<Vec<Utxo>, HttpProviderError> {
        let url = format!("{}/unspent?active={}", self.config.base_url, address);
        let text = self.get_text(&url).await?;
        let listing: UnspentListing = serde_json::from_str(&text)?;

        Ok(listing
            .unspent_outputs
            .into_iter()
            .map(|entry| Utxo {
                txid: entry.tx_hash_big_endian,
                vout: entry.tx_output_n,
                satoshis: entry.value,
                confirmations: entry.confirmations,
            })
            .collect())
    }

    /// Perform a GET request and return the body of a successful response.
    async fn get_text(&self, url: &str) -> Result<String, HttpProviderError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(HttpProviderError::Server {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl BalanceProvider for BlockchainInfoClient {
    async fn balance(&self, address: &str) -> Result<u64, ProviderError> {
        self.address_balance(address).await.map_err(ProviderError::from)
    }
}

#[async_trait]
impl UtxoProvider for BlockchainInfoClient {
    async fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ProviderError> {
        self.unspent_outputs(address).await.map_err(ProviderError::from)
    }
}

//! Client configuration and response models for the HTTP providers.

use btc_pay::{FeeTier, Network};
use serde::{Deserialize, Serialize};

/// Configuration for a [`BlockchainInfoClient`](crate::BlockchainInfoClient).
#[derive(Debug, Clone)]
pub struct BlockchainInfoConfig {
    /// Base URL of the blockchain.info-compatible query API.
    pub base_url: String,
}

impl BlockchainInfoConfig {
    /// The service endpoint for the given network.
    pub fn for_network(network: Network) -> Self {
        let base_url = match network {
            Network::Mainnet => "https://blockchain.info",
            Network::Testnet => "https://testnet.blockchain.info",
        };
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl Default for BlockchainInfoConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// Configuration for an [`EarnClient`](crate::EarnClient).
///
/// The fee-estimate service serves one fee table for both networks, so
/// there is no per-network endpoint.
#[derive(Debug, Clone)]
pub struct EarnConfig {
    /// Base URL of the recommended-fees API.
    pub base_url: String,
}

impl Default for EarnConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bitcoinfees.earn.com".to_string(),
        }
    }
}

/// Configuration for a [`BlockCypherClient`](crate::BlockCypherClient).
#[derive(Debug, Clone)]
pub struct BlockCypherConfig {
    /// Base URL of the BlockCypher chain API, including the chain segment.
    pub base_url: String,
}

impl BlockCypherConfig {
    /// The service endpoint for the given network.
    pub fn for_network(network: Network) -> Self {
        let base_url = match network {
            Network::Mainnet => "https://api.blockcypher.com/v1/btc/main",
            Network::Testnet => "https://api.blockcypher.com/v1/btc/test3",
        };
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl Default for BlockCypherConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// Configuration for a [`BlockExplorerClient`](crate::BlockExplorerClient).
#[derive(Debug, Clone)]
pub struct BlockExplorerConfig {
    /// Base URL of the block explorer API.
    pub base_url: String,
}

impl BlockExplorerConfig {
    /// The service endpoint for the given network.
    pub fn for_network(network: Network) -> Self {
        let base_url = match network {
            Network::Mainnet => "https://blockexplorer.com",
            Network::Testnet => "https://testnet.blockexplorer.com",
        };
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl Default for BlockExplorerConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// One entry in blockchain.info's unspent-output listing.
#[derive(Debug, Clone, Deserialize)]
pub struct UnspentEntry {
    /// Transaction id in display (big-endian) order.
    pub tx_hash_big_endian: String,
    /// Output index within the transaction.
    pub tx_output_n: u32,
    /// Output value in satoshis.
    pub value: u64,
    /// Confirmation count; absent for unconfirmed outputs.
    #[serde(default)]
    pub confirmations: u32,
}

/// The blockchain.info `/unspent` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UnspentListing {
    /// The outputs, in the order the service reports them.
    pub unspent_outputs: Vec<UnspentEntry>,
}

/// Recommended fee rates per speed tier, as served by the fee-estimate API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFees {
    /// Rate targeting inclusion in the next block, satoshis per byte.
    pub fastest_fee: u64,
    /// Rate targeting confirmation within thirty minutes.
    pub half_hour_fee: u64,
    /// Rate targeting confirmation within an hour.
    pub hour_fee: u64,
}

impl RecommendedFees {
    /// The rate quoted for a named tier.
    pub fn rate_for(&self, tier: FeeTier) -> u64 {
        match tier {
            FeeTier::Fastest => self.fastest_fee,
            FeeTier::HalfHour => self.half_hour_fee,
            FeeTier::Hour => self.hour_fee,
        }
    }
}

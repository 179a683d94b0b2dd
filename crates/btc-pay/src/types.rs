//! Core data types: networks, fee specifications, and unspent outputs.

use serde::{Deserialize, Serialize};

use crate::error::PayError;

/// The Bitcoin network a payment is built for.
///
/// Selects both the address/key encoding rules and, when the default
/// providers are used, which remote endpoints are queried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production Bitcoin network.
    #[default]
    Mainnet,
    /// The public test network.
    Testnet,
}

impl Network {
    /// The lowercase configuration name of this network.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = PayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(PayError::UnknownNetwork(other.to_string())),
        }
    }
}

impl From<Network> for bitcoin::Network {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => bitcoin::Network::Bitcoin,
            Network::Testnet => bitcoin::Network::Testnet,
        }
    }
}

/// A named confirmation-speed tier recognized by fee-rate providers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeTier {
    /// Target inclusion in the next block.
    #[default]
    #[serde(rename = "fastest")]
    Fastest,
    /// Target confirmation within roughly thirty minutes.
    #[serde(rename = "halfHour")]
    HalfHour,
    /// Target confirmation within roughly an hour.
    #[serde(rename = "hour")]
    Hour,
}

impl FeeTier {
    /// The tier name as fee-rate providers spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeTier::Fastest => "fastest",
            FeeTier::HalfHour => "halfHour",
            FeeTier::Hour => "hour",
        }
    }
}

impl std::fmt::Display for FeeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the fee rate for a payment is determined.
///
/// A literal rate is used exactly as given, without consulting any
/// provider. A named tier is resolved through the configured
/// [`FeeRateProvider`](crate::provider::FeeRateProvider) at send time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeSpec {
    /// A literal rate in satoshis per byte.
    Rate(u64),
    /// A named speed tier to resolve through the fee-rate provider.
    Tier(FeeTier),
}

impl Default for FeeSpec {
    fn default() -> Self {
        FeeSpec::Tier(FeeTier::default())
    }
}

impl From<u64> for FeeSpec {
    fn from(rate: u64) -> Self {
        FeeSpec::Rate(rate)
    }
}

impl From<FeeTier> for FeeSpec {
    fn from(tier: FeeTier) -> Self {
        FeeSpec::Tier(tier)
    }
}

/// An unspent transaction output as reported by a UTXO provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Transaction id holding the output, in display (big-endian) hex.
    pub txid: String,
    /// Index of the output within that transaction.
    pub vout: u32,
    /// Value of the output in satoshis.
    pub satoshis: u64,
    /// Number of blocks mined on top of the block containing the output.
    pub confirmations: u32,
}

//! Default provider wiring per network.

use std::sync::Arc;

use btc_pay::{Network, ProviderSet};

use crate::block_explorer::BlockExplorerClient;
use crate::blockchain_info::BlockchainInfoClient;
use crate::blockcypher::BlockCypherClient;
use crate::earn::EarnClient;
use crate::types::{
    BlockCypherConfig, BlockExplorerConfig, BlockchainInfoConfig, EarnConfig,
};

/// The default provider set for `network`.
///
/// blockchain.info answers balance and unspent-output queries, the
/// recommended-fees API supplies fee rates, BlockCypher accepts
/// submissions, and the block explorer serves transaction lookups. Any
/// slot can be swapped afterwards with the
/// [`ProviderSet::with_*`](btc_pay::ProviderSet::with_fees) methods.
pub fn default_providers(network: Network) -> ProviderSet {
    let blockchain_info = Arc::new(BlockchainInfoClient::new(
        BlockchainInfoConfig::for_network(network),
    ));

    ProviderSet {
        balance: blockchain_info.clone(),
        utxo: blockchain_info,
        fees: Arc::new(EarnClient::new(EarnConfig::default())),
        pushtx: Arc::new(BlockCypherClient::new(BlockCypherConfig::for_network(
            network,
        ))),
        txn_info: Arc::new(BlockExplorerClient::new(BlockExplorerConfig::for_network(
            network,
        ))),
    }
}

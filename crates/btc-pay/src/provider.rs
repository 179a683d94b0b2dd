//! Provider capability traits and the per-call provider set.
//!
//! Each category of chain data a payment needs (balances, fee rates,
//! unspent outputs, transaction submission, transaction lookup) is a
//! trait with one method, so network-specific implementations are
//! interchangeable. A [`ProviderSet`] bundles one implementation per
//! category and travels with the call instead of living in shared state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{FeeTier, Utxo};

/// Answers confirmed-balance queries for an address.
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Confirmed balance of `address`, in satoshis.
    async fn balance(&self, address: &str) -> Result<u64, ProviderError>;
}

/// Quotes the current fee rate for a named speed tier.
#[async_trait]
pub trait FeeRateProvider: Send + Sync {
    /// Fee rate for `tier`, in satoshis per byte.
    async fn fee_rate(&self, tier: FeeTier) -> Result<u64, ProviderError>;
}

/// Lists the unspent outputs of an address.
#[async_trait]
pub trait UtxoProvider: Send + Sync {
    /// Unspent outputs of `address`, in the order the provider reports them.
    ///
    /// The order is significant: coin selection consumes it as delivered.
    async fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ProviderError>;
}

/// Submits a serialized transaction to the network.
#[async_trait]
pub trait PushTxProvider: Send + Sync {
    /// Submit `raw_tx_hex` and return the provider's acknowledgment verbatim.
    ///
    /// Acknowledgment shape is provider-specific and not standardized.
    async fn push_tx(&self, raw_tx_hex: &str) -> Result<serde_json::Value, ProviderError>;
}

/// Looks up a transaction record by hash.
#[async_trait]
pub trait TxnInfoProvider: Send + Sync {
    /// The provider-specific record describing the transaction `tx_hash`.
    async fn txn_info(&self, tx_hash: &str) -> Result<serde_json::Value, ProviderError>;
}

/// One provider per operation, bundled for a single call.
///
/// Defaults are assigned at construction (see `btc-providers`'
/// `default_providers`), and any slot can be swapped with the `with_*`
/// methods before the set is handed to the pipeline.
#[derive(Clone)]
pub struct ProviderSet {
    /// Provider answering confirmed-balance queries.
    pub balance: Arc<dyn BalanceProvider>,
    /// Provider quoting fee rates per tier.
    pub fees: Arc<dyn FeeRateProvider>,
    /// Provider listing unspent outputs.
    pub utxo: Arc<dyn UtxoProvider>,
    /// Provider accepting transaction submissions.
    pub pushtx: Arc<dyn PushTxProvider>,
    /// Provider serving transaction lookups.
    pub txn_info: Arc<dyn TxnInfoProvider>,
}

impl ProviderSet {
    /// Replace the balance provider.
    pub fn with_balance(mut self, provider: Arc<dyn BalanceProvider>) -> Self {
        self.balance = provider;
        self
    }

    /// Replace the fee-rate provider.
    pub fn with_fees(mut self, provider: Arc<dyn FeeRateProvider>) -> Self {
        self.fees = provider;
        self
    }

    /// Replace the unspent-output provider.
    pub fn with_utxo(mut self, provider: Arc<dyn UtxoProvider>) -> Self {
        self.utxo = provider;
        self
    }

    /// Replace the submission provider.
    pub fn with_pushtx(mut self, provider: Arc<dyn PushTxProvider>) -> Self {
        self.pushtx = provider;
        self
    }

    /// Replace the transaction-lookup provider.
    pub fn with_txn_info(mut self, provider: Arc<dyn TxnInfoProvider>) -> Self {
        self.txn_info = provider;
        self
    }
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet").finish_non_exhaustive()
    }
}

//! Read-only account and transaction queries.

use serde_json::Value;

use crate::error::PayError;
use crate::provider::ProviderSet;
use crate::types::Utxo;

/// Confirmed balance of `address`, in satoshis.
pub async fn get_balance(address: &str, providers: &ProviderSet) -> Result<u64, PayError> {
    if address.is_empty() {
        return Err(PayError::MissingOption("address"));
    }
    Ok(providers.balance.balance(address).await?)
}

/// The provider-specific record describing the transaction `tx_hash`.
pub async fn get_transaction_info(
    tx_hash: &str,
    providers: &ProviderSet,
) -> Result<Value, PayError> {
    if tx_hash.is_empty() {
        return Err(PayError::MissingOption("tx_hash"));
    }
    Ok(providers.txn_info.txn_info(tx_hash).await?)
}

/// Unspent outputs currently credited to `address`, in provider order.
pub async fn get_unspent_outputs(
    address: &str,
    providers: &ProviderSet,
) -> Result<Vec<Utxo>, PayError> {
    if address.is_empty() {
        return Err(PayError::MissingOption("address"));
    }
    Ok(providers.utxo.utxos(address).await?)
}

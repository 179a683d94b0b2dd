//! First-fit selection of confirmed coins.

use crate::error::PayError;
use crate::types::Utxo;

/// Minimum confirmation depth before an output may fund a payment.
pub const MIN_CONFIRMATIONS: u32 = 6;

/// The outcome of coin selection: the coins to spend and their combined value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinSelection {
    /// Selected coins, in the order the provider delivered them.
    pub coins: Vec<Utxo>,
    /// Sum of the selected coins' satoshi values.
    pub total: u64,
}

/// Select coins covering `amount` satoshis.
///
/// Coins are taken in the order given, skipping any with fewer than
/// [`MIN_CONFIRMATIONS`] confirmations, until their combined value reaches
/// `amount`. No reordering or change minimization is attempted; the first
/// sufficient prefix of eligible coins wins.
///
/// # Arguments
/// * `utxos` - Candidate outputs, in the order the provider delivered them.
/// * `amount` - The amount to cover, in satoshis.
///
/// # Returns
/// `Ok(CoinSelection)` with the selected coins and their total, or
/// [`PayError::InsufficientFunds`] when the eligible coins run out short
/// of `amount`; the error carries the combined value of every eligible
/// coin and the requested amount.
pub fn select_coins(utxos: &[Utxo], amount: u64) -> Result<CoinSelection, PayError> {
    let mut coins = Vec::new();
    let mut total = 0u64;

    for utxo in utxos {
        if utxo.confirmations < MIN_CONFIRMATIONS {
            log::debug!(
                "skipping {}:{} with {} confirmations",
                utxo.txid,
                utxo.vout,
                utxo.confirmations
            );
            continue;
        }

        total += utxo.satoshis;
        coins.push(utxo.clone());

        if total >= amount {
            break;
        }
    }

    if total < amount {
        return Err(PayError::InsufficientFunds {
            available: total,
            required: amount,
        });
    }

    Ok(CoinSelection { coins, total })
}

//! Assembly of the unsigned payment transaction.

use std::str::FromStr;

use bitcoin::absolute::LockTime;
use bitcoin::transaction::Version;
use bitcoin::{Address, Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

use crate::error::PayError;
use crate::select::CoinSelection;
use crate::send::PaymentRequest;

/// An unsigned payment transaction together with the coins funding it.
///
/// Invariant: the combined value of the funding coins minus the combined
/// value of the outputs equals `fee` exactly.
#[derive(Clone, Debug)]
pub struct AssembledPayment {
    /// The unsigned transaction: selected inputs, payment output, and an
    /// optional change output, in that order.
    pub transaction: Transaction,
    /// The coins funding the transaction, in input order.
    pub coins: CoinSelection,
    /// The fee in satoshis left to miners by the input/output difference.
    pub fee: u64,
}

/// Parse `address` and check it belongs to `network`.
fn parse_address(address: &str, network: bitcoin::Network) -> Result<Address, PayError> {
    Address::from_str(address)
        .and_then(|parsed| parsed.require_network(network))
        .map_err(|e| PayError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build the unsigned transaction for `request` funded by `selection`.
///
/// The payment output carries `amount - fee` to the recipient. Any value
/// in the selection above `amount` becomes a change output directed back
/// to the sender, or to the recipient when the request empties the
/// wallet. A change value of zero produces no change output at all.
///
/// # Arguments
/// * `selection` - The coins funding the transaction.
/// * `request` - The payment being built; supplies addresses and amounts.
/// * `fee` - The fee in satoshis, already computed from the transaction shape.
///
/// # Returns
/// `Ok(AssembledPayment)` holding the unsigned transaction, or
/// [`PayError::FeeExceedsAmount`] when `fee` is at least the requested
/// amount.
pub fn assemble(
    selection: CoinSelection,
    request: &PaymentRequest,
    fee: u64,
) -> Result<AssembledPayment, PayError> {
    if fee >= request.amount {
        return Err(PayError::FeeExceedsAmount {
            fee,
            amount: request.amount,
        });
    }

    let network = bitcoin::Network::from(request.network);
    let to = parse_address(&request.to, network)?;

    let mut inputs = Vec::with_capacity(selection.coins.len());
    for coin in &selection.coins {
        let txid = Txid::from_str(&coin.txid).map_err(|e| PayError::InvalidUtxo {
            txid: coin.txid.clone(),
            reason: e.to_string(),
        })?;
        inputs.push(TxIn {
            previous_output: OutPoint::new(txid, coin.vout),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        });
    }

    let mut outputs = vec![TxOut {
        value: Amount::from_sat(request.amount - fee),
        script_pubkey: to.script_pubkey(),
    }];

    let change = selection.total - request.amount;
    if change > 0 {
        let change_target = if request.empty_wallet {
            &request.to
        } else {
            &request.from
        };
        let change_address = parse_address(change_target, network)?;
        outputs.push(TxOut {
            value: Amount::from_sat(change),
            script_pubkey: change_address.script_pubkey(),
        });
        log::debug!("routing {change} sat of change to {change_target}");
    }

    let transaction = Transaction {
        version: Version::ONE,
        lock_time: LockTime::ZERO,
        input: inputs,
        output: outputs,
    };

    Ok(AssembledPayment {
        transaction,
        coins: selection,
        fee,
    })
}

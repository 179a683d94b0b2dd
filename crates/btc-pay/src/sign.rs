//! Single-key signing of assembled payments.

use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::secp256k1::{Message, Secp256k1};
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::{NetworkKind, PrivateKey, ScriptBuf, Transaction};

use crate::build::AssembledPayment;
use crate::error::PayError;
use crate::types::Network;

/// A fully signed transaction in serialized form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Display-order transaction id.
    pub txid: String,
    /// Raw transaction bytes, hex encoded, ready for submission.
    pub raw_hex: String,
    /// The signed transaction, for callers inspecting inputs and outputs.
    pub transaction: Transaction,
}

fn network_kind_name(kind: NetworkKind) -> &'static str {
    match kind {
        NetworkKind::Main => "mainnet",
        NetworkKind::Test => "testnet",
    }
}

/// Sign every input of `assembled` with the key decoded from `wif`.
///
/// All inputs are assumed to spend outputs locked to the
/// pay-to-public-key-hash script of the single supplied key; per-input
/// keys are not supported. Signing uses legacy `SIGHASH_ALL` with RFC6979
/// deterministic nonces, so identical inputs and key material always
/// produce identical bytes.
///
/// # Arguments
/// * `assembled` - The unsigned transaction and its funding coins.
/// * `wif` - The sender's private key in wallet import format.
/// * `network` - The network the payment targets; must match the key's.
///
/// # Returns
/// `Ok(SignedTransaction)` with the raw hex and display txid, or a key,
/// network-mismatch, or signing error.
pub fn sign(
    assembled: AssembledPayment,
    wif: &str,
    network: Network,
) -> Result<SignedTransaction, PayError> {
    let secp = Secp256k1::new();

    let private_key = PrivateKey::from_wif(wif)?;
    let requested_kind = NetworkKind::from(bitcoin::Network::from(network));
    if private_key.network != requested_kind {
        return Err(PayError::KeyNetworkMismatch {
            key_network: network_kind_name(private_key.network).to_string(),
            requested_network: network.to_string(),
        });
    }
    let public_key = private_key.public_key(&secp);

    // Every input spends an output locked to this key's pubkey hash.
    let script_code = ScriptBuf::new_p2pkh(&public_key.pubkey_hash());

    let mut transaction = assembled.transaction;
    let input_count = transaction.input.len();

    let mut sighashes = Vec::with_capacity(input_count);
    {
        let cache = SighashCache::new(&transaction);
        for index in 0..input_count {
            let sighash = cache
                .legacy_signature_hash(index, &script_code, EcdsaSighashType::All.to_u32())
                .map_err(|e| {
                    PayError::Signing(format!("computing sighash for input {index}: {e}"))
                })?;
            sighashes.push(sighash);
        }
    }

    for (index, sighash) in sighashes.into_iter().enumerate() {
        let message = Message::from_digest_slice(sighash.as_ref())
            .map_err(|e| PayError::Signing(format!("digest for input {index}: {e}")))?;
        let signature = bitcoin::ecdsa::Signature {
            signature: secp.sign_ecdsa(&message, &private_key.inner),
            sighash_type: EcdsaSighashType::All,
        };

        let push_sig = PushBytesBuf::try_from(signature.to_vec()).map_err(|e| {
            PayError::Signing(format!("encoding signature for input {index}: {e}"))
        })?;
        transaction.input[index].script_sig = Builder::new()
            .push_slice(push_sig)
            .push_key(&public_key)
            .into_script();
    }

    let raw_hex = hex::encode(bitcoin::consensus::encode::serialize(&transaction));
    let txid = transaction.compute_txid().to_string();
    log::debug!("signed {input_count} inputs of {txid}");

    Ok(SignedTransaction {
        txid,
        raw_hex,
        transaction,
    })
}

//! The payment pipeline: validate, price, fund, assemble, sign, dispatch.

use serde_json::Value;

use crate::build;
use crate::error::PayError;
use crate::fee;
use crate::provider::ProviderSet;
use crate::select;
use crate::sign::{self, SignedTransaction};
use crate::types::{FeeSpec, Network};

/// Everything needed to build and send one payment.
///
/// One request describes one single-recipient payment; requests are not
/// shared or reused across calls. The fee is taken out of `amount`, so
/// the recipient receives `amount` minus the computed fee.
#[derive(Clone, Debug, Default)]
pub struct PaymentRequest {
    /// Address whose coins fund the payment.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Amount to spend, in satoshis.
    pub amount: u64,
    /// Sender private key in wallet import format.
    pub private_key_wif: String,
    /// Network to build for.
    pub network: Network,
    /// Fee specification; defaults to the fastest named tier.
    pub fee: FeeSpec,
    /// Build and sign, but return instead of submitting.
    pub dry_run: bool,
    /// Send any change to the recipient instead of back to the sender.
    pub empty_wallet: bool,
}

impl PaymentRequest {
    /// Check that every required option is present.
    ///
    /// Runs before any provider is contacted, so a rejected request
    /// costs no network traffic.
    fn validate(&self) -> Result<(), PayError> {
        if self.from.is_empty() {
            return Err(PayError::MissingOption("from"));
        }
        if self.to.is_empty() {
            return Err(PayError::MissingOption("to"));
        }
        if self.private_key_wif.is_empty() {
            return Err(PayError::MissingOption("private_key_wif"));
        }
        Ok(())
    }
}

/// What became of a dispatched payment.
#[derive(Clone, Debug)]
pub enum SendOutcome {
    /// The signed transaction, never submitted.
    DryRun(SignedTransaction),
    /// The transaction was handed to the submission provider.
    Broadcast {
        /// The submitted transaction.
        transaction: SignedTransaction,
        /// The provider's acknowledgment, verbatim and provider-specific.
        ack: Value,
    },
}

/// Assemble, fund, sign, and dispatch a single-recipient payment.
///
/// The pipeline resolves the fee rate, fetches and selects confirmed
/// coins, computes the fee from the estimated transaction size, builds
/// the payment and change outputs, and signs every input with the
/// request's key. A dry run stops there and returns the signed
/// transaction; otherwise the raw hex is handed to the submission
/// provider and its acknowledgment returned verbatim.
///
/// Any failure aborts the pipeline at the step it occurs; no partial
/// transaction is ever returned.
///
/// # Arguments
/// * `request` - The payment to build; validated before any network call.
/// * `providers` - The provider set answering fee, coin, and submission
///   calls for this invocation.
///
/// # Returns
/// [`SendOutcome::DryRun`] with the signed transaction, or
/// [`SendOutcome::Broadcast`] with the submission acknowledgment.
pub async fn send_transaction(
    request: &PaymentRequest,
    providers: &ProviderSet,
) -> Result<SendOutcome, PayError> {
    request.validate()?;

    let fee_rate = fee::resolve_fee_rate(&request.fee, providers.fees.as_ref()).await?;
    let utxos = providers.utxo.utxos(&request.from).await?;
    log::debug!(
        "{} unspent outputs for {}, fee rate {fee_rate} sat/byte",
        utxos.len(),
        request.from
    );

    let selection = select::select_coins(&utxos, request.amount)?;

    let change = selection.total - request.amount;
    let num_outputs = if change > 0 { 2 } else { 1 };
    let fee = fee::estimate_fee(selection.coins.len(), num_outputs, fee_rate);
    log::debug!(
        "selected {} coins totalling {} sat, fee {fee} sat",
        selection.coins.len(),
        selection.total
    );

    let assembled = build::assemble(selection, request, fee)?;
    let signed = sign::sign(assembled, &request.private_key_wif, request.network)?;
    log::info!(
        "built transaction {} paying {} sat to {}",
        signed.txid,
        request.amount - fee,
        request.to
    );

    if request.dry_run {
        return Ok(SendOutcome::DryRun(signed));
    }

    let ack = providers.pushtx.push_tx(&signed.raw_hex).await?;
    Ok(SendOutcome::Broadcast {
        transaction: signed,
        ack,
    })
}

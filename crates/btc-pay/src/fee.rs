//! Fee-rate resolution and serialized-size estimation.

use crate::error::PayError;
use crate::provider::FeeRateProvider;
use crate::types::FeeSpec;

/// Bytes each input contributes to the size estimate, before slack.
const INPUT_BYTES: u64 = 180;

/// Bytes each output contributes to the size estimate.
const OUTPUT_BYTES: u64 = 34;

/// Fixed framing overhead of a transaction, in bytes.
const BASE_BYTES: u64 = 10;

/// Resolve a fee specification into a concrete satoshi-per-byte rate.
///
/// A [`FeeSpec::Rate`] is returned as-is without contacting the provider.
/// A [`FeeSpec::Tier`] makes exactly one provider call; its failure is
/// propagated unmodified, with no retry.
///
/// # Arguments
/// * `spec` - The literal rate or named tier from the request.
/// * `provider` - Consulted only for named tiers.
///
/// # Returns
/// The rate in satoshis per byte.
pub async fn resolve_fee_rate(
    spec: &FeeSpec,
    provider: &dyn FeeRateProvider,
) -> Result<u64, PayError> {
    match spec {
        FeeSpec::Rate(rate) => Ok(*rate),
        FeeSpec::Tier(tier) => {
            let rate = provider.fee_rate(*tier).await?;
            log::debug!("fee tier {tier} resolved to {rate} sat/byte");
            Ok(rate)
        }
    }
}

/// Estimate the serialized size in bytes of a transaction with the given
/// input and output counts.
///
/// Each input is counted at 181 bytes (180 plus one byte of per-input
/// slack) and each output at 34 bytes, on top of a fixed 10-byte frame.
/// The formula is fixed for compatibility with other implementations of
/// the same estimator.
pub fn estimate_size(num_inputs: usize, num_outputs: usize) -> u64 {
    let inputs = num_inputs as u64;
    let outputs = num_outputs as u64;
    inputs * INPUT_BYTES + outputs * OUTPUT_BYTES + BASE_BYTES + inputs
}

/// The fee in satoshis for a transaction of the given shape at `sat_per_byte`.
pub fn estimate_fee(num_inputs: usize, num_outputs: usize, sat_per_byte: u64) -> u64 {
    estimate_size(num_inputs, num_outputs) * sat_per_byte
}

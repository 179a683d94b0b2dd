//! Tests for the payment pipeline: coin selection, fee math, assembly
//! invariants, signing, dispatch, and the read-only queries, driven
//! through in-memory provider stubs.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::build::assemble;
use crate::error::{PayError, ProviderError};
use crate::fee::{estimate_fee, estimate_size};
use crate::provider::{
    BalanceProvider, FeeRateProvider, ProviderSet, PushTxProvider, TxnInfoProvider, UtxoProvider,
};
use crate::query::{get_balance, get_transaction_info, get_unspent_outputs};
use crate::select::{select_coins, MIN_CONFIRMATIONS};
use crate::send::{send_transaction, PaymentRequest, SendOutcome};
use crate::sign::sign;
use crate::types::{FeeSpec, FeeTier, Network, Utxo};

/// Mainnet WIF for the secp256k1 secret key 1 (compressed).
const SENDER_WIF: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";

/// The P2PKH address of [`SENDER_WIF`]'s public key.
const SENDER_ADDRESS: &str = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH";

/// An unrelated mainnet P2PKH address used as the recipient.
const RECIPIENT_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

/// A well-formed transaction id for synthetic coins.
const COIN_TXID: &str = "9f96ade4b41d5433f4eda31e1738ec2b36f6e7d1420d94a6af99801a88f7f7ff";

fn coin(satoshis: u64, confirmations: u32) -> Utxo {
    Utxo {
        txid: COIN_TXID.to_string(),
        vout: 0,
        satoshis,
        confirmations,
    }
}

// -----------------------------------------------------------------------
// Provider stubs
// -----------------------------------------------------------------------

/// Fee provider returning a fixed rate and recording whether it was asked.
struct StaticFees {
    rate: u64,
    called: Arc<AtomicBool>,
}

#[async_trait]
impl FeeRateProvider for StaticFees {
    async fn fee_rate(&self, _tier: FeeTier) -> Result<u64, ProviderError> {
        self.called.store(true, Ordering::SeqCst);
        Ok(self.rate)
    }
}

struct StaticUtxos(Vec<Utxo>);

#[async_trait]
impl UtxoProvider for StaticUtxos {
    async fn utxos(&self, _address: &str) -> Result<Vec<Utxo>, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Submission provider recording every raw transaction handed to it.
struct RecordingPushTx {
    pushed: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PushTxProvider for RecordingPushTx {
    async fn push_tx(&self, raw_tx_hex: &str) -> Result<serde_json::Value, ProviderError> {
        self.pushed.lock().unwrap().push(raw_tx_hex.to_string());
        Ok(json!({ "success": true }))
    }
}

struct StaticBalance(u64);

#[async_trait]
impl BalanceProvider for StaticBalance {
    async fn balance(&self, _address: &str) -> Result<u64, ProviderError> {
        Ok(self.0)
    }
}

struct StaticTxnInfo(serde_json::Value);

#[async_trait]
impl TxnInfoProvider for StaticTxnInfo {
    async fn txn_info(&self, _tx_hash: &str) -> Result<serde_json::Value, ProviderError> {
        Ok(self.0.clone())
    }
}

/// A provider set over the stubs, plus handles to their recordings.
fn stub_providers(
    rate: u64,
    utxos: Vec<Utxo>,
) -> (ProviderSet, Arc<AtomicBool>, Arc<Mutex<Vec<String>>>) {
    let fee_called = Arc::new(AtomicBool::new(false));
    let pushed = Arc::new(Mutex::new(Vec::new()));
    let providers = ProviderSet {
        balance: Arc::new(StaticBalance(0)),
        fees: Arc::new(StaticFees {
            rate,
            called: fee_called.clone(),
        }),
        utxo: Arc::new(StaticUtxos(utxos)),
        pushtx: Arc::new(RecordingPushTx {
            pushed: pushed.clone(),
        }),
        txn_info: Arc::new(StaticTxnInfo(json!({}))),
    };
    (providers, fee_called, pushed)
}

fn payment_request(amount: u64) -> PaymentRequest {
    PaymentRequest {
        from: SENDER_ADDRESS.to_string(),
        to: RECIPIENT_ADDRESS.to_string(),
        amount,
        private_key_wif: SENDER_WIF.to_string(),
        fee: FeeSpec::Tier(FeeTier::Fastest),
        dry_run: true,
        ..PaymentRequest::default()
    }
}

fn script_of(address: &str) -> bitcoin::ScriptBuf {
    bitcoin::Address::from_str(address)
        .unwrap()
        .require_network(bitcoin::Network::Bitcoin)
        .unwrap()
        .script_pubkey()
}

// -----------------------------------------------------------------------
// Coin selection
// -----------------------------------------------------------------------

/// Test that selection takes coins in provider order and stops at the
/// first covering prefix.
#[test]
fn test_selection_first_fit_in_provider_order() {
    let utxos = vec![coin(30_000, 10), coin(30_000, 10), coin(30_000, 10)];
    let selection = select_coins(&utxos, 50_000).expect("should cover 50000 sat");

    assert_eq!(selection.coins.len(), 2, "first two coins already cover the amount");
    assert_eq!(selection.total, 60_000);
    assert_eq!(selection.coins, utxos[..2].to_vec(), "order must be preserved");
}

/// Test that coins below the confirmation floor are never selected, even
/// when they alone would cover the amount.
#[test]
fn test_selection_skips_shallow_confirmations() {
    let utxos = vec![coin(1_000_000, MIN_CONFIRMATIONS - 1), coin(100_000, MIN_CONFIRMATIONS)];
    let selection = select_coins(&utxos, 40_000).expect("the confirmed coin covers the amount");

    assert_eq!(selection.coins.len(), 1);
    assert_eq!(selection.coins[0].satoshis, 100_000, "only the 6-conf coin is eligible");
}

/// Test that exhausting the eligible coins reports both the accumulated
/// total and the required amount.
#[test]
fn test_selection_insufficient_funds() {
    let utxos = vec![coin(100_000, 6)];
    let err = select_coins(&utxos, 150_000).unwrap_err();

    match err {
        PayError::InsufficientFunds { available, required } => {
            assert_eq!(available, 100_000);
            assert_eq!(required, 150_000);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}

/// Test that shallow coins do not count toward the reported available total.
#[test]
fn test_selection_available_total_excludes_shallow_coins() {
    let utxos = vec![coin(500_000, 2), coin(40_000, 9)];
    let err = select_coins(&utxos, 100_000).unwrap_err();

    match err {
        PayError::InsufficientFunds { available, .. } => {
            assert_eq!(available, 40_000, "only eligible coins accumulate");
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}

/// Test that a zero amount against a non-empty eligible set still selects
/// one coin: the stop check runs after a coin is appended.
#[test]
fn test_selection_zero_amount_takes_first_eligible_coin() {
    let utxos = vec![coin(100_000, 8), coin(200_000, 8)];
    let selection = select_coins(&utxos, 0).unwrap();

    assert_eq!(selection.coins.len(), 1);
    assert_eq!(selection.total, 100_000);
}

/// Test that a zero amount against no coins selects nothing and succeeds.
#[test]
fn test_selection_zero_amount_empty_pool() {
    let selection = select_coins(&[], 0).unwrap();
    assert!(selection.coins.is_empty());
    assert_eq!(selection.total, 0);
}

// -----------------------------------------------------------------------
// Fee estimation
// -----------------------------------------------------------------------

/// Test the fixed size formula on known shapes.
#[test]
fn test_estimate_size() {
    assert_eq!(estimate_size(1, 1), 225);
    assert_eq!(estimate_size(1, 2), 259);
    assert_eq!(estimate_size(2, 1), 406);
    assert_eq!(estimate_size(2, 2), 440);
    assert_eq!(estimate_size(0, 1), 44);
}

/// Test that the fee scales linearly with the rate.
#[test]
fn test_estimate_fee() {
    assert_eq!(estimate_fee(1, 2, 1), 259);
    assert_eq!(estimate_fee(1, 2, 5), 1295);
    assert_eq!(estimate_fee(2, 1, 3), 1218);
}

// -----------------------------------------------------------------------
// Assembly
// -----------------------------------------------------------------------

/// Test the worked single-coin case: one input, payment plus change
/// outputs, and exact value conservation.
#[test]
fn test_assemble_payment_and_change() {
    let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
    let fee = estimate_fee(1, 2, 1);
    assert_eq!(fee, 259);

    let assembled = assemble(selection, &payment_request(40_000), fee).unwrap();
    let tx = &assembled.transaction;

    assert_eq!(tx.input.len(), 1);
    assert_eq!(tx.output.len(), 2);
    assert_eq!(tx.output[0].value.to_sat(), 39_741, "payment output is amount minus fee");
    assert_eq!(tx.output[0].script_pubkey, script_of(RECIPIENT_ADDRESS));
    assert_eq!(tx.output[1].value.to_sat(), 60_000, "change output is total minus amount");
    assert_eq!(tx.output[1].script_pubkey, script_of(SENDER_ADDRESS));

    let total_out: u64 = tx.output.iter().map(|o| o.value.to_sat()).sum();
    assert_eq!(
        assembled.coins.total - total_out,
        assembled.fee,
        "inputs minus outputs must equal the fee exactly"
    );
}

/// Test that an exact-value selection emits no change output.
#[test]
fn test_assemble_omits_zero_change() {
    let selection = select_coins(&[coin(40_000, 6)], 40_000).unwrap();
    let fee = estimate_fee(1, 1, 1);

    let assembled = assemble(selection, &payment_request(40_000), fee).unwrap();

    assert_eq!(assembled.transaction.output.len(), 1, "no zero-value change output");
    assert_eq!(assembled.transaction.output[0].value.to_sat(), 40_000 - fee);
}

/// Test that emptying the wallet redirects change to the recipient.
#[test]
fn test_assemble_empty_wallet_redirects_change() {
    let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
    let mut request = payment_request(40_000);
    request.empty_wallet = true;

    let assembled = assemble(selection, &request, 259).unwrap();
    let tx = &assembled.transaction;

    assert_eq!(tx.output.len(), 2);
    assert_eq!(
        tx.output[1].script_pubkey,
        script_of(RECIPIENT_ADDRESS),
        "change goes to the recipient when emptying the wallet"
    );
}

/// Test that a fee reaching the amount is rejected with both values reported.
#[test]
fn test_assemble_rejects_fee_swallowing_amount() {
    let selection = select_coins(&[coin(100_000, 6)], 200).unwrap();
    let err = assemble(selection, &payment_request(200), 259).unwrap_err();

    match err {
        PayError::FeeExceedsAmount { fee, amount } => {
            assert_eq!(fee, 259);
            assert_eq!(amount, 200);
        }
        other => panic!("expected FeeExceedsAmount, got {other:?}"),
    }
}

/// Test that inputs reference the selected coins in order.
#[test]
fn test_assemble_inputs_follow_selection_order() {
    let mut first = coin(30_000, 6);
    first.vout = 3;
    let mut second = coin(30_000, 6);
    second.vout = 7;

    let selection = select_coins(&[first, second], 50_000).unwrap();
    let assembled = assemble(selection, &payment_request(50_000), 100).unwrap();

    let vouts: Vec<u32> = assembled
        .transaction
        .input
        .iter()
        .map(|i| i.previous_output.vout)
        .collect();
    assert_eq!(vouts, vec![3, 7]);
}

/// Test that a recipient address from the wrong network is rejected.
#[test]
fn test_assemble_rejects_wrong_network_address() {
    let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
    let mut request = payment_request(40_000);
    request.network = Network::Testnet;

    let err = assemble(selection, &request, 259).unwrap_err();
    assert!(
        matches!(err, PayError::InvalidAddress { .. }),
        "mainnet recipient must fail on testnet, got {err:?}"
    );
}

// -----------------------------------------------------------------------
// Signing
// -----------------------------------------------------------------------

/// Test that signing fills every scriptSig and the serialized form
/// round-trips through consensus decoding.
#[test]
fn test_sign_fills_every_input() {
    let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
    let assembled = assemble(selection, &payment_request(40_000), 259).unwrap();

    let signed = sign(assembled, SENDER_WIF, Network::Mainnet).unwrap();

    assert!(signed.transaction.input.iter().all(|i| !i.script_sig.is_empty()));
    assert_eq!(signed.txid.len(), 64, "display txid is 64 hex chars");

    let bytes = hex::decode(&signed.raw_hex).unwrap();
    let decoded: bitcoin::Transaction = bitcoin::consensus::encode::deserialize(&bytes)
        .expect("raw hex must decode as a transaction");
    assert_eq!(decoded, signed.transaction);
    assert_eq!(decoded.compute_txid().to_string(), signed.txid);
}

/// Test that signing is deterministic for identical inputs and key.
#[test]
fn test_sign_deterministic() {
    let build = || {
        let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
        assemble(selection, &payment_request(40_000), 259).unwrap()
    };

    let first = sign(build(), SENDER_WIF, Network::Mainnet).unwrap();
    let second = sign(build(), SENDER_WIF, Network::Mainnet).unwrap();

    assert_eq!(first.raw_hex, second.raw_hex);
    assert_eq!(first.txid, second.txid);
}

/// Test that a mainnet key is rejected when the payment targets testnet.
#[test]
fn test_sign_rejects_network_mismatch() {
    let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
    let assembled = assemble(selection, &payment_request(40_000), 259).unwrap();

    let err = sign(assembled, SENDER_WIF, Network::Testnet).unwrap_err();
    assert!(
        matches!(err, PayError::KeyNetworkMismatch { .. }),
        "expected KeyNetworkMismatch, got {err:?}"
    );
}

/// Test that garbage key material is rejected as a key error.
#[test]
fn test_sign_rejects_bad_wif() {
    let selection = select_coins(&[coin(100_000, 6)], 40_000).unwrap();
    let assembled = assemble(selection, &payment_request(40_000), 259).unwrap();

    let err = sign(assembled, "not-a-wif", Network::Mainnet).unwrap_err();
    assert!(matches!(err, PayError::Key(_)), "expected Key, got {err:?}");
}

// -----------------------------------------------------------------------
// The full pipeline
// -----------------------------------------------------------------------

/// Test the worked end-to-end dry run: exact fee, exact outputs, and no
/// submission call.
#[tokio::test]
async fn test_send_dry_run_builds_exact_transaction() {
    let (providers, _, pushed) = stub_providers(1, vec![coin(100_000, 6)]);
    let request = payment_request(40_000);

    let outcome = send_transaction(&request, &providers).await.unwrap();

    let signed = match outcome {
        SendOutcome::DryRun(signed) => signed,
        other => panic!("expected DryRun, got {other:?}"),
    };

    assert_eq!(signed.transaction.output[0].value.to_sat(), 39_741);
    assert_eq!(signed.transaction.output[1].value.to_sat(), 60_000);
    assert!(pushed.lock().unwrap().is_empty(), "dry run must not submit");
}

/// Test that a broadcast hands the exact raw hex to the submission
/// provider and returns its acknowledgment verbatim.
#[tokio::test]
async fn test_send_broadcast_submits_raw_hex() {
    let (providers, _, pushed) = stub_providers(1, vec![coin(100_000, 6)]);
    let mut request = payment_request(40_000);
    request.dry_run = false;

    let outcome = send_transaction(&request, &providers).await.unwrap();

    let (transaction, ack) = match outcome {
        SendOutcome::Broadcast { transaction, ack } => (transaction, ack),
        other => panic!("expected Broadcast, got {other:?}"),
    };

    let pushed = pushed.lock().unwrap();
    assert_eq!(pushed.as_slice(), [transaction.raw_hex.clone()]);
    assert_eq!(ack, json!({ "success": true }));
}

/// Test that a literal fee rate bypasses the fee-rate provider entirely.
#[tokio::test]
async fn test_send_literal_fee_skips_provider() {
    let (providers, fee_called, _) = stub_providers(1_000, vec![coin(100_000, 6)]);
    let mut request = payment_request(40_000);
    request.fee = FeeSpec::Rate(5);

    let outcome = send_transaction(&request, &providers).await.unwrap();

    assert!(!fee_called.load(Ordering::SeqCst), "provider must not be consulted");
    let signed = match outcome {
        SendOutcome::DryRun(signed) => signed,
        other => panic!("expected DryRun, got {other:?}"),
    };
    // size 259 at 5 sat/byte
    assert_eq!(signed.transaction.output[0].value.to_sat(), 40_000 - 1_295);
}

/// Test that an under-funded wallet surfaces the accumulated and
/// required amounts.
#[tokio::test]
async fn test_send_insufficient_funds() {
    let (providers, _, _) = stub_providers(1, vec![coin(100_000, 6)]);
    let request = payment_request(150_000);

    let err = send_transaction(&request, &providers).await.unwrap_err();
    match err {
        PayError::InsufficientFunds { available, required } => {
            assert_eq!(available, 100_000);
            assert_eq!(required, 150_000);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}

/// Test that validation fails fast, before any provider is contacted.
#[tokio::test]
async fn test_send_validation_precedes_network_calls() {
    let (providers, fee_called, pushed) = stub_providers(1, vec![coin(100_000, 6)]);
    let mut request = payment_request(40_000);
    request.from = String::new();

    let err = send_transaction(&request, &providers).await.unwrap_err();

    assert!(matches!(err, PayError::MissingOption("from")));
    assert!(!fee_called.load(Ordering::SeqCst));
    assert!(pushed.lock().unwrap().is_empty());
}

/// Test the remaining required options one by one.
#[tokio::test]
async fn test_send_requires_recipient_and_key() {
    let (providers, _, _) = stub_providers(1, vec![coin(100_000, 6)]);

    let mut request = payment_request(40_000);
    request.to = String::new();
    let err = send_transaction(&request, &providers).await.unwrap_err();
    assert!(matches!(err, PayError::MissingOption("to")));

    let mut request = payment_request(40_000);
    request.private_key_wif = String::new();
    let err = send_transaction(&request, &providers).await.unwrap_err();
    assert!(matches!(err, PayError::MissingOption("private_key_wif")));
}

/// Test that a provider failure aborts the pipeline unmodified.
#[tokio::test]
async fn test_send_propagates_provider_failure() {
    struct FailingUtxos;

    #[async_trait]
    impl UtxoProvider for FailingUtxos {
        async fn utxos(&self, _address: &str) -> Result<Vec<Utxo>, ProviderError> {
            Err(ProviderError::new("service unavailable"))
        }
    }

    let (providers, _, pushed) = stub_providers(1, Vec::new());
    let providers = providers.with_utxo(Arc::new(FailingUtxos));

    let err = send_transaction(&payment_request(40_000), &providers)
        .await
        .unwrap_err();

    assert!(matches!(err, PayError::Provider(_)), "expected Provider, got {err:?}");
    assert_eq!(err.to_string(), "service unavailable");
    assert!(pushed.lock().unwrap().is_empty());
}

// -----------------------------------------------------------------------
// Queries
// -----------------------------------------------------------------------

/// Test the read-only queries against the stub providers.
#[tokio::test]
async fn test_queries_pass_through_providers() {
    let record = json!({ "txid": COIN_TXID, "confirmations": 12 });
    let (providers, _, _) = stub_providers(1, vec![coin(7_000, 9)]);
    let providers = providers
        .with_balance(Arc::new(StaticBalance(123_456)))
        .with_txn_info(Arc::new(StaticTxnInfo(record.clone())));

    assert_eq!(get_balance(SENDER_ADDRESS, &providers).await.unwrap(), 123_456);
    assert_eq!(
        get_transaction_info(COIN_TXID, &providers).await.unwrap(),
        record
    );
    let utxos = get_unspent_outputs(SENDER_ADDRESS, &providers).await.unwrap();
    assert_eq!(utxos, vec![coin(7_000, 9)]);
}

/// Test that blank query arguments fail fast.
#[tokio::test]
async fn test_queries_reject_blank_arguments() {
    let (providers, _, _) = stub_providers(1, Vec::new());

    let err = get_balance("", &providers).await.unwrap_err();
    assert!(matches!(err, PayError::MissingOption("address")));

    let err = get_transaction_info("", &providers).await.unwrap_err();
    assert!(matches!(err, PayError::MissingOption("tx_hash")));

    let err = get_unspent_outputs("", &providers).await.unwrap_err();
    assert!(matches!(err, PayError::MissingOption("address")));
}

// -----------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------

/// Test network configuration-name parsing and display.
#[test]
fn test_network_names() {
    assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
    assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
    assert_eq!(Network::Mainnet.to_string(), "mainnet");
    assert!(matches!(
        "regtest".parse::<Network>(),
        Err(PayError::UnknownNetwork(_))
    ));
}

/// Test fee tier spellings match what providers expect.
#[test]
fn test_fee_tier_names() {
    assert_eq!(FeeTier::Fastest.as_str(), "fastest");
    assert_eq!(FeeTier::HalfHour.as_str(), "halfHour");
    assert_eq!(FeeTier::Hour.as_str(), "hour");
}

/// Test the fee specification defaults and conversions.
#[test]
fn test_fee_spec_defaults_and_conversions() {
    assert_eq!(FeeSpec::default(), FeeSpec::Tier(FeeTier::Fastest));
    assert_eq!(FeeSpec::from(5u64), FeeSpec::Rate(5));
    assert_eq!(FeeSpec::from(FeeTier::Hour), FeeSpec::Tier(FeeTier::Hour));
}

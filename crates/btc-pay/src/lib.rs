#![deny(missing_docs)]

//! # btc-pay
//!
//! Assembles, funds, and signs single-recipient Bitcoin payments from a
//! spending address's unspent outputs.
//!
//! The pipeline resolves a fee rate (a named speed tier or a literal
//! satoshi-per-byte rate), selects confirmed coins in provider order until
//! the requested amount is covered, computes the fee from the estimated
//! transaction size, builds the payment and change outputs, signs every
//! input with a single key, and either returns the signed transaction
//! (dry run) or submits it through the configured provider.
//!
//! Chain data comes from pluggable providers bundled in a [`ProviderSet`];
//! HTTP implementations live in the `btc-providers` crate.
//!
//! # Example
//!
//! ```no_run
//! use btc_pay::{send_transaction, PaymentRequest, ProviderSet, SendOutcome};
//!
//! # async fn example(providers: ProviderSet) -> Result<(), btc_pay::PayError> {
//! let request = PaymentRequest {
//!     from: "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH".to_string(),
//!     to: "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_string(),
//!     amount: 40_000,
//!     private_key_wif: "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn".to_string(),
//!     dry_run: true,
//!     ..PaymentRequest::default()
//! };
//!
//! match send_transaction(&request, &providers).await? {
//!     SendOutcome::DryRun(signed) => println!("would send {}", signed.txid),
//!     SendOutcome::Broadcast { transaction, .. } => println!("sent {}", transaction.txid),
//! }
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod error;
pub mod fee;
pub mod provider;
pub mod query;
pub mod select;
pub mod send;
pub mod sign;
pub mod types;

#[cfg(test)]
mod tests;

pub use build::{assemble, AssembledPayment};
pub use error::{PayError, ProviderError};
pub use fee::{estimate_fee, estimate_size, resolve_fee_rate};
pub use provider::{
    BalanceProvider, FeeRateProvider, ProviderSet, PushTxProvider, TxnInfoProvider, UtxoProvider,
};
pub use query::{get_balance, get_transaction_info, get_unspent_outputs};
pub use select::{select_coins, CoinSelection, MIN_CONFIRMATIONS};
pub use send::{send_transaction, PaymentRequest, SendOutcome};
pub use sign::{sign, SignedTransaction};
pub use types::{FeeSpec, FeeTier, Network, Utxo};

#![deny(missing_docs)]

//! # btc-providers
//!
//! HTTP implementations of the `btc-pay` provider traits: confirmed
//! balances and unspent outputs from blockchain.info, fee rates from the
//! earn.com recommended-fees API, transaction submission through
//! BlockCypher, and transaction lookups through a block explorer.
//!
//! [`default_providers`] wires the four clients into a ready-to-use
//! [`ProviderSet`](btc_pay::ProviderSet) for a network; every client can
//! also be constructed individually against a custom endpoint.
//!
//! # Example
//!
//! ```no_run
//! use btc_pay::{send_transaction, Network, PaymentRequest};
//! use btc_providers::default_providers;
//!
//! # async fn example() -> Result<(), btc_pay::PayError> {
//! let providers = default_providers(Network::Mainnet);
//!
//! let request = PaymentRequest {
//!     from: "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH".to_string(),
//!     to: "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_string(),
//!     amount: 40_000,
//!     private_key_wif: "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn".to_string(),
//!     dry_run: true,
//!     ..PaymentRequest::default()
//! };
//!
//! let outcome = send_transaction(&request, &providers).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod block_explorer;
pub mod blockchain_info;
pub mod blockcypher;
pub mod defaults;
pub mod earn;
pub mod error;
pub mod types;


pub use block_explorer::BlockExplorerClient;
pub use blockchain_info::BlockchainInfoClient;
pub use blockcypher::BlockCypherClient;
pub use defaults::default_providers;
pub use earn::EarnClient;
pub use error::HttpProviderError;
pub use types::{
    BlockCypherConfig, BlockExplorerConfig, BlockchainInfoConfig, EarnConfig, RecommendedFees,
    UnspentEntry, UnspentListing,
};

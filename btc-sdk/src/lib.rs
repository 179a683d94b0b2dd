#![deny(missing_docs)]

//! Bitcoin payment SDK - complete bundle.
//!
//! Re-exports the payment pipeline and the HTTP chain-data providers for
//! convenient single-crate usage.

pub use btc_pay as pay;
pub use btc_providers as providers;

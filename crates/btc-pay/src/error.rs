//! Error types for the payment pipeline.

/// A provider call failure, carried through the pipeline untouched.
///
/// The pipeline never retries or rewords a provider failure; the concrete
/// error a provider produced can be recovered with [`ProviderError::into_inner`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ProviderError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl ProviderError {
    /// Wrap a provider's error without altering it.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        ProviderError(source.into())
    }

    /// Borrow the underlying provider error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Take back the underlying provider error.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.0
    }
}

/// Errors that can occur while assembling, signing, or dispatching a payment.
#[derive(Debug, thiserror::Error)]
pub enum PayError {
    /// A required option is absent or blank. Raised before any network call.
    #[error("missing required option: {0}")]
    MissingOption(&'static str),

    /// The network name is not one of the recognized networks.
    #[error("unknown network `{0}` (expected \"mainnet\" or \"testnet\")")]
    UnknownNetwork(String),

    /// An address could not be parsed for the requested network.
    #[error("invalid address `{address}`: {reason}")]
    InvalidAddress {
        /// The offending address string.
        address: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A provider-reported unspent output carried an unusable reference.
    #[error("invalid unspent output reference `{txid}`: {reason}")]
    InvalidUtxo {
        /// The offending transaction id.
        txid: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The private key could not be decoded from wallet import format.
    #[error("invalid private key: {0}")]
    Key(#[from] bitcoin::key::FromWifError),

    /// The private key belongs to a different network than the payment.
    #[error("private key is for {key_network}, but the payment targets {requested_network}")]
    KeyNetworkMismatch {
        /// Network encoded in the key.
        key_network: String,
        /// Network the request named.
        requested_network: String,
    },

    /// The eligible confirmed coins cannot cover the requested amount.
    #[error("insufficient confirmed funds: available {available} sat, required {required} sat")]
    InsufficientFunds {
        /// Combined value of every eligible coin, in satoshis.
        available: u64,
        /// The requested amount, in satoshis.
        required: u64,
    },

    /// The computed fee would consume the entire payment.
    #[error("fee of {fee} sat would consume the {amount} sat payment")]
    FeeExceedsAmount {
        /// The computed fee, in satoshis.
        fee: u64,
        /// The requested amount, in satoshis.
        amount: u64,
    },

    /// An input could not be signed.
    #[error("signing error: {0}")]
    Signing(String),

    /// A provider call failed; the original error is forwarded unmodified.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

use thiserror::Error;

/// Errors surfaced by provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The call failed at the transport, HTTP, or RPC layer.
    #[error("provider fetch failed: {0}")]
    Fetch(String),
    /// A response arrived but is missing an expected value (a `null` block or
    /// receipt, or a payload that does not decode).
    #[error("malformed provider response: {context}")]
    MalformedResponse {
        /// What was missing or undecodable.
        context: String,
    },
    /// The current block carries no transactions, so there is no first
    /// transaction whose receipt could be fetched.
    #[error("current block has no transactions")]
    EmptyBlock,
}

impl ProviderError {
    /// Shorthand for a [`Self::MalformedResponse`].
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedResponse { context: context.into() }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::malformed(err.to_string())
        } else {
            Self::Fetch(err.to_string())
        }
    }
}

impl From<alloy::transports::TransportError> for ProviderError {
    fn from(err: alloy::transports::TransportError) -> Self {
        Self::Fetch(err.to_string())
    }
}

//! Chain-data provider client for ethscope.
//!
//! All chain access goes through the [`ChainDataApi`] trait so the loader and
//! selection controller can be driven by a mock in tests. The production
//! implementation is [`AlchemyClient`]: JSON-RPC for core chain data, REST for
//! the NFT endpoints.

/// Alchemy-backed implementation
pub mod alchemy;
/// Provider error taxonomy
pub mod error;
/// Wire models for the NFT REST endpoints
pub mod models;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use alchemy::AlchemyClient;
pub use error::ProviderError;
pub use models::{FloorPriceResponse, MarketplacePrice, NftMetadata, ReceiptSummary};

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::Block;
use async_trait::async_trait;

/// Read-only operations against the external chain-data provider.
///
/// Every call is a single attempt: no retry, no timeout. A hung provider
/// leaves the caller suspended; a failed call surfaces as a [`ProviderError`].
#[async_trait]
pub trait ChainDataApi: Send + Sync {
    /// Current block height.
    async fn get_block_number(&self) -> Result<u64, ProviderError>;

    /// Full details of the block at `number`, with transactions as hashes.
    async fn get_block(&self, number: u64) -> Result<Block, ProviderError>;

    /// Current gas price in wei.
    async fn get_gas_price(&self) -> Result<u128, ProviderError>;

    /// Receipt of a mined transaction.
    async fn get_transaction_receipt(&self, hash: B256) -> Result<ReceiptSummary, ProviderError>;

    /// Metadata for one NFT, identified by contract address and token id.
    async fn get_nft_metadata(
        &self,
        contract: Address,
        token_id: &str,
    ) -> Result<NftMetadata, ProviderError>;

    /// Marketplace floor prices for an NFT collection.
    async fn get_floor_price(&self, contract: Address) -> Result<FloorPriceResponse, ProviderError>;
}

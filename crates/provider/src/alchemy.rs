use alloy::providers::{
    Provider, ProviderBuilder, RootProvider, fillers::FillProvider,
    utils::JoinedRecommendedFillers,
};
use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::Block;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use url::Url;

use crate::{
    ChainDataApi, ProviderError,
    models::{FloorPriceResponse, NftMetadata, ReceiptSummary},
};

/// Alias to the default provider with all recommended fillers (read-only).
pub type DefaultProvider = FillProvider<JoinedRecommendedFillers, RootProvider>;

/// Client for the Alchemy chain-data API.
///
/// One shared instance serves both the loader and the selection controller.
/// Core chain data goes over JSON-RPC; the NFT endpoints are REST.
#[derive(Clone)]
pub struct AlchemyClient {
    rpc: DefaultProvider,
    http: HttpClient,
    nft_api_url: Url,
}

impl std::fmt::Debug for AlchemyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlchemyClient").field("nft_api_url", &self.nft_api_url).finish_non_exhaustive()
    }
}

impl AlchemyClient {
    /// Create a new client from explicit endpoint URLs. The URLs embed the
    /// API key; derive them via `config::Network` in production, or point
    /// them at a mock server in tests.
    pub fn new(rpc_url: Url, nft_api_url: Url) -> Self {
        let rpc = ProviderBuilder::new().connect_http(rpc_url);
        Self { rpc, http: HttpClient::new(), nft_api_url }
    }

    fn nft_endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.nft_api_url, method)
    }
}

#[async_trait]
impl ChainDataApi for AlchemyClient {
    async fn get_block_number(&self) -> Result<u64, ProviderError> {
        Ok(self.rpc.get_block_number().await?)
    }

    async fn get_block(&self, number: u64) -> Result<Block, ProviderError> {
        let block = self.rpc.get_block_by_number(number.into()).await?;
        block.ok_or_else(|| ProviderError::malformed(format!("block {number} not found")))
    }

    async fn get_gas_price(&self) -> Result<u128, ProviderError> {
        Ok(self.rpc.get_gas_price().await?)
    }

    async fn get_transaction_receipt(&self, hash: B256) -> Result<ReceiptSummary, ProviderError> {
        let receipt = self.rpc.get_transaction_receipt(hash).await?.ok_or_else(|| {
            ProviderError::malformed(format!("receipt not found for transaction {hash}"))
        })?;
        Ok(receipt.into())
    }

    async fn get_nft_metadata(
        &self,
        contract: Address,
        token_id: &str,
    ) -> Result<NftMetadata, ProviderError> {
        let url = self.nft_endpoint("getNFTMetadata");
        let resp = self
            .http
            .get(&url)
            .query(&[("contractAddress", contract.to_string()), ("tokenId", token_id.to_owned())])
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<NftMetadata>().await?)
    }

    async fn get_floor_price(
        &self,
        contract: Address,
    ) -> Result<FloorPriceResponse, ProviderError> {
        let url = self.nft_endpoint("getFloorPrice");
        let resp = self
            .http
            .get(&url)
            .query(&[("contractAddress", contract.to_string())])
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<FloorPriceResponse>().await?)
    }
}

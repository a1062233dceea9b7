use std::sync::Arc;

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::Block;
use eyre::Result;
use provider::{ChainDataApi, ProviderError};
use tracing::{error, info};

use crate::{RECENT_BLOCK_COUNT, SharedState, Slot, SnapshotEvent};

/// One-shot startup loader populating the view state.
///
/// Runs the fixed query sequence exactly once per session, each step awaited
/// before the next. A failed step marks its own slot errored and the sequence
/// continues; the recent-blocks and current-block steps inherit a failed
/// height fetch, and the receipt step inherits a failed current-block fetch.
pub struct Loader {
    client: Arc<dyn ChainDataApi>,
    state: SharedState,
    nft_contract: Address,
    nft_token_id: String,
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("nft_contract", &self.nft_contract)
            .field("nft_token_id", &self.nft_token_id)
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// Create a new loader around the injected provider client.
    pub fn new(
        client: Arc<dyn ChainDataApi>,
        state: SharedState,
        nft_contract: Address,
        nft_token_id: impl Into<String>,
    ) -> Self {
        Self { client, state, nft_contract, nft_token_id: nft_token_id.into() }
    }

    /// Run the startup load sequence to completion.
    pub async fn run(&self) {
        info!("starting initial chain snapshot load");

        let height = match self.client.get_block_number().await {
            Ok(height) => {
                self.apply(SnapshotEvent::BlockHeightLoaded(height));
                Some(height)
            }
            Err(err) => {
                error!(error = %err, "failed to fetch current block height");
                let reason = err.to_string();
                self.fail(Slot::BlockHeight, reason.clone());
                self.fail(Slot::RecentBlocks, format!("current block height unavailable: {reason}"));
                self.fail(Slot::CurrentBlock, format!("current block height unavailable: {reason}"));
                None
            }
        };

        if let Some(height) = height {
            match self.fetch_recent_blocks(height).await {
                Ok(numbers) => self.apply(SnapshotEvent::RecentBlocksLoaded(numbers)),
                Err(err) => {
                    error!(error = %err, height, "failed to fetch recent blocks");
                    self.fail(Slot::RecentBlocks, err.to_string());
                }
            }
        }

        let current = match height {
            Some(height) => match self.client.get_block(height).await {
                Ok(block) => {
                    self.apply(SnapshotEvent::CurrentBlockLoaded(block.clone()));
                    Some(block)
                }
                Err(err) => {
                    error!(error = %err, height, "failed to fetch current block");
                    self.fail(Slot::CurrentBlock, err.to_string());
                    None
                }
            },
            None => None,
        };

        match self.client.get_gas_price().await {
            Ok(wei) => self.apply(SnapshotEvent::GasPriceLoaded(wei)),
            Err(err) => {
                error!(error = %err, "failed to fetch gas price");
                self.fail(Slot::GasPrice, err.to_string());
            }
        }

        match current {
            Some(block) => self.load_first_receipt(&block).await,
            None => self.fail(Slot::FirstReceipt, "current block unavailable".to_owned()),
        }

        match self.client.get_nft_metadata(self.nft_contract, &self.nft_token_id).await {
            Ok(meta) => self.apply(SnapshotEvent::NftMetadataLoaded(meta)),
            Err(err) => {
                error!(error = %err, contract = %self.nft_contract, "failed to fetch NFT metadata");
                self.fail(Slot::NftMetadata, err.to_string());
            }
        }

        match self.client.get_floor_price(self.nft_contract).await {
            Ok(prices) => self.apply(SnapshotEvent::FloorPriceLoaded(prices)),
            Err(err) => {
                error!(error = %err, contract = %self.nft_contract, "failed to fetch floor price");
                self.fail(Slot::FloorPrice, err.to_string());
            }
        }

        info!("initial chain snapshot load complete");
    }

    /// Fetch the ten blocks preceding `height` and collect their numbers,
    /// most recent first.
    async fn fetch_recent_blocks(&self, height: u64) -> Result<Vec<u64>> {
        let mut numbers = Vec::with_capacity(RECENT_BLOCK_COUNT);
        for offset in 1..=RECENT_BLOCK_COUNT as u64 {
            let number = height.checked_sub(offset).ok_or_else(|| {
                eyre::eyre!("chain height {height} has fewer than {RECENT_BLOCK_COUNT} prior blocks")
            })?;
            let block = self.client.get_block(number).await?;
            numbers.push(block.header.number);
        }
        Ok(numbers)
    }

    async fn load_first_receipt(&self, block: &Block) {
        match first_transaction(block) {
            Ok(hash) => match self.client.get_transaction_receipt(hash).await {
                Ok(receipt) => self.apply(SnapshotEvent::FirstReceiptLoaded(Some(receipt))),
                Err(err) => {
                    error!(error = %err, %hash, "failed to fetch first transaction receipt");
                    self.fail(Slot::FirstReceipt, err.to_string());
                }
            },
            Err(err) => {
                info!(%err, "skipping first transaction receipt");
                self.apply(SnapshotEvent::FirstReceiptLoaded(None));
            }
        }
    }

    fn apply(&self, event: SnapshotEvent) {
        self.state.write().expect("lock poisoned").apply(event);
    }

    fn fail(&self, slot: Slot, reason: String) {
        self.apply(SnapshotEvent::LoadFailed { slot, reason });
    }
}

/// First transaction hash of a block, or [`ProviderError::EmptyBlock`].
fn first_transaction(block: &Block) -> Result<B256, ProviderError> {
    block.transactions.hashes().next().ok_or(ProviderError::EmptyBlock)
}

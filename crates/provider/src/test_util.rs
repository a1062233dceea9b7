//! Helpers for exercising provider consumers in tests: wire-shaped block
//! JSON and a scriptable in-memory [`ChainDataApi`].

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::Block;
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::{
    ChainDataApi, ProviderError,
    models::{FloorPriceResponse, NftMetadata, ReceiptSummary},
};

/// A `0x`-prefixed string of `width` zero nibbles (64 for a hash, 512 for a
/// logs bloom).
pub fn zero_padded(width: usize) -> String {
    format!("0x{}", "0".repeat(width))
}

/// Deterministic transaction hashes for tests.
pub fn tx_hashes(count: usize) -> Vec<B256> {
    (0..count).map(|i| B256::with_last_byte(i as u8 + 1)).collect()
}

/// JSON for a minimal but valid RPC block, shaped as a node would return it,
/// with transactions as hashes.
pub fn block_json(number: u64, transactions: &[B256]) -> Value {
    json!({
        "hash": format!("0x{number:064x}"),
        "parentHash": format!("0x{:064x}", number.saturating_sub(1)),
        "sha3Uncles": zero_padded(64),
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": zero_padded(64),
        "transactionsRoot": zero_padded(64),
        "receiptsRoot": zero_padded(64),
        "logsBloom": zero_padded(512),
        "difficulty": "0x0",
        "number": format!("0x{number:x}"),
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "timestamp": "0x6502f880",
        "extraData": "0x",
        "mixHash": zero_padded(64),
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x3b9aca00",
        "uncles": [],
        "transactions": transactions.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

/// A typed RPC block with the given number and transaction hashes.
pub fn block_with_hashes(number: u64, transactions: &[B256]) -> Block {
    serde_json::from_value(block_json(number, transactions)).expect("valid block json")
}

/// NFT metadata with a two-trait attribute list.
pub fn sample_nft_metadata() -> NftMetadata {
    serde_json::from_value(json!({
        "tokenId": "3478",
        "rawMetadata": {
            "attributes": [
                { "trait_type": "Fur", "value": "Robot" },
                { "trait_type": "Eyes", "value": "Bored" }
            ]
        }
    }))
    .expect("valid metadata json")
}

/// Floor prices with an OpenSea listing at 26.9 ETH.
pub fn sample_floor_price() -> FloorPriceResponse {
    serde_json::from_value(json!({
        "openSea": { "floorPrice": 26.9, "priceCurrency": "ETH" }
    }))
    .expect("valid floor price json")
}

/// Scriptable in-memory provider.
///
/// Mutate the public fields before handing it to a consumer to script
/// failures, and use [`Self::gate_block`] to hold a block fetch until the
/// test releases it.
#[derive(Debug)]
pub struct MockApi {
    /// Response to `get_block_number`; `Err` becomes a fetch failure.
    pub height: Result<u64, String>,
    /// Response to `get_gas_price` in wei; `Err` becomes a fetch failure.
    pub gas_price: Result<u128, String>,
    /// Blocks served by `get_block`; missing numbers report as not found.
    pub blocks: HashMap<u64, Block>,
    /// Receipts served by `get_transaction_receipt`.
    pub receipts: HashMap<B256, ReceiptSummary>,
    /// Response to `get_nft_metadata`.
    pub nft: Result<NftMetadata, String>,
    /// Response to `get_floor_price`.
    pub floor_price: Result<FloorPriceResponse, String>,
    gates: Mutex<HashMap<u64, Arc<Notify>>>,
}

impl MockApi {
    /// A healthy provider at the given height, with blocks
    /// `height - 10 ..= height`. The current block carries `current_txs`
    /// transactions (with receipts), older blocks none.
    pub fn with_height(height: u64, current_txs: usize) -> Self {
        let mut blocks = HashMap::new();
        for number in height.saturating_sub(10)..height {
            blocks.insert(number, block_with_hashes(number, &[]));
        }
        let hashes = tx_hashes(current_txs);
        blocks.insert(height, block_with_hashes(height, &hashes));

        let mut receipts = HashMap::new();
        for hash in &hashes {
            receipts.insert(
                *hash,
                ReceiptSummary {
                    transaction_hash: *hash,
                    from: Address::with_last_byte(0xaa),
                    to: Some(Address::with_last_byte(0xbb)),
                    gas_used: 21_000,
                },
            );
        }

        Self {
            height: Ok(height),
            gas_price: Ok(2_000_000_000),
            blocks,
            receipts,
            nft: Ok(sample_nft_metadata()),
            floor_price: Ok(sample_floor_price()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Hold every `get_block(number)` call until the returned handle is
    /// notified.
    pub fn gate_block(&self, number: u64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().expect("lock poisoned").insert(number, Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl ChainDataApi for MockApi {
    async fn get_block_number(&self) -> Result<u64, ProviderError> {
        self.height.clone().map_err(ProviderError::Fetch)
    }

    async fn get_block(&self, number: u64) -> Result<Block, ProviderError> {
        let gate = self.gates.lock().expect("lock poisoned").get(&number).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.blocks
            .get(&number)
            .cloned()
            .ok_or_else(|| ProviderError::malformed(format!("block {number} not found")))
    }

    async fn get_gas_price(&self) -> Result<u128, ProviderError> {
        self.gas_price.clone().map_err(ProviderError::Fetch)
    }

    async fn get_transaction_receipt(&self, hash: B256) -> Result<ReceiptSummary, ProviderError> {
        self.receipts
            .get(&hash)
            .cloned()
            .ok_or_else(|| ProviderError::malformed(format!("receipt not found for {hash}")))
    }

    async fn get_nft_metadata(
        &self,
        _contract: Address,
        _token_id: &str,
    ) -> Result<NftMetadata, ProviderError> {
        self.nft.clone().map_err(ProviderError::Fetch)
    }

    async fn get_floor_price(
        &self,
        _contract: Address,
    ) -> Result<FloorPriceResponse, ProviderError> {
        self.floor_price.clone().map_err(ProviderError::Fetch)
    }
}

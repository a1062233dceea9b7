use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::TransactionReceipt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary of a transaction receipt, as displayed on the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    /// Hash of the mined transaction.
    pub transaction_hash: B256,
    /// Sender address.
    pub from: Address,
    /// Recipient address; `None` for contract creations.
    pub to: Option<Address>,
    /// Gas consumed by the transaction. Hex-encoded on the wire, decoded by
    /// the RPC layer.
    pub gas_used: u128,
}

impl From<TransactionReceipt> for ReceiptSummary {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            from: receipt.from,
            to: receipt.to,
            gas_used: receipt.gas_used.into(),
        }
    }
}

/// NFT metadata as returned by the provider's `getNFTMetadata` endpoint.
///
/// Only the `rawMetadata` subtree is typed; everything else the provider sends
/// passes through opaquely in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftMetadata {
    /// Raw on-chain metadata, if the provider resolved it.
    #[serde(default)]
    pub raw_metadata: Option<RawMetadata>,
    /// Remaining provider-defined fields, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl NftMetadata {
    /// The `rawMetadata.attributes` array, if the provider supplied one.
    pub fn attributes(&self) -> Option<&Value> {
        self.raw_metadata.as_ref().and_then(|meta| meta.attributes.as_ref())
    }
}

/// The `rawMetadata` subtree of an NFT metadata response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    /// Trait list of the token, raw JSON.
    #[serde(default)]
    pub attributes: Option<Value>,
    /// Remaining metadata fields, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Per-marketplace floor prices for an NFT collection, as returned by the
/// provider's `getFloorPrice` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPriceResponse {
    /// OpenSea listing, if the provider has one.
    #[serde(default)]
    pub open_sea: Option<MarketplacePrice>,
    /// LooksRare listing, if the provider has one.
    #[serde(default)]
    pub looks_rare: Option<MarketplacePrice>,
}

impl FloorPriceResponse {
    /// The OpenSea floor price in ETH, when present and well-formed. The
    /// provider reports marketplace errors as a record without a `floorPrice`.
    pub fn open_sea_floor_price(&self) -> Option<f64> {
        self.open_sea.as_ref().and_then(|price| price.floor_price)
    }
}

/// One marketplace's floor-price record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplacePrice {
    /// Lowest current listing price, in `price_currency`.
    #[serde(default)]
    pub floor_price: Option<f64>,
    /// Currency of the listing, implicitly ETH on mainnet.
    #[serde(default)]
    pub price_currency: Option<String>,
    /// Marketplace collection page.
    #[serde(default)]
    pub collection_url: Option<String>,
    /// When the marketplace was last polled.
    #[serde(default)]
    pub retrieved_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nft_metadata_exposes_attributes() {
        let meta: NftMetadata = serde_json::from_value(json!({
            "contract": { "address": "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d" },
            "tokenId": "3478",
            "rawMetadata": {
                "image": "ipfs://QmExample",
                "attributes": [
                    { "trait_type": "Fur", "value": "Robot" },
                    { "trait_type": "Eyes", "value": "Bored" }
                ]
            }
        }))
        .unwrap();

        let attributes = meta.attributes().unwrap();
        assert_eq!(attributes.as_array().unwrap().len(), 2);
        // unrecognized fields pass through
        assert!(meta.extra.contains_key("contract"));
        assert_eq!(meta.extra["tokenId"], json!("3478"));
    }

    #[test]
    fn nft_metadata_without_attributes() {
        let meta: NftMetadata =
            serde_json::from_value(json!({ "rawMetadata": { "image": "ipfs://x" } })).unwrap();
        assert!(meta.attributes().is_none());

        let meta: NftMetadata = serde_json::from_value(json!({ "tokenId": "1" })).unwrap();
        assert!(meta.attributes().is_none());
    }

    #[test]
    fn floor_price_reads_open_sea() {
        let prices: FloorPriceResponse = serde_json::from_value(json!({
            "openSea": {
                "floorPrice": 26.9,
                "priceCurrency": "ETH",
                "collectionUrl": "https://opensea.io/collection/boredapeyachtclub",
                "retrievedAt": "2023-09-14T19:59:01.864Z"
            },
            "looksRare": { "floorPrice": 25.2, "priceCurrency": "ETH" }
        }))
        .unwrap();
        assert_eq!(prices.open_sea_floor_price(), Some(26.9));
    }

    #[test]
    fn floor_price_marketplace_error_record() {
        // the provider reports a marketplace failure as a record without a
        // floorPrice; this must not fail to decode
        let prices: FloorPriceResponse = serde_json::from_value(json!({
            "openSea": { "error": "Internal Server Error" }
        }))
        .unwrap();
        assert_eq!(prices.open_sea_floor_price(), None);
        assert!(prices.looks_rare.is_none());
    }
}

//! View state for the ethscope overview.
//!
//! One [`ViewState`] record holds a named slot per displayed value. Slots
//! transition through discrete [`SnapshotEvent`]s: the [`Loader`] populates
//! them once at startup, the [`SelectionController`] maintains the detail-view
//! selection afterwards.

/// One-shot startup loader
pub mod loader;
/// Detail-view selection
pub mod selection;

pub use loader::Loader;
pub use selection::SelectionController;

use std::sync::{Arc, RwLock};

use alloy_rpc_types_eth::Block;
use provider::{FloorPriceResponse, NftMetadata, ReceiptSummary};
use tracing::warn;

/// Number of preceding block numbers shown on the overview page.
pub const RECENT_BLOCK_COUNT: usize = 10;

/// A lazily populated view-state slot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// The fetch has not resolved yet.
    Loading,
    /// Value available.
    Ready(T),
    /// The fetch failed; the reason is shown in place of the value.
    Errored(String),
}

impl<T> LoadState<T> {
    /// Whether the slot still awaits its first transition.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The value, if the slot is ready.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

/// Initial-load slots of the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Current chain height
    BlockHeight,
    /// The ten preceding block numbers
    RecentBlocks,
    /// Full details of the current block
    CurrentBlock,
    /// Current gas price
    GasPrice,
    /// Receipt of the current block's first transaction
    FirstReceipt,
    /// Metadata of the configured NFT
    NftMetadata,
    /// Floor prices of the configured collection
    FloorPrice,
}

impl Slot {
    const fn name(self) -> &'static str {
        match self {
            Self::BlockHeight => "block_height",
            Self::RecentBlocks => "recent_blocks",
            Self::CurrentBlock => "current_block",
            Self::GasPrice => "gas_price",
            Self::FirstReceipt => "first_receipt",
            Self::NftMetadata => "nft_metadata",
            Self::FloorPrice => "floor_price",
        }
    }
}

/// Discrete view-state transitions.
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
    /// Current block height resolved.
    BlockHeightLoaded(u64),
    /// The ten preceding block numbers resolved, most recent first.
    RecentBlocksLoaded(Vec<u64>),
    /// Full details of the current block resolved.
    CurrentBlockLoaded(Block),
    /// Current gas price resolved, in wei.
    GasPriceLoaded(u128),
    /// Receipt of the current block's first transaction resolved; `None`
    /// when the block has no transactions.
    FirstReceiptLoaded(Option<ReceiptSummary>),
    /// NFT metadata resolved.
    NftMetadataLoaded(NftMetadata),
    /// Collection floor prices resolved.
    FloorPriceLoaded(FloorPriceResponse),
    /// An initial-load step failed; the slot keeps the reason.
    LoadFailed {
        /// Which slot failed.
        slot: Slot,
        /// Human-readable failure reason.
        reason: String,
    },
    /// A block was selected for the detail view.
    BlockSelected(Block),
    /// The detail view was dismissed.
    SelectionCleared,
}

/// In-memory view state backing the overview and detail views.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Current chain height.
    pub block_height: LoadState<u64>,
    /// The ten block numbers preceding the current height, most recent first.
    pub recent_blocks: LoadState<Vec<u64>>,
    /// Full details of the current block.
    pub current_block: LoadState<Block>,
    /// Current gas price in wei.
    pub gas_price: LoadState<u128>,
    /// Receipt of the current block's first transaction; `Ready(None)` means
    /// the block is empty.
    pub first_receipt: LoadState<Option<ReceiptSummary>>,
    /// Metadata of the configured NFT.
    pub nft: LoadState<NftMetadata>,
    /// Floor prices of the configured NFT collection.
    pub floor_price: LoadState<FloorPriceResponse>,
    /// Cached copy of the block picked for the detail view. Independent of
    /// `recent_blocks`; set and cleared repeatedly.
    pub selected_block: Option<Block>,
}

impl ViewState {
    /// Apply one transition.
    ///
    /// Initial-load slots accept a single transition away from `Loading`;
    /// later ones are ignored. The selection is overwritten freely — the
    /// response that arrives last wins.
    pub fn apply(&mut self, event: SnapshotEvent) {
        match event {
            SnapshotEvent::BlockHeightLoaded(height) => {
                set_once(&mut self.block_height, LoadState::Ready(height), Slot::BlockHeight);
            }
            SnapshotEvent::RecentBlocksLoaded(numbers) => {
                set_once(&mut self.recent_blocks, LoadState::Ready(numbers), Slot::RecentBlocks);
            }
            SnapshotEvent::CurrentBlockLoaded(block) => {
                set_once(&mut self.current_block, LoadState::Ready(block), Slot::CurrentBlock);
            }
            SnapshotEvent::GasPriceLoaded(wei) => {
                set_once(&mut self.gas_price, LoadState::Ready(wei), Slot::GasPrice);
            }
            SnapshotEvent::FirstReceiptLoaded(receipt) => {
                set_once(&mut self.first_receipt, LoadState::Ready(receipt), Slot::FirstReceipt);
            }
            SnapshotEvent::NftMetadataLoaded(meta) => {
                set_once(&mut self.nft, LoadState::Ready(meta), Slot::NftMetadata);
            }
            SnapshotEvent::FloorPriceLoaded(prices) => {
                set_once(&mut self.floor_price, LoadState::Ready(prices), Slot::FloorPrice);
            }
            SnapshotEvent::LoadFailed { slot, reason } => self.fail(slot, reason),
            SnapshotEvent::BlockSelected(block) => self.selected_block = Some(block),
            SnapshotEvent::SelectionCleared => self.selected_block = None,
        }
    }

    fn fail(&mut self, slot: Slot, reason: String) {
        match slot {
            Slot::BlockHeight => set_once(&mut self.block_height, LoadState::Errored(reason), slot),
            Slot::RecentBlocks => {
                set_once(&mut self.recent_blocks, LoadState::Errored(reason), slot);
            }
            Slot::CurrentBlock => {
                set_once(&mut self.current_block, LoadState::Errored(reason), slot);
            }
            Slot::GasPrice => set_once(&mut self.gas_price, LoadState::Errored(reason), slot),
            Slot::FirstReceipt => {
                set_once(&mut self.first_receipt, LoadState::Errored(reason), slot);
            }
            Slot::NftMetadata => set_once(&mut self.nft, LoadState::Errored(reason), slot),
            Slot::FloorPrice => set_once(&mut self.floor_price, LoadState::Errored(reason), slot),
        }
    }
}

fn set_once<T>(slot: &mut LoadState<T>, next: LoadState<T>, which: Slot) {
    if slot.is_loading() {
        *slot = next;
    } else {
        warn!(slot = which.name(), "ignoring duplicate load transition");
    }
}

/// Shared handle to the view state. Written only by the loader task and the
/// selection handlers, and never held across an await point.
pub type SharedState = Arc<RwLock<ViewState>>;

/// A fresh, all-loading shared view state.
pub fn shared_state() -> SharedState {
    Arc::new(RwLock::new(ViewState::default()))
}

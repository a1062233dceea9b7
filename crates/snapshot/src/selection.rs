use std::sync::Arc;

use alloy_rpc_types_eth::Block;
use provider::{ChainDataApi, ProviderError};

use crate::{SharedState, SnapshotEvent};

/// Fetches full block details on user selection and caches them in the view
/// state.
#[derive(Clone)]
pub struct SelectionController {
    client: Arc<dyn ChainDataApi>,
    state: SharedState,
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController").finish_non_exhaustive()
    }
}

impl SelectionController {
    /// Create a new controller around the injected provider client.
    pub fn new(client: Arc<dyn ChainDataApi>, state: SharedState) -> Self {
        Self { client, state }
    }

    /// Fetch `number`'s full details and store them as the selection.
    ///
    /// Overlapping calls are neither de-duplicated nor cancelled: each one
    /// fetches, and the response that arrives last wins regardless of call
    /// order. On failure the selection is left unchanged.
    pub async fn select_block(&self, number: u64) -> Result<Block, ProviderError> {
        let block = self.client.get_block(number).await?;
        self.state.write().expect("lock poisoned").apply(SnapshotEvent::BlockSelected(block.clone()));
        Ok(block)
    }

    /// Return to the homepage view: drop the selection. No network call.
    pub fn clear_selection(&self) {
        self.state.write().expect("lock poisoned").apply(SnapshotEvent::SelectionCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Loader, shared_state};
    use alloy_primitives::Address;
    use provider::test_util::MockApi;

    fn selected_number(state: &SharedState) -> Option<u64> {
        state.read().unwrap().selected_block.as_ref().map(|b| b.header.number)
    }

    #[tokio::test]
    async fn select_then_clear_leaves_snapshot_untouched() {
        let api = Arc::new(MockApi::with_height(100, 2));
        let state = shared_state();
        Loader::new(Arc::clone(&api) as Arc<dyn ChainDataApi>, state.clone(), Address::ZERO, "1")
            .run()
            .await;

        let before = state.read().unwrap().clone();
        let controller = SelectionController::new(api, state.clone());

        let block = controller.select_block(95).await.unwrap();
        assert_eq!(block.header.number, 95);
        assert_eq!(selected_number(&state), Some(95));

        controller.clear_selection();
        assert_eq!(selected_number(&state), None);

        let after = state.read().unwrap();
        assert_eq!(after.recent_blocks, before.recent_blocks);
        assert_eq!(after.current_block, before.current_block);
        assert_eq!(after.block_height, before.block_height);
    }

    #[tokio::test]
    async fn failed_selection_leaves_selection_unchanged() {
        let api = Arc::new(MockApi::with_height(100, 0));
        let state = shared_state();
        let controller = SelectionController::new(api, state.clone());

        controller.select_block(95).await.unwrap();
        assert_eq!(selected_number(&state), Some(95));

        // 12345 is not a block the mock knows about
        let err = controller.select_block(12_345).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse { .. }));
        assert_eq!(selected_number(&state), Some(95));
    }

    #[tokio::test]
    async fn later_response_wins_regardless_of_call_order() {
        let api = MockApi::with_height(100, 0);
        // hold the first selection's fetch in flight
        let gate = api.gate_block(97);
        let state = shared_state();
        let controller = SelectionController::new(Arc::new(api), state.clone());

        let racer = controller.clone();
        let first = tokio::spawn(async move { racer.select_block(97).await });

        // the second selection's response arrives while the first is stalled
        controller.select_block(98).await.unwrap();
        assert_eq!(selected_number(&state), Some(98));

        // the first response arrives last and overwrites the second
        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(selected_number(&state), Some(97));
    }
}

//! Route handlers for the ethscope API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use primitives::{
    gwei::wei_to_gwei,
    preview::{DEFAULT_PREVIEW_LIMIT, transactions_preview},
};
use snapshot::ViewState;

use crate::{
    ApiState,
    types::{
        ErrorResponse, FieldView, FirstTransactionView, HealthResponse, OverviewResponse,
        SelectedBlockResponse, TransactionsPreview,
    },
};

/// Health check handler returning `{ "status": "ok" }`.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse)
    ),
    tag = "ethscope"
)]
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_owned() })
}

#[utoipa::path(
    get,
    path = "/overview",
    responses(
        (status = 200, description = "Homepage view of the chain snapshot", body = OverviewResponse)
    ),
    tag = "ethscope"
)]
pub(crate) async fn overview(State(state): State<ApiState>) -> Json<OverviewResponse> {
    let view = state.view.read().expect("lock poisoned");
    Json(render_overview(&view))
}

/// Render the overview from whatever state is currently available. Pure and
/// synchronous; unresolved slots come out as `loading`.
fn render_overview(view: &ViewState) -> OverviewResponse {
    OverviewResponse {
        gas_price_gwei: FieldView::from_slot(&view.gas_price, |wei| wei_to_gwei(*wei)),
        recent_blocks: FieldView::from_slot(&view.recent_blocks, Clone::clone),
        current_block_number: FieldView::from_slot(&view.current_block, |block| {
            block.header.number
        }),
        transactions: FieldView::from_slot(&view.current_block, |block| {
            let hashes: Vec<String> =
                block.transactions.hashes().map(|hash| hash.to_string()).collect();
            let (shown, more) = transactions_preview(&hashes, DEFAULT_PREVIEW_LIMIT);
            TransactionsPreview {
                hashes: shown,
                more,
                suffix: (more > 0).then(|| format!("+{more} more...")),
            }
        }),
        first_transaction: FieldView::from_slot(&view.first_receipt, |receipt| {
            receipt.as_ref().map(|r| FirstTransactionView {
                tx_hash: r.transaction_hash.to_string(),
                from: r.from.to_string(),
                to: r.to.map(|addr| addr.to_string()),
                gas_used: r.gas_used,
            })
        }),
        floor_price_eth: FieldView::try_from_slot(&view.floor_price, |prices| {
            prices
                .open_sea_floor_price()
                .ok_or_else(|| "openSea.floorPrice missing from provider response".to_owned())
        }),
        nft_attributes: FieldView::try_from_slot(&view.nft, |meta| {
            meta.attributes()
                .cloned()
                .ok_or_else(|| "rawMetadata.attributes missing from provider response".to_owned())
        }),
        selected_block_number: view.selected_block.as_ref().map(|block| block.header.number),
    }
}

/// Select a block: fetch its full details, cache them as the current
/// selection, and return them.
#[utoipa::path(
    get,
    path = "/blocks/{number}",
    params(
        ("number" = u64, Path, description = "Block number to select")
    ),
    responses(
        (status = 200, description = "Full JSON of the selected block", body = SelectedBlockResponse),
        (status = 502, description = "Provider error", body = ErrorResponse)
    ),
    tag = "ethscope"
)]
pub(crate) async fn select_block(
    Path(number): Path<u64>,
    State(state): State<ApiState>,
) -> Result<Json<SelectedBlockResponse>, ErrorResponse> {
    let block = state.selection.select_block(number).await.map_err(|e| {
        tracing::error!(error = %e, number, "Failed to fetch selected block");
        ErrorResponse::new(
            "provider-error",
            "Provider error",
            StatusCode::BAD_GATEWAY,
            e.to_string(),
        )
    })?;

    let body = serde_json::to_value(&block).map_err(|e| {
        tracing::error!(error = %e, number, "Failed to serialize selected block");
        ErrorResponse::new(
            "serialization-error",
            "Serialization error",
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )
    })?;
    Ok(Json(SelectedBlockResponse { number: block.header.number, block: body }))
}

/// Return to the homepage: clear the selection.
#[utoipa::path(
    delete,
    path = "/selection",
    responses(
        (status = 204, description = "Selection cleared")
    ),
    tag = "ethscope"
)]
pub(crate) async fn clear_selection(State(state): State<ApiState>) -> StatusCode {
    state.selection.clear_selection();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider::test_util::{block_with_hashes, sample_floor_price, sample_nft_metadata, tx_hashes};
    use snapshot::{LoadState, SnapshotEvent};

    #[test]
    fn renders_loading_placeholders() {
        let view = ViewState::default();
        let overview = render_overview(&view);
        assert_eq!(overview.gas_price_gwei, FieldView::Loading);
        assert_eq!(overview.recent_blocks, FieldView::Loading);
        assert_eq!(overview.current_block_number, FieldView::Loading);
        assert_eq!(overview.transactions, FieldView::Loading);
        assert!(overview.selected_block_number.is_none());
    }

    #[test]
    fn renders_transactions_preview_with_suffix() {
        let mut view = ViewState::default();
        view.apply(SnapshotEvent::CurrentBlockLoaded(block_with_hashes(100, &tx_hashes(12))));

        let overview = render_overview(&view);
        assert_eq!(overview.current_block_number, FieldView::Ready { value: 100 });
        let FieldView::Ready { value: preview } = overview.transactions else {
            panic!("transactions should be ready");
        };
        assert_eq!(preview.hashes.len(), 5);
        assert_eq!(preview.more, 7);
        assert_eq!(preview.suffix.as_deref(), Some("+7 more..."));
    }

    #[test]
    fn short_transaction_list_has_no_suffix() {
        let mut view = ViewState::default();
        view.apply(SnapshotEvent::CurrentBlockLoaded(block_with_hashes(100, &tx_hashes(3))));

        let FieldView::Ready { value: preview } = render_overview(&view).transactions else {
            panic!("transactions should be ready");
        };
        assert_eq!(preview.hashes.len(), 3);
        assert_eq!(preview.more, 0);
        assert!(preview.suffix.is_none());
    }

    #[test]
    fn renders_gas_price_in_gwei() {
        let mut view = ViewState::default();
        view.apply(SnapshotEvent::GasPriceLoaded(2_000_000_000));
        assert_eq!(
            render_overview(&view).gas_price_gwei,
            FieldView::Ready { value: "2".to_owned() }
        );
    }

    #[test]
    fn missing_nft_attributes_render_unavailable() {
        let mut view = ViewState::default();
        let meta = serde_json::from_value(serde_json::json!({ "tokenId": "1" })).unwrap();
        view.apply(SnapshotEvent::NftMetadataLoaded(meta));

        let overview = render_overview(&view);
        assert!(matches!(
            overview.nft_attributes,
            FieldView::Errored { ref reason } if reason.contains("rawMetadata.attributes")
        ));
    }

    #[test]
    fn missing_floor_price_renders_unavailable() {
        let mut view = ViewState::default();
        let prices =
            serde_json::from_value(serde_json::json!({ "openSea": { "error": "oops" } })).unwrap();
        view.apply(SnapshotEvent::FloorPriceLoaded(prices));

        assert!(matches!(
            render_overview(&view).floor_price_eth,
            FieldView::Errored { ref reason } if reason.contains("openSea.floorPrice")
        ));
    }

    #[test]
    fn renders_ready_nft_fields() {
        let mut view = ViewState::default();
        view.apply(SnapshotEvent::NftMetadataLoaded(sample_nft_metadata()));
        view.apply(SnapshotEvent::FloorPriceLoaded(sample_floor_price()));

        let overview = render_overview(&view);
        assert_eq!(overview.floor_price_eth, FieldView::Ready { value: 26.9 });
        assert!(matches!(
            overview.nft_attributes,
            FieldView::Ready { ref value } if value.as_array().unwrap().len() == 2
        ));
    }

    #[test]
    fn errored_slot_passes_reason_through() {
        let mut view = ViewState::default();
        view.gas_price = LoadState::Errored("rate limited".to_owned());
        assert_eq!(
            render_overview(&view).gas_price_gwei,
            FieldView::Errored { reason: "rate limited".to_owned() }
        );
    }
}

//! JSON response types for the ethscope API.

#![allow(missing_docs)]

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use snapshot::LoadState;
use utoipa::ToSchema;

/// Per-field load state as rendered to clients.
///
/// Serializes as `{"status":"loading"}`, `{"status":"ready","value":…}` or
/// `{"status":"errored","reason":…}`; clients render the non-ready states as
/// a `Loading...` / `unavailable` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FieldView<T> {
    Loading,
    Ready { value: T },
    Errored { reason: String },
}

impl<T> FieldView<T> {
    /// Project a view-state slot into a response field.
    pub fn from_slot<S>(slot: &LoadState<S>, f: impl FnOnce(&S) -> T) -> Self {
        match slot {
            LoadState::Loading => Self::Loading,
            LoadState::Ready(value) => Self::Ready { value: f(value) },
            LoadState::Errored(reason) => Self::Errored { reason: reason.clone() },
        }
    }

    /// Like [`Self::from_slot`], for projections that can find the loaded
    /// response missing the displayed field.
    pub fn try_from_slot<S>(slot: &LoadState<S>, f: impl FnOnce(&S) -> Result<T, String>) -> Self {
        match slot {
            LoadState::Loading => Self::Loading,
            LoadState::Ready(value) => match f(value) {
                Ok(value) => Self::Ready { value },
                Err(reason) => Self::Errored { reason },
            },
            LoadState::Errored(reason) => Self::Errored { reason: reason.clone() },
        }
    }
}

/// The homepage view.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    /// Current gas price as a whole-number gwei string.
    #[schema(value_type = Object)]
    pub gas_price_gwei: FieldView<String>,
    /// The ten block numbers preceding the current block, most recent first.
    #[schema(value_type = Object)]
    pub recent_blocks: FieldView<Vec<u64>>,
    #[schema(value_type = Object)]
    pub current_block_number: FieldView<u64>,
    /// First transactions of the current block.
    #[schema(value_type = Object)]
    pub transactions: FieldView<TransactionsPreview>,
    /// Receipt of the current block's first transaction; a `null` value means
    /// the block has no transactions.
    #[schema(value_type = Object)]
    pub first_transaction: FieldView<Option<FirstTransactionView>>,
    /// OpenSea floor price of the configured collection, in ETH.
    #[schema(value_type = Object)]
    pub floor_price_eth: FieldView<f64>,
    /// Raw attribute list of the configured NFT.
    #[schema(value_type = Object)]
    pub nft_attributes: FieldView<Value>,
    /// Number of the block currently selected for the detail view.
    pub selected_block_number: Option<u64>,
}

/// Truncated transaction list of the current block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TransactionsPreview {
    pub hashes: Vec<String>,
    /// Count of transactions beyond the preview.
    pub more: usize,
    /// `+N more...` display suffix, present when the list is truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Receipt fields shown for the current block's first transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FirstTransactionView {
    pub tx_hash: String,
    pub from: String,
    pub to: Option<String>,
    pub gas_used: u128,
}

/// The detail view of a selected block.
#[derive(Debug, Serialize, ToSchema)]
pub struct SelectedBlockResponse {
    pub number: u64,
    /// Full provider JSON of the block.
    #[schema(value_type = Object)]
    pub block: Value,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Problem body returned on handler failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    /// Create a new [`ErrorResponse`].
    pub fn new(error_type: &str, title: &str, status: StatusCode, detail: String) -> Self {
        Self {
            error_type: error_type.to_owned(),
            title: title.to_owned(),
            status: status.as_u16(),
            detail,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_view_serialization() {
        let loading: FieldView<u64> = FieldView::Loading;
        assert_eq!(serde_json::to_value(&loading).unwrap(), json!({ "status": "loading" }));

        let ready = FieldView::Ready { value: 100u64 };
        assert_eq!(
            serde_json::to_value(&ready).unwrap(),
            json!({ "status": "ready", "value": 100 })
        );

        let errored: FieldView<u64> = FieldView::Errored { reason: "rate limited".to_owned() };
        assert_eq!(
            serde_json::to_value(&errored).unwrap(),
            json!({ "status": "errored", "reason": "rate limited" })
        );
    }

    #[test]
    fn from_slot_projects_ready_values() {
        let slot = LoadState::Ready(5_000_000_000u128);
        let view = FieldView::from_slot(&slot, |wei| primitives::gwei::wei_to_gwei(*wei));
        assert_eq!(view, FieldView::Ready { value: "5".to_owned() });
    }

    #[test]
    fn try_from_slot_reports_missing_fields() {
        let slot = LoadState::Ready(());
        let view: FieldView<u64> =
            FieldView::try_from_slot(&slot, |()| Err("field missing".to_owned()));
        assert_eq!(view, FieldView::Errored { reason: "field missing".to_owned() });
    }
}

//! Response routes
//!
//! Vendor response submission and the pre-evaluation response listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::domain::{responses::sort_responses, ResponseSort, RfqResponse, SubmitResponseRequest};
use crate::error::ApiError;
use crate::services::lifecycle;

/// POST /rfqs/:rfq_id/responses
///
/// Submit a vendor response. One response per vendor name per RFQ.
pub async fn submit_response(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(rfq_id): Path<Uuid>,
    Json(req): Json<SubmitResponseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        user_id = %user.id,
        rfq_id = %rfq_id,
        vendor_name = user.vendor_name(),
        price = req.price,
        "Submitting RFQ response"
    );

    let response =
        lifecycle::submit_response(&state.store, state.notifier.as_ref(), &user, rfq_id, req)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListResponsesParams {
    #[serde(default)]
    pub sort: Option<ResponseSort>,
}

/// GET /rfqs/:rfq_id/responses?sort=price_asc
///
/// Responses in display order. The timeframe sorts compare the raw
/// strings; the parsed-duration ranking only exists in evaluation.
pub async fn list_responses(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(rfq_id): Path<Uuid>,
    Query(params): Query<ListResponsesParams>,
) -> Result<DataResponse<Vec<RfqResponse>>, ApiError> {
    let rfq = state.store.get_by_id(rfq_id)?;

    let mut responses = rfq.responses;
    sort_responses(&mut responses, params.sort.unwrap_or_default());
    Ok(DataResponse::new(responses))
}

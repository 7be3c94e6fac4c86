//! RFQ routes
//!
//! Creation, listing, updates, and the publish/evaluate lifecycle
//! actions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::domain::{CreateRfqRequest, Rfq, UpdateRfqRequest};
use crate::error::ApiError;
use crate::services::lifecycle;

/// POST /rfqs
///
/// Create an RFQ. Customers only; may be created as a draft or published
/// immediately.
pub async fn create_rfq(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRfqRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        user_id = %user.id,
        title = req.title.as_deref().unwrap_or("<untitled>"),
        segment = req.segment.as_deref().unwrap_or(""),
        "Creating RFQ"
    );

    let rfq = lifecycle::create_rfq(&state.store, state.notifier.as_ref(), &user, req)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(rfq))))
}

/// GET /rfqs
///
/// List RFQs visible to the current user: customers see the RFQs they
/// authored, vendors see RFQs they are invited to.
pub async fn list_rfqs(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Paginated<Rfq>, ApiError> {
    tracing::debug!(
        user_id = %user.id,
        user_type = ?user.user_type,
        page = pagination.page(),
        per_page = pagination.per_page(),
        "Listing RFQs"
    );

    let rfqs = state.store.list_for_user(&user);
    let (page, total) = pagination.slice(rfqs);
    Ok(Paginated::new(page, &pagination, total))
}

/// GET /rfqs/:rfq_id
pub async fn get_rfq(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(rfq_id): Path<Uuid>,
) -> Result<DataResponse<Rfq>, ApiError> {
    let rfq = state.store.get_by_id(rfq_id)?;
    Ok(DataResponse::new(rfq))
}

/// PATCH /rfqs/:rfq_id
///
/// Merge-update an RFQ. Owner only, draft only.
pub async fn update_rfq(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(rfq_id): Path<Uuid>,
    Json(req): Json<UpdateRfqRequest>,
) -> Result<DataResponse<Rfq>, ApiError> {
    tracing::info!(user_id = %user.id, rfq_id = %rfq_id, "Updating RFQ");

    let rfq = lifecycle::update_rfq(&state.store, &user, rfq_id, req)?;
    Ok(DataResponse::new(rfq))
}

/// POST /rfqs/:rfq_id/publish
///
/// Open a draft RFQ to its invited vendors.
pub async fn publish_rfq(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(rfq_id): Path<Uuid>,
) -> Result<DataResponse<Rfq>, ApiError> {
    tracing::info!(user_id = %user.id, rfq_id = %rfq_id, "Publishing RFQ");

    let rfq = lifecycle::publish_rfq(&state.store, state.notifier.as_ref(), &user, rfq_id)?;
    Ok(DataResponse::new(rfq))
}

/// POST /rfqs/:rfq_id/evaluate
///
/// Score and rank all responses, completing the RFQ. Returns the scored
/// responses best-first.
pub async fn evaluate_rfq(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(rfq_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(user_id = %user.id, rfq_id = %rfq_id, "Evaluating RFQ responses");

    let responses =
        lifecycle::evaluate_rfq(&state.store, state.notifier.as_ref(), &user, rfq_id)?;
    Ok(Json(DataResponse::new(responses)))
}

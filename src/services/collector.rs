//! Response collection
//!
//! Appends vendor responses to an RFQ. The duplicate-vendor check and the
//! append run inside one `with_rfq_mut` critical section, so two racing
//! submissions from the same vendor cannot both pass the check.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{RfqResponse, RfqStatus, ResponseStatus, SubmitResponseRequest, User};
use crate::error::{ApiError, ApiResult};
use crate::services::scoring;
use crate::store::RfqStore;

/// Validate the numeric inputs before they can reach the scoring engine.
///
/// A zero or non-finite price, or a timeframe with no positive day count,
/// would later divide by zero when scoring; both are rejected up front.
fn validate_submission(req: &SubmitResponseRequest) -> ApiResult<()> {
    if req.solution.trim().is_empty() {
        return Err(ApiError::validation("Solution must not be empty"));
    }
    if !req.price.is_finite() || req.price <= 0.0 {
        return Err(ApiError::validation("Price must be a positive number"));
    }
    match scoring::parse_timeframe(&req.timeframe) {
        Some(days) if days > 0 => Ok(()),
        _ => Err(ApiError::validation(
            "Timeframe must contain a duration, e.g. \"6 weeks\" or \"2 months\"",
        )),
    }
}

/// Submit a vendor's response to an RFQ.
///
/// The vendor is matched by company name (falling back to personal name);
/// one response per vendor name per RFQ. The first response moves the RFQ
/// from `published` to `in_review`.
pub fn submit_response(
    store: &RfqStore,
    user: &User,
    rfq_id: Uuid,
    req: SubmitResponseRequest,
) -> ApiResult<RfqResponse> {
    if !user.is_vendor() {
        return Err(ApiError::validation("Only vendors can submit responses"));
    }
    validate_submission(&req)?;

    let vendor_name = user.vendor_name().to_string();

    store.with_rfq_mut(rfq_id, |rfq| {
        if !rfq.status.accepts_responses() {
            return Err(match rfq.status {
                RfqStatus::Draft => ApiError::validation("RFQ has not been published"),
                _ => ApiError::validation("RFQ is no longer accepting responses"),
            });
        }

        if rfq.has_response_from(&vendor_name) {
            return Err(ApiError::DuplicateResponse(format!(
                "{} has already responded to this RFQ",
                vendor_name
            )));
        }

        let response = RfqResponse {
            id: Uuid::new_v4(),
            rfq_id,
            vendor_id: user.id,
            vendor_name: vendor_name.clone(),
            vendor_logo: req.vendor_logo,
            solution: req.solution,
            price: req.price,
            timeframe: req.timeframe,
            status: ResponseStatus::Pending,
            created_at: Utc::now(),
            evaluation: None,
        };

        rfq.responses.push(response.clone());
        if rfq.status == RfqStatus::Published {
            rfq.status = RfqStatus::InReview;
        }

        Ok(response)
    })
}

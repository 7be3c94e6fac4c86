use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decision status on a response. The platform never moves this past
/// `Pending` on its own; accept/reject is a manual customer decision
/// recorded out of band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Pending,
    Accepted,
    Rejected,
}

impl Default for ResponseStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Scoring snapshot attached to a response by the evaluation pass.
///
/// Scores are relative to the response set present at evaluation time;
/// once attached they are never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub technical_score: f64,
    pub price_score: f64,
    pub timeframe_score: f64,
    pub total_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
}

/// A vendor's proposal against one RFQ.
///
/// `vendor_name` (not `vendor_id`) is the uniqueness and matching key for
/// responses, kept for wire compatibility with the existing UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqResponse {
    pub id: Uuid,
    pub rfq_id: Uuid,
    pub vendor_id: Uuid,
    pub vendor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_logo: Option<String>,
    pub solution: String,
    pub price: f64,
    pub timeframe: String,
    pub status: ResponseStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

/// Request DTO for submitting a response
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponseRequest {
    pub solution: String,
    pub price: f64,
    pub timeframe: String,
    /// Opaque external URL supplied by the storage collaborator.
    #[serde(default)]
    pub vendor_logo: Option<String>,
}

/// Pre-evaluation display ordering for a response list.
///
/// The timeframe variants compare the raw strings lexicographically. This
/// is a deliberately cruder path than the scoring engine's parsed-duration
/// comparison and must stay that way for display compatibility.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSort {
    #[default]
    PriceAsc,
    PriceDesc,
    TimeframeAsc,
    TimeframeDesc,
}

/// Sort a response list for display. Stable, so equal keys keep
/// submission order.
pub fn sort_responses(responses: &mut [RfqResponse], sort: ResponseSort) {
    match sort {
        ResponseSort::PriceAsc => {
            responses.sort_by(|a, b| a.price.total_cmp(&b.price));
        }
        ResponseSort::PriceDesc => {
            responses.sort_by(|a, b| b.price.total_cmp(&a.price));
        }
        ResponseSort::TimeframeAsc => {
            responses.sort_by(|a, b| a.timeframe.cmp(&b.timeframe));
        }
        ResponseSort::TimeframeDesc => {
            responses.sort_by(|a, b| b.timeframe.cmp(&a.timeframe));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn response(vendor: &str, price: f64, timeframe: &str) -> RfqResponse {
        RfqResponse {
            id: Uuid::new_v4(),
            rfq_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            vendor_name: vendor.to_string(),
            vendor_logo: None,
            solution: String::new(),
            price,
            timeframe: timeframe.to_string(),
            status: ResponseStatus::Pending,
            created_at: Utc::now(),
            evaluation: None,
        }
    }

    #[test]
    fn sorts_by_price_ascending() {
        let mut responses = vec![
            response("a", 300.0, "1 week"),
            response("b", 100.0, "2 weeks"),
            response("c", 200.0, "3 weeks"),
        ];
        sort_responses(&mut responses, ResponseSort::PriceAsc);
        let order: Vec<_> = responses.iter().map(|r| r.vendor_name.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn timeframe_sort_is_lexicographic_not_parsed() {
        // Parsed, "10 days" < "2 months"; lexicographically "10" < "2",
        // which happens to agree. "9 days" vs "10 days" is where they
        // diverge: lexicographic puts "10 days" first.
        let mut responses = vec![
            response("nine", 1.0, "9 days"),
            response("ten", 1.0, "10 days"),
        ];
        sort_responses(&mut responses, ResponseSort::TimeframeAsc);
        let order: Vec<_> = responses.iter().map(|r| r.vendor_name.as_str()).collect();
        assert_eq!(order, ["ten", "nine"]);
    }

    #[test]
    fn equal_prices_keep_submission_order() {
        let mut responses = vec![
            response("first", 100.0, "1 week"),
            response("second", 100.0, "2 weeks"),
        ];
        sort_responses(&mut responses, ResponseSort::PriceAsc);
        let order: Vec<_> = responses.iter().map(|r| r.vendor_name.as_str()).collect();
        assert_eq!(order, ["first", "second"]);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::responses::RfqResponse;

/// RFQ lifecycle status
///
/// Transitions only move forward: draft -> published -> in_review ->
/// completed. `Completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    Draft,
    Published,
    InReview,
    Completed,
}

impl Default for RfqStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl RfqStatus {
    /// Vendors may respond only after publication and before completion.
    pub fn accepts_responses(&self) -> bool {
        matches!(self, Self::Published | Self::InReview)
    }
}

/// A single requirement line on an RFQ. Order is preserved and meaningful;
/// `value` is the text matched against vendor solutions during scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Requirement {
    pub key: String,
    pub value: String,
}

/// Request for Quotation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfq {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub segment: String,
    /// Vendor companies invited to respond; frozen once published.
    pub companies: Vec<String>,
    pub status: RfqStatus,
    pub requirements: Vec<Requirement>,
    pub responses: Vec<RfqResponse>,
    pub created_at: DateTime<Utc>,
    /// Display-only; submissions after the deadline are not rejected.
    pub deadline: DateTime<Utc>,
}

impl Rfq {
    pub fn has_response_from(&self, vendor_name: &str) -> bool {
        self.responses.iter().any(|r| r.vendor_name == vendor_name)
    }
}

/// Request DTO for creating an RFQ
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRfqRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub companies: Option<Vec<String>>,
    #[serde(default)]
    pub requirements: Option<Vec<Requirement>>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// `draft` to save for later, `published` to open for responses
    /// immediately. Defaults to `draft`.
    #[serde(default)]
    pub status: Option<RfqStatus>,
}

/// Request DTO for updating an RFQ (draft only; merge semantics)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRfqRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub companies: Option<Vec<String>>,
    #[serde(default)]
    pub requirements: Option<Vec<Requirement>>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl UpdateRfqRequest {
    /// Merge the provided fields into the record, leaving the rest alone.
    pub fn apply_to(self, rfq: &mut Rfq) {
        if let Some(title) = self.title {
            rfq.title = title;
        }
        if let Some(description) = self.description {
            rfq.description = description;
        }
        if let Some(segment) = self.segment {
            rfq.segment = segment;
        }
        if let Some(companies) = self.companies {
            rfq.companies = companies;
        }
        if let Some(requirements) = self.requirements {
            rfq.requirements = requirements;
        }
        if let Some(deadline) = self.deadline {
            rfq.deadline = deadline;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.segment.is_none()
            && self.companies.is_none()
            && self.requirements.is_none()
            && self.deadline.is_none()
    }
}

//! In-memory RFQ repository
//!
//! Single mutable collection guarded by one `RwLock`. Mutating operations
//! run their whole check-then-write sequence under the write lock, so no
//! two operations interleave on the same RFQ. Reads clone records out
//! under the read lock.
//!
//! The repository owns identity assignment and field merging only; the
//! lifecycle rules live in the service layer.

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{CreateRfqRequest, Rfq, RfqStatus, UpdateRfqRequest, User};
use crate::error::{ApiError, ApiResult};

pub struct RfqStore {
    rfqs: RwLock<Vec<Rfq>>,
    default_deadline_days: i64,
}

impl RfqStore {
    pub fn new(default_deadline_days: i64) -> Self {
        Self {
            rfqs: RwLock::new(Vec::new()),
            default_deadline_days,
        }
    }

    /// Create an RFQ owned by the given customer.
    ///
    /// Assigns a fresh id, stamps `created_at`, and fills defaults:
    /// status `draft`, empty requirements/companies, deadline now plus the
    /// configured default. Callers may create directly as `published` (the
    /// "publish now" path); any other requested status is rejected.
    pub fn create(&self, user: &User, req: CreateRfqRequest) -> ApiResult<Rfq> {
        if !user.is_customer() {
            return Err(ApiError::validation("Only customers can create RFQs"));
        }

        let status = match req.status.unwrap_or_default() {
            s @ (RfqStatus::Draft | RfqStatus::Published) => s,
            _ => {
                return Err(ApiError::validation(
                    "RFQs can only be created as draft or published",
                ))
            }
        };

        let now = Utc::now();
        let rfq = Rfq {
            id: Uuid::new_v4(),
            title: req.title.unwrap_or_else(|| "Untitled RFQ".to_string()),
            description: req.description.unwrap_or_default(),
            customer_id: user.id,
            customer_name: user.name.clone(),
            segment: req.segment.unwrap_or_default(),
            companies: req.companies.unwrap_or_default(),
            status,
            requirements: req.requirements.unwrap_or_default(),
            responses: Vec::new(),
            created_at: now,
            deadline: req
                .deadline
                .unwrap_or_else(|| now + Duration::days(self.default_deadline_days)),
        };

        self.rfqs.write().push(rfq.clone());
        Ok(rfq)
    }

    /// Merge the provided fields into an existing record.
    ///
    /// Pure field merge; state-machine rules are enforced by the caller.
    pub fn update(&self, id: Uuid, req: UpdateRfqRequest) -> ApiResult<Rfq> {
        let mut rfqs = self.rfqs.write();
        let rfq = rfqs
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::not_found("RFQ not found"))?;

        req.apply_to(rfq);
        Ok(rfq.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> ApiResult<Rfq> {
        self.rfqs
            .read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("RFQ not found"))
    }

    /// RFQs visible to a user, in creation order.
    ///
    /// Customers see RFQs they authored; vendors see RFQs whose invited
    /// `companies` list contains their company name. The asymmetry (owner
    /// id on one side, name membership on the other) is intentional.
    pub fn list_for_user(&self, user: &User) -> Vec<Rfq> {
        let rfqs = self.rfqs.read();
        if user.is_customer() {
            rfqs.iter()
                .filter(|r| r.customer_id == user.id)
                .cloned()
                .collect()
        } else {
            let company = user.company.as_deref().unwrap_or("");
            rfqs.iter()
                .filter(|r| r.companies.iter().any(|c| c == company))
                .cloned()
                .collect()
        }
    }

    /// Run a mutation against one RFQ under the write lock.
    ///
    /// This is the atomic section used for duplicate-response checks and
    /// state transitions; the closure sees the record exclusively.
    pub fn with_rfq_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Rfq) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let mut rfqs = self.rfqs.write();
        let rfq = rfqs
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::not_found("RFQ not found"))?;
        f(rfq)
    }

    pub fn count(&self) -> usize {
        self.rfqs.read().len()
    }
}

//! Notification hook
//!
//! The RFQ lifecycle emits events that should reach counterparties
//! (vendors learn of a publication, customers learn of new responses).
//! Actual delivery (email, push) is an external concern; this module only
//! defines the seam. The default sink records events through `tracing` so
//! the flow is observable without any delivery backend.

use uuid::Uuid;

/// An event worth telling a counterparty about.
#[derive(Debug, Clone)]
pub enum RfqEvent {
    /// An RFQ opened for responses; `companies` are the invited vendors.
    RfqPublished {
        rfq_id: Uuid,
        title: String,
        companies: Vec<String>,
    },
    /// A vendor responded; addressed to the owning customer.
    ResponseSubmitted {
        rfq_id: Uuid,
        customer_id: Uuid,
        vendor_name: String,
        price: f64,
    },
    /// Scoring finished and the RFQ completed.
    RfqEvaluated {
        rfq_id: Uuid,
        customer_id: Uuid,
        response_count: usize,
    },
}

/// Delivery seam. Implementations must be cheap and non-blocking; the
/// lifecycle calls this synchronously inside request handling.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: RfqEvent);
}

/// Default sink: structured log lines, no external delivery.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: RfqEvent) {
        match &event {
            RfqEvent::RfqPublished {
                rfq_id,
                title,
                companies,
            } => {
                tracing::info!(
                    rfq_id = %rfq_id,
                    title = %title,
                    invited = companies.len(),
                    "RFQ published"
                );
            }
            RfqEvent::ResponseSubmitted {
                rfq_id,
                customer_id,
                vendor_name,
                price,
            } => {
                tracing::info!(
                    rfq_id = %rfq_id,
                    customer_id = %customer_id,
                    vendor_name = %vendor_name,
                    price = price,
                    "Response submitted"
                );
            }
            RfqEvent::RfqEvaluated {
                rfq_id,
                customer_id,
                response_count,
            } => {
                tracing::info!(
                    rfq_id = %rfq_id,
                    customer_id = %customer_id,
                    response_count = response_count,
                    "RFQ evaluated"
                );
            }
        }
    }
}

//! RFQ lifecycle controller
//!
//! Owns the status state machine (draft -> published -> in_review ->
//! completed) and orchestrates the collector and the scoring engine at
//! the right transitions. The store itself only merges fields; every
//! state rule is enforced here or in the collector.

use uuid::Uuid;

use crate::domain::{
    CreateRfqRequest, Rfq, RfqResponse, RfqStatus, SubmitResponseRequest, UpdateRfqRequest, User,
};
use crate::error::{ApiError, ApiResult};
use crate::services::collector;
use crate::services::notifications::{Notifier, RfqEvent};
use crate::services::scoring;
use crate::store::RfqStore;

fn ensure_owner(rfq: &Rfq, user: &User) -> ApiResult<()> {
    if rfq.customer_id != user.id {
        return Err(ApiError::validation("Only the RFQ owner can do this"));
    }
    Ok(())
}

/// Merge-update an RFQ. Owner only, and only while still a draft; after
/// publication the invited companies and the deadline are frozen.
///
/// The draft check and the merge share one critical section, so a
/// concurrent publish cannot slip in between them and receive the edit.
pub fn update_rfq(
    store: &RfqStore,
    user: &User,
    rfq_id: Uuid,
    req: UpdateRfqRequest,
) -> ApiResult<Rfq> {
    if req.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }

    store.with_rfq_mut(rfq_id, |rfq| {
        ensure_owner(rfq, user)?;
        if rfq.status != RfqStatus::Draft {
            return Err(ApiError::validation("Only draft RFQs can be edited"));
        }
        req.apply_to(rfq);
        Ok(rfq.clone())
    })
}

/// Create an RFQ on behalf of a customer.
///
/// The "publish now" path (created directly as `published`) fires the
/// same publication event as an explicit publish; a draft stays silent
/// until published.
pub fn create_rfq(
    store: &RfqStore,
    notifier: &dyn Notifier,
    user: &User,
    req: CreateRfqRequest,
) -> ApiResult<Rfq> {
    let rfq = store.create(user, req)?;

    if rfq.status == RfqStatus::Published {
        notifier.notify(RfqEvent::RfqPublished {
            rfq_id: rfq.id,
            title: rfq.title.clone(),
            companies: rfq.companies.clone(),
        });
    }

    Ok(rfq)
}

/// Explicit publish action: draft -> published, opening the RFQ to the
/// invited vendors.
pub fn publish_rfq(
    store: &RfqStore,
    notifier: &dyn Notifier,
    user: &User,
    rfq_id: Uuid,
) -> ApiResult<Rfq> {
    let rfq = store.with_rfq_mut(rfq_id, |rfq| {
        ensure_owner(rfq, user)?;
        if rfq.status != RfqStatus::Draft {
            return Err(ApiError::validation("Only draft RFQs can be published"));
        }
        rfq.status = RfqStatus::Published;
        Ok(rfq.clone())
    })?;

    notifier.notify(RfqEvent::RfqPublished {
        rfq_id: rfq.id,
        title: rfq.title.clone(),
        companies: rfq.companies.clone(),
    });

    Ok(rfq)
}

/// Accept a vendor response, then notify the RFQ owner.
pub fn submit_response(
    store: &RfqStore,
    notifier: &dyn Notifier,
    user: &User,
    rfq_id: Uuid,
    req: SubmitResponseRequest,
) -> ApiResult<RfqResponse> {
    let response = collector::submit_response(store, user, rfq_id, req)?;

    let rfq = store.get_by_id(rfq_id)?;
    notifier.notify(RfqEvent::ResponseSubmitted {
        rfq_id,
        customer_id: rfq.customer_id,
        vendor_name: response.vendor_name.clone(),
        price: response.price,
    });

    Ok(response)
}

/// Score all responses, persist them in best-first order, and complete
/// the RFQ.
///
/// Terminal: a completed RFQ keeps its scored snapshot, so evaluating it
/// again returns the stored responses without recomputation. With zero
/// responses nothing can be ranked and the status is left untouched.
pub fn evaluate_rfq(
    store: &RfqStore,
    notifier: &dyn Notifier,
    user: &User,
    rfq_id: Uuid,
) -> ApiResult<Vec<RfqResponse>> {
    // The closure reports whether this call performed the transition, so
    // repeat calls on a completed RFQ do not re-fire the event.
    let (responses, completed_for) = store.with_rfq_mut(rfq_id, |rfq| {
        ensure_owner(rfq, user)?;

        if rfq.status == RfqStatus::Completed {
            return Ok((rfq.responses.clone(), None));
        }
        if rfq.responses.is_empty() {
            return Err(ApiError::NoResponses(
                "RFQ has no responses to evaluate".to_string(),
            ));
        }

        let scored = scoring::evaluate(rfq)?;
        rfq.responses = scored.clone();
        rfq.status = RfqStatus::Completed;
        Ok((scored, Some(rfq.customer_id)))
    })?;

    if let Some(customer_id) = completed_for {
        notifier.notify(RfqEvent::RfqEvaluated {
            rfq_id,
            customer_id,
            response_count: responses.len(),
        });
    }

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Requirement, UserType};
    use crate::services::notifications::LogNotifier;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Captures emitted events for assertions.
    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<RfqEvent>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, event: RfqEvent) {
            self.events.lock().push(event);
        }
    }

    impl RecordingNotifier {
        fn published_count(&self) -> usize {
            self.events
                .lock()
                .iter()
                .filter(|e| matches!(e, RfqEvent::RfqPublished { .. }))
                .count()
        }

        fn evaluated_count(&self) -> usize {
            self.events
                .lock()
                .iter()
                .filter(|e| matches!(e, RfqEvent::RfqEvaluated { .. }))
                .count()
        }
    }

    fn customer() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            user_type: UserType::Customer,
            company: None,
        }
    }

    fn vendor(company: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            user_type: UserType::Vendor,
            company: Some(company.to_string()),
        }
    }

    fn draft_rfq(store: &RfqStore, owner: &User) -> Rfq {
        store
            .create(
                owner,
                CreateRfqRequest {
                    title: Some("Data platform".to_string()),
                    description: None,
                    segment: Some("cloud-services".to_string()),
                    companies: Some(vec!["Acme".to_string(), "Globex".to_string()]),
                    requirements: Some(vec![Requirement {
                        key: "Storage".to_string(),
                        value: "500TB".to_string(),
                    }]),
                    deadline: None,
                    status: None,
                },
            )
            .unwrap()
    }

    fn submission(solution: &str, price: f64, timeframe: &str) -> SubmitResponseRequest {
        SubmitResponseRequest {
            solution: solution.to_string(),
            price,
            timeframe: timeframe.to_string(),
            vendor_logo: None,
        }
    }

    #[test]
    fn publish_moves_draft_to_published_once() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);

        let published = publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();
        assert_eq!(published.status, RfqStatus::Published);

        let err = publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn only_owner_can_publish() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);

        let stranger = customer();
        let err = publish_rfq(&store, &LogNotifier, &stranger, rfq.id).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn edits_are_frozen_after_publish() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);
        publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();

        let err = update_rfq(
            &store,
            &owner,
            rfq.id,
            UpdateRfqRequest {
                companies: Some(vec!["Initech".to_string()]),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn evaluate_scores_sorts_and_completes() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);
        publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();

        submit_response(
            &store,
            &LogNotifier,
            &vendor("Acme"),
            rfq.id,
            submission("500TB storage included", 1000.0, "2 weeks"),
        )
        .unwrap();
        submit_response(
            &store,
            &LogNotifier,
            &vendor("Globex"),
            rfq.id,
            submission("nothing relevant", 2000.0, "2 months"),
        )
        .unwrap();

        let scored = evaluate_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].vendor_name, "Acme");
        assert!(scored.iter().all(|r| r.evaluation.is_some()));

        let stored = store.get_by_id(rfq.id).unwrap();
        assert_eq!(stored.status, RfqStatus::Completed);
        assert_eq!(stored.responses[0].vendor_name, "Acme");
    }

    #[test]
    fn evaluate_with_no_responses_fails_and_keeps_status() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);
        publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();

        let err = evaluate_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap_err();
        assert!(matches!(err, ApiError::NoResponses(_)));
        assert_eq!(store.get_by_id(rfq.id).unwrap().status, RfqStatus::Published);
    }

    #[test]
    fn re_evaluating_returns_stored_snapshot_unchanged() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);
        publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();
        submit_response(
            &store,
            &LogNotifier,
            &vendor("Acme"),
            rfq.id,
            submission("500TB storage", 1000.0, "2 weeks"),
        )
        .unwrap();

        let first = evaluate_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();
        let second = evaluate_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();

        assert_eq!(first.len(), second.len());
        let (a, b) = (
            first[0].evaluation.as_ref().unwrap(),
            second[0].evaluation.as_ref().unwrap(),
        );
        assert_eq!(a.total_score, b.total_score);
        assert_eq!(store.get_by_id(rfq.id).unwrap().status, RfqStatus::Completed);
    }

    #[test]
    fn creating_as_published_fires_the_publication_event() {
        let store = RfqStore::new(14);
        let owner = customer();
        let notifier = RecordingNotifier::default();

        let rfq = create_rfq(
            &store,
            &notifier,
            &owner,
            CreateRfqRequest {
                title: Some("Immediate".to_string()),
                description: None,
                segment: None,
                companies: Some(vec!["Acme".to_string()]),
                requirements: None,
                deadline: None,
                status: Some(RfqStatus::Published),
            },
        )
        .unwrap();

        assert_eq!(rfq.status, RfqStatus::Published);
        assert_eq!(notifier.published_count(), 1);
        let events = notifier.events.lock();
        match &events[0] {
            RfqEvent::RfqPublished { companies, .. } => {
                assert_eq!(companies, &vec!["Acme".to_string()]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn creating_a_draft_stays_silent_until_published() {
        let store = RfqStore::new(14);
        let owner = customer();
        let notifier = RecordingNotifier::default();

        let rfq = create_rfq(
            &store,
            &notifier,
            &owner,
            CreateRfqRequest {
                title: Some("Later".to_string()),
                description: None,
                segment: None,
                companies: None,
                requirements: None,
                deadline: None,
                status: None,
            },
        )
        .unwrap();
        assert_eq!(notifier.published_count(), 0);

        publish_rfq(&store, &notifier, &owner, rfq.id).unwrap();
        assert_eq!(notifier.published_count(), 1);
    }

    #[test]
    fn evaluated_event_fires_only_on_the_transition() {
        let store = RfqStore::new(14);
        let owner = customer();
        let notifier = RecordingNotifier::default();
        let rfq = draft_rfq(&store, &owner);
        publish_rfq(&store, &notifier, &owner, rfq.id).unwrap();
        submit_response(
            &store,
            &notifier,
            &vendor("Acme"),
            rfq.id,
            submission("500TB storage", 1000.0, "2 weeks"),
        )
        .unwrap();

        evaluate_rfq(&store, &notifier, &owner, rfq.id).unwrap();
        assert_eq!(notifier.evaluated_count(), 1);

        // Repeat calls return the snapshot without re-announcing it
        evaluate_rfq(&store, &notifier, &owner, rfq.id).unwrap();
        evaluate_rfq(&store, &notifier, &owner, rfq.id).unwrap();
        assert_eq!(notifier.evaluated_count(), 1);
    }

    #[test]
    fn concurrent_publish_and_update_keep_the_draft_freeze() {
        // The draft check and the merge share one lock; whenever the
        // update loses the race it must leave no trace on the record.
        for _ in 0..50 {
            let store = Arc::new(RfqStore::new(14));
            let owner = customer();
            let rfq = draft_rfq(&store, &owner);
            let rfq_id = rfq.id;

            let publisher = {
                let store = Arc::clone(&store);
                let owner = owner.clone();
                std::thread::spawn(move || publish_rfq(&store, &LogNotifier, &owner, rfq_id))
            };
            let editor = {
                let store = Arc::clone(&store);
                let owner = owner.clone();
                std::thread::spawn(move || {
                    update_rfq(
                        &store,
                        &owner,
                        rfq_id,
                        UpdateRfqRequest {
                            companies: Some(vec!["Initech".to_string()]),
                            ..Default::default()
                        },
                    )
                })
            };

            publisher.join().unwrap().unwrap();
            let update_result = editor.join().unwrap();

            let stored = store.get_by_id(rfq_id).unwrap();
            assert_eq!(stored.status, RfqStatus::Published);
            match update_result {
                // Edit won the race while still a draft
                Ok(_) => assert_eq!(stored.companies, vec!["Initech".to_string()]),
                // Edit lost: the published record is untouched
                Err(_) => assert_eq!(
                    stored.companies,
                    vec!["Acme".to_string(), "Globex".to_string()]
                ),
            }
        }
    }

    #[test]
    fn completed_rfq_rejects_new_responses() {
        let store = RfqStore::new(14);
        let owner = customer();
        let rfq = draft_rfq(&store, &owner);
        publish_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();
        submit_response(
            &store,
            &LogNotifier,
            &vendor("Acme"),
            rfq.id,
            submission("500TB storage", 1000.0, "2 weeks"),
        )
        .unwrap();
        evaluate_rfq(&store, &LogNotifier, &owner, rfq.id).unwrap();

        let err = submit_response(
            &store,
            &LogNotifier,
            &vendor("Globex"),
            rfq.id,
            submission("late offer", 500.0, "1 week"),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}

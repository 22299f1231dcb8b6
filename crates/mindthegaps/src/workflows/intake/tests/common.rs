use std::sync::{Arc, Mutex};

use axum::Router;
use serde_json::{json, Value};

use crate::workflows::intake::ports::{
    ArtifactStore, ArtifactStoreError, ContactStore, ContactStoreError, ContactUpdate,
    Notification, Notifier, NotifyError,
};
use crate::workflows::intake::{intake_router, GapScanService};
use crate::workflows::scan::PlanContent;
use crate::workflows::EngineThresholds;

pub(super) type MemoryService = GapScanService<MemoryContacts, MemoryArtifacts, MemoryNotifier>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryContacts>,
    Arc<MemoryArtifacts>,
    Arc<MemoryNotifier>,
) {
    let contacts = Arc::new(MemoryContacts::default());
    let artifacts = Arc::new(MemoryArtifacts::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = GapScanService::new(
        contacts.clone(),
        artifacts.clone(),
        notifier.clone(),
        EngineThresholds::default(),
    );
    (service, contacts, artifacts, notifier)
}

pub(super) fn router_with_service(service: MemoryService) -> Router {
    intake_router(Arc::new(service))
}

pub(super) fn quiz_payload() -> Value {
    json!({
        "email": "  Dana@Northside.Example ",
        "answers": {
            "lead_volume": "0-10",
            "lead_sources": "one source",
            "client_trend": "shrinking",
            "response_time": "same day",
            "close_rate": "6+ of 10",
            "quote_follow_up": "a set sequence",
            "repeat_revenue": "over 40%",
            "referral_frequency": "often",
            "post_service_contact": "on a schedule",
            "lost_lead_reason": "not the right fit"
        }
    })
}

pub(super) fn scan_payload() -> Value {
    json!({
        "confirmed_pillar": "Retention",
        "quiz_pillar": "Retention",
        "sub_path": "Rebook/recall gap",
        "lever": "Rebook/recall system (prompt + script + schedule)",
        "lever_sentence": "Every finished job leaves with the next visit booked.",
        "baseline": {
            "ret_pct_revenue_repeat": "21-40%",
            "ret_pct_revenue_referrals": "11-20%",
            "ret_rebook_scheduling": "Sometimes",
            "ret_reviews_per_month": "1-2",
            "ret_follow_up_time": "3-7 days",
            "ret_check_in_rhythm": "Yes (ad hoc)"
        },
        "actions": [
            "List recent customers",
            {"description": "Write the rebook script", "owner": "Dana", "due": "2026-03-06"},
            "Add a rebook prompt to close-out",
            "Call ten one-time customers",
            "Weekly rebook review",
            "Report rebook count on Fridays"
        ],
        "metrics": ["Rebook rate (or count)", "Reviews/week"],
        "constraints": ["Owner is on site most days"],
        "contact": {
            "email": "Dana@Northside.Example",
            "first_name": "Dana",
            "business_name": "Northside Plumbing",
            "prepared_on": "2026-03-02"
        }
    })
}

#[derive(Default)]
pub(super) struct MemoryContacts {
    updates: Mutex<Vec<ContactUpdate>>,
}

impl MemoryContacts {
    pub(super) fn updates(&self) -> Vec<ContactUpdate> {
        self.updates.lock().expect("contacts mutex poisoned").clone()
    }
}

impl ContactStore for MemoryContacts {
    fn upsert(&self, update: ContactUpdate) -> Result<(), ContactStoreError> {
        self.updates
            .lock()
            .expect("contacts mutex poisoned")
            .push(update);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryArtifacts {
    stored: Mutex<Vec<(String, PlanContent)>>,
}

impl MemoryArtifacts {
    pub(super) fn keys(&self) -> Vec<String> {
        self.stored
            .lock()
            .expect("artifacts mutex poisoned")
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl ArtifactStore for MemoryArtifacts {
    fn put(&self, plan: &PlanContent, hint: &str) -> Result<String, ArtifactStoreError> {
        let mut stored = self.stored.lock().expect("artifacts mutex poisoned");
        let key = format!("plans/{}-{}.json", hint, stored.len() + 1);
        stored.push((key.clone(), plan.clone()));
        Ok(key)
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct DownContacts;

impl ContactStore for DownContacts {
    fn upsert(&self, _update: ContactUpdate) -> Result<(), ContactStoreError> {
        Err(ContactStoreError::Unavailable("crm offline".to_string()))
    }
}

pub(super) struct DownArtifacts;

impl ArtifactStore for DownArtifacts {
    fn put(&self, _plan: &PlanContent, _hint: &str) -> Result<String, ArtifactStoreError> {
        Err(ArtifactStoreError::Unavailable("bucket offline".to_string()))
    }
}

pub(super) struct DownNotifier;

impl Notifier for DownNotifier {
    fn send(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp offline".to_string()))
    }
}

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use mindthegaps::workflows::intake::{
    ArtifactStore, ArtifactStoreError, ContactStore, ContactStoreError, ContactUpdate,
    Notification, Notifier, NotifyError,
};
use mindthegaps::workflows::scan::PlanContent;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Contact records merged field by field, keyed by normalized email.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContactStore {
    records: Arc<Mutex<HashMap<String, BTreeMap<String, String>>>>,
}

impl ContactStore for InMemoryContactStore {
    fn upsert(&self, update: ContactUpdate) -> Result<(), ContactStoreError> {
        if !update.email.contains('@') {
            return Err(ContactStoreError::Rejected(format!(
                "'{}' is not an email address",
                update.email
            )));
        }
        let mut guard = self
            .records
            .lock()
            .map_err(|_| ContactStoreError::Unavailable("contact store poisoned".to_string()))?;
        guard.entry(update.email).or_default().extend(update.fields);
        Ok(())
    }
}

impl InMemoryContactStore {
    #[cfg(test)]
    pub(crate) fn record(&self, email: &str) -> Option<BTreeMap<String, String>> {
        self.records
            .lock()
            .expect("contact mutex poisoned")
            .get(email)
            .cloned()
    }
}

static ARTIFACT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Default, Clone)]
pub(crate) struct InMemoryArtifactStore {
    plans: Arc<Mutex<HashMap<String, PlanContent>>>,
}

impl ArtifactStore for InMemoryArtifactStore {
    fn put(&self, plan: &PlanContent, hint: &str) -> Result<String, ArtifactStoreError> {
        let id = ARTIFACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let key = format!("plans/{hint}-{id:06}.json");
        self.plans
            .lock()
            .map_err(|_| ArtifactStoreError::Unavailable("artifact store poisoned".to_string()))?
            .insert(key.clone(), plan.clone());
        Ok(key)
    }
}

impl InMemoryArtifactStore {
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.plans.lock().expect("artifact mutex poisoned").len()
    }
}

/// Writes notifications to the log instead of a mail transport.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier for LoggingNotifier {
    fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            template = %notification.template,
            email = notification.email.as_deref().unwrap_or("-"),
            "notification queued"
        );
        self.sent
            .lock()
            .map_err(|_| NotifyError::Transport("notifier poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

impl LoggingNotifier {
    #[cfg(test)]
    pub(crate) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindthegaps::workflows::intake::{GapScanService, QuizSubmission};
    use mindthegaps::workflows::quiz::AnswerSet;
    use mindthegaps::workflows::EngineThresholds;

    #[test]
    fn contact_updates_merge_into_one_record() {
        let store = InMemoryContactStore::default();
        store
            .upsert(ContactUpdate::new("dana@northside.example").field("primary_gap", "Retention"))
            .expect("upsert");
        store
            .upsert(ContactUpdate::new("dana@northside.example").field("scan_status", "stopped"))
            .expect("upsert");

        let record = store.record("dana@northside.example").expect("record exists");
        assert_eq!(record["primary_gap"], "Retention");
        assert_eq!(record["scan_status"], "stopped");
    }

    #[test]
    fn contact_updates_need_an_address() {
        let store = InMemoryContactStore::default();
        let error = store
            .upsert(ContactUpdate::new("northside"))
            .expect_err("rejected");
        assert!(matches!(error, ContactStoreError::Rejected(_)));
    }

    #[test]
    fn service_wires_into_the_in_memory_collaborators() {
        let contacts = Arc::new(InMemoryContactStore::default());
        let service = GapScanService::new(
            contacts.clone(),
            Arc::new(InMemoryArtifactStore::default()),
            Arc::new(LoggingNotifier::default()),
            EngineThresholds::default(),
        );

        service.diagnose(&QuizSubmission {
            email: Some("Owner@Example.com".to_string()),
            answers: AnswerSet::new().with("lead_volume", "0-10"),
        });

        let record = contacts.record("owner@example.com").expect("record exists");
        assert_eq!(record["primary_gap"], "Acquisition");
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(
            parse_date(" 2026-03-02 "),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid"))
        );
        assert!(parse_date("03/02/2026").is_err());
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ports::{
    normalize_email, ArtifactStore, ContactStore, ContactUpdate, Notification, Notifier,
    ARTIFACT_KEY, BASELINE_SCORE, CONFIDENCE, ELIGIBILITY_REASON, ELIGIBLE, PLAN_READY,
    PRIMARY_GAP, SCAN_STATUS, SCAN_STOPPED, STOP_REASONS, SUB_DIAGNOSIS,
};
use crate::workflows::quiz::{AnswerSet, QuizEngine, QuizOutcome};
use crate::workflows::scan::{PlanContent, ScanEngine, ScanOutcome, ScanRecord};
use crate::workflows::{EngineThresholds, InputError};

/// Quiz answers plus the submitter they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSubmission {
    pub email: Option<String>,
    pub answers: AnswerSet,
}

impl QuizSubmission {
    /// Read `{ "email": ..., "answers": { ... } }`.
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let payload = match value {
            Value::Null => {
                return Err(InputError::Missing {
                    what: "quiz submission",
                })
            }
            Value::Object(payload) => payload,
            _ => {
                return Err(InputError::NotAnObject {
                    what: "quiz submission",
                })
            }
        };
        let answers = AnswerSet::from_value(payload.get("answers").unwrap_or(&Value::Null))?;
        let email = payload
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self { email, answers })
    }
}

/// Scan outcome plus where the plan was stored, if it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReceipt {
    pub outcome: ScanOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_key: Option<String>,
}

/// Runs both pipelines and hands results to the collaborators.
///
/// Collaborator failures are logged and absorbed: a CRM outage never changes
/// what the caller gets back.
pub struct GapScanService<C, A, N> {
    quiz: QuizEngine,
    scan: ScanEngine,
    contacts: Arc<C>,
    artifacts: Arc<A>,
    notifier: Arc<N>,
}

impl<C, A, N> GapScanService<C, A, N>
where
    C: ContactStore + 'static,
    A: ArtifactStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        contacts: Arc<C>,
        artifacts: Arc<A>,
        notifier: Arc<N>,
        thresholds: EngineThresholds,
    ) -> Self {
        Self {
            quiz: QuizEngine::new(thresholds.clone()),
            scan: ScanEngine::new(thresholds),
            contacts,
            artifacts,
            notifier,
        }
    }

    pub fn quiz_engine(&self) -> &QuizEngine {
        &self.quiz
    }

    pub fn scan_engine(&self) -> &ScanEngine {
        &self.scan
    }

    /// Score, diagnose and gate a quiz submission, then record it on the contact.
    pub fn diagnose(&self, submission: &QuizSubmission) -> QuizOutcome {
        let outcome = self.quiz.run(&submission.answers);
        info!(
            primary_gap = %outcome.scoring.primary_gap,
            eligible = outcome.eligibility.eligible,
            "quiz diagnosed"
        );

        if let Some(email) = submission.email.as_deref().and_then(normalize_email) {
            let mut update = ContactUpdate::new(email)
                .field(PRIMARY_GAP, outcome.scoring.primary_gap.label())
                .field(BASELINE_SCORE, outcome.scoring.baseline_score.to_string())
                .field(ELIGIBLE, outcome.eligibility.eligible.to_string());
            if let Some(sub) = &outcome.diagnosis.sub_diagnosis {
                update = update.field(SUB_DIAGNOSIS, sub.name);
            }
            if let Some(reason) = outcome.eligibility.reason {
                update = update.field(ELIGIBILITY_REASON, reason);
            }
            self.record_contact(update);
        } else {
            debug!("quiz submission has no email; contact not recorded");
        }

        outcome
    }

    pub fn diagnose_value(&self, value: &Value) -> Result<QuizOutcome, ServiceError> {
        let submission = QuizSubmission::from_value(value)?;
        Ok(self.diagnose(&submission))
    }

    /// Gate and, when clear, build and store the plan for a scan worksheet.
    pub fn plan(&self, record: &ScanRecord) -> ScanReceipt {
        let outcome = self.scan.run(record);
        let email = record.contact.email.as_deref().and_then(normalize_email);

        let artifact_key = match &outcome {
            ScanOutcome::Stopped { stop } => {
                let reasons = stop.reasons.join("; ");
                if let Some(email) = &email {
                    self.record_contact(
                        ContactUpdate::new(email.clone())
                            .field(SCAN_STATUS, "stopped")
                            .field(STOP_REASONS, reasons.clone()),
                    );
                }
                self.notify(Notification {
                    template: SCAN_STOPPED.to_string(),
                    email: email.clone(),
                    details: [(STOP_REASONS.to_string(), reasons)].into(),
                });
                None
            }
            ScanOutcome::Ready {
                confidence, plan, ..
            } => {
                let key = self.store_plan(plan, email.as_deref());
                if let Some(email) = &email {
                    let mut update = ContactUpdate::new(email.clone())
                        .field(SCAN_STATUS, "plan_ready")
                        .field(CONFIDENCE, confidence.grade.label());
                    if let Some(key) = &key {
                        update = update.field(ARTIFACT_KEY, key.clone());
                    }
                    self.record_contact(update);
                }
                let mut details = BTreeMap::new();
                details.insert(PRIMARY_GAP.to_string(), plan.pillar.label().to_string());
                details.insert(CONFIDENCE.to_string(), confidence.grade.label().to_string());
                if let Some(key) = &key {
                    details.insert(ARTIFACT_KEY.to_string(), key.clone());
                }
                self.notify(Notification {
                    template: PLAN_READY.to_string(),
                    email: email.clone(),
                    details,
                });
                key
            }
        };

        ScanReceipt {
            outcome,
            artifact_key,
        }
    }

    pub fn plan_value(&self, value: &Value) -> Result<ScanReceipt, ServiceError> {
        let record = ScanRecord::from_value(value)?;
        Ok(self.plan(&record))
    }

    fn store_plan(&self, plan: &PlanContent, email: Option<&str>) -> Option<String> {
        let hint = format!(
            "{}-{}",
            plan.pillar.label().to_ascii_lowercase(),
            email.unwrap_or("anonymous")
        );
        match self.artifacts.put(plan, &hint) {
            Ok(key) => {
                debug!(%key, "plan stored");
                Some(key)
            }
            Err(error) => {
                warn!(%error, "plan storage failed");
                None
            }
        }
    }

    fn record_contact(&self, update: ContactUpdate) {
        if let Err(error) = self.contacts.upsert(update) {
            warn!(%error, "contact upsert failed");
        }
    }

    fn notify(&self, notification: Notification) {
        let template = notification.template.clone();
        if let Err(error) = self.notifier.send(notification) {
            warn!(%error, %template, "notification failed");
        }
    }
}

/// Error raised by the intake service. Only invalid input surfaces.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::scan::PlanContent;

/// Contact record write keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub email: String,
    pub fields: BTreeMap<String, String>,
}

impl ContactUpdate {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// Upsert-by-identity store for contact records (a CRM in production).
pub trait ContactStore: Send + Sync {
    fn upsert(&self, update: ContactUpdate) -> Result<(), ContactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContactStoreError {
    #[error("contact rejected: {0}")]
    Rejected(String),
    #[error("contact store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for rendered plan content; returns an addressable key.
pub trait ArtifactStore: Send + Sync {
    fn put(&self, plan: &PlanContent, hint: &str) -> Result<String, ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("artifact store unavailable: {0}")]
    Unavailable(String),
}

/// One-way message to the consultant team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub details: BTreeMap<String, String>,
}

pub trait Notifier: Send + Sync {
    fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Trimmed, lowercased email; `None` when nothing is left.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim();
    (!email.is_empty()).then(|| email.to_ascii_lowercase())
}

// Contact record field keys.
pub const PRIMARY_GAP: &str = "primary_gap";
pub const BASELINE_SCORE: &str = "baseline_score";
pub const SUB_DIAGNOSIS: &str = "sub_diagnosis";
pub const ELIGIBLE: &str = "eligible";
pub const ELIGIBILITY_REASON: &str = "eligibility_reason";
pub const SCAN_STATUS: &str = "scan_status";
pub const STOP_REASONS: &str = "stop_reasons";
pub const CONFIDENCE: &str = "confidence";
pub const ARTIFACT_KEY: &str = "artifact_key";

// Notification templates.
pub const SCAN_STOPPED: &str = "scan_stopped";
pub const PLAN_READY: &str = "plan_ready";

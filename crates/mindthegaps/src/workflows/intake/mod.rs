//! Intake layer: the service facade that runs both pipelines and hands their
//! results to the contact store, artifact store and notifier.

pub mod ports;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use ports::{
    normalize_email, ArtifactStore, ArtifactStoreError, ContactStore, ContactStoreError,
    ContactUpdate, Notification, Notifier, NotifyError,
};
pub use router::intake_router;
pub use service::{GapScanService, QuizSubmission, ScanReceipt, ServiceError};

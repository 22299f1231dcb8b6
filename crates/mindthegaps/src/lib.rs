//! Growth-gap diagnosis and plan engine.
//!
//! The quiz pipeline scores a questionnaire into a primary growth gap, picks a
//! sub-diagnosis and decides whether the paid scan is worth offering. The scan
//! pipeline gates a consultant's worksheet, grades how complete its numbers are
//! and assembles the 30-day plan document handed to rendering.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

use chrono::NaiveDate;
use clap::Args;
use mindthegaps::config::AppConfig;
use mindthegaps::error::AppError;
use mindthegaps::workflows::quiz::QuizEngine;
use mindthegaps::workflows::scan::{ScanEngine, ScanRecord};
use mindthegaps::workflows::EngineThresholds;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct QuizFileArgs {
    /// JSON file holding the answer object, bare or under an "answers" key
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ScanFileArgs {
    /// JSON file holding the scan worksheet
    pub(crate) path: PathBuf,
    /// Plan preparation date (YYYY-MM-DD); overrides the worksheet's contact date
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) prepared_on: Option<NaiveDate>,
}

pub(crate) fn run_quiz(args: QuizFileArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let payload = read_payload(&args.path)?;
    println!("{}", quiz_report(&payload, config.thresholds)?);
    Ok(())
}

pub(crate) fn run_scan(args: ScanFileArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let payload = read_payload(&args.path)?;
    println!(
        "{}",
        scan_report(&payload, config.thresholds, args.prepared_on)?
    );
    Ok(())
}

fn read_payload(path: &Path) -> Result<Value, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn quiz_report(payload: &Value, thresholds: EngineThresholds) -> Result<String, AppError> {
    let answers = payload
        .get("answers")
        .filter(|answers| answers.is_object())
        .unwrap_or(payload);
    let outcome = QuizEngine::new(thresholds).run_value(answers)?;
    Ok(serde_json::to_string_pretty(&outcome)?)
}

fn scan_report(
    payload: &Value,
    thresholds: EngineThresholds,
    prepared_on: Option<NaiveDate>,
) -> Result<String, AppError> {
    let mut record = ScanRecord::from_value(payload)?;
    if prepared_on.is_some() {
        record.contact.prepared_on = prepared_on;
    }
    let outcome = ScanEngine::new(thresholds).run(&record);
    Ok(serde_json::to_string_pretty(&outcome)?)
}

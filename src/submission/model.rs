use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The gateway's acknowledgment of an accepted job.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct Confirmation {
    pub job_id: String,
    pub created_at: String,
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("submission rejected by gateway: {0}")]
    Gateway(String),
}

/// Read-only, human-readable projection of a submitted configuration and
/// its confirmation. Derives everything; mutates nothing.
#[derive(Serialize, Clone, Debug)]
pub struct JobSummary {
    pub job_id: String,
    pub created_at: String,
    pub platform: String,
    pub environment: String,
    pub suite: String,
    pub release_version: String,
    pub build: String,
    pub execution_type: String,
    pub custom_script: String,
    pub device_farm: String,
    pub os_comparison: String,
    pub devices: Vec<String>,
    pub test_case_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_favorite: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ScheduleSummary {
    pub start_date: String,
    pub end_date: String,
    pub trigger_time: String,
    pub frequency: String,
    pub days: String,
    pub upcoming_runs: Vec<String>,
}

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::api::AppError;
use crate::catalog::service::CatalogService;
use crate::config::model::RunConfig;
use crate::schedule::preview::render_preview;
use crate::session::model::{StepKind, SubmissionStatus, WizardSession};
use crate::session::service::step_complete;
use crate::submission::model::{Confirmation, JobSummary, ScheduleSummary, SubmissionError};

/// Boundary to the external execution system. Object-safe so the
/// application can hold it as `Arc<dyn SubmissionGateway>` and tests can
/// substitute their own.
pub trait SubmissionGateway: Send + Sync {
    fn submit_job(
        &self,
        config: &RunConfig,
    ) -> BoxFuture<'static, Result<Confirmation, SubmissionError>>;
}

/// Reference gateway: acknowledges every job after a fixed delay.
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        SimulatedGateway {
            delay: Duration::from_millis(1000),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        SimulatedGateway { delay }
    }
}

impl SubmissionGateway for SimulatedGateway {
    fn submit_job(
        &self,
        _config: &RunConfig,
    ) -> BoxFuture<'static, Result<Confirmation, SubmissionError>> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            let raw = Uuid::new_v4().simple().to_string();
            Ok(Confirmation {
                job_id: format!("JOB-{}", &raw[..12]),
                created_at: Utc::now().to_rfc3339(),
            })
        })
    }
}

/// Submit a session's finalized configuration. The session sits in a
/// `Submitting` state while the acknowledgment is pending, which blocks
/// re-entrant submission and step transitions; on failure it returns to
/// `Idle` with the in-progress configuration intact.
pub async fn submit_session(
    sessions: &RwLock<HashMap<String, WizardSession>>,
    gateway: &dyn SubmissionGateway,
    session_id: &str,
) -> Result<Confirmation, AppError> {
    let config = {
        let mut guard = sessions.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        if session.is_submitting() {
            return Err(AppError::Processing(
                SubmissionError::AlreadySubmitting.to_string(),
            ));
        }
        // only the terminal step may submit; earlier steps still have
        // unguarded inputs
        if session.current_step < session.steps().len() as u32 {
            return Err(AppError::Validation(
                "The wizard has not reached the confirmation step yet".to_string(),
            ));
        }
        if !step_complete(&session.config, StepKind::Confirmation) {
            return Err(AppError::Validation(
                "A favorite name is required to save this job as a favorite".to_string(),
            ));
        }
        session.submission_status = SubmissionStatus::Submitting;
        session.config.clone()
    };

    info!(
        "submitting job for session {}: platform={}, suite={}",
        session_id, config.platform, config.suite
    );
    let result = gateway.submit_job(&config).await;

    let mut guard = sessions.write().await;
    match result {
        Ok(confirmation) => {
            info!("job {} accepted for session {}", confirmation.job_id, session_id);
            if let Some(session) = guard.get_mut(session_id) {
                session.submission_status = SubmissionStatus::Submitted {
                    confirmation: confirmation.clone(),
                };
            }
            Ok(confirmation)
        }
        Err(err) => {
            if let Some(session) = guard.get_mut(session_id) {
                session.submission_status = SubmissionStatus::Idle;
            }
            Err(AppError::Processing(err.to_string()))
        }
    }
}

/// Project a submitted session into its operator-facing summary.
pub fn build_summary(
    session: &WizardSession,
    catalog: &CatalogService,
) -> Result<JobSummary, AppError> {
    let confirmation = match &session.submission_status {
        SubmissionStatus::Submitted { confirmation } => confirmation,
        _ => {
            return Err(AppError::Validation(
                "No submission to summarize yet".to_string(),
            ))
        }
    };
    let config = &session.config;

    let schedule = config.schedule_config.as_ref().and_then(|schedule| {
        if config.execution_type != crate::config::model::ExecutionType::Schedule {
            return None;
        }
        let days = if !schedule.repeat_frequency.uses_days_of_week() {
            "Not applicable (one-time job)".to_string()
        } else if schedule.days_of_week.is_empty() {
            "All days".to_string()
        } else {
            schedule
                .days_of_week
                .iter()
                .map(|day| day.chars().take(3).collect::<String>())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Some(ScheduleSummary {
            start_date: schedule.from_date.clone(),
            end_date: if schedule.has_end_date() {
                schedule.end_date.clone()
            } else {
                "No end date".to_string()
            },
            trigger_time: schedule.trigger_time.clone(),
            frequency: schedule.repeat_frequency.label().to_string(),
            days,
            upcoming_runs: render_preview(schedule).runs,
        })
    });

    Ok(JobSummary {
        job_id: confirmation.job_id.clone(),
        created_at: confirmation.created_at.clone(),
        platform: catalog.platform_label(&config.platform),
        environment: config.environment.clone(),
        suite: catalog.suite_label(&config.platform, &config.environment, &config.suite),
        release_version: config.release_version.clone(),
        build: config.build.clone(),
        execution_type: config.execution_type.label().to_string(),
        custom_script: config.custom_script.clone(),
        device_farm: config.device_farm.clone(),
        os_comparison: format!(
            "{} {}",
            catalog.comparison_label(&config.comparison_type),
            catalog.os_version_label(&config.os_version)
        ),
        devices: config
            .device_list
            .iter()
            .map(|device| catalog.device_label(device))
            .collect(),
        test_case_count: config
            .test_suite_config
            .as_ref()
            .map(|suite| suite.selected_test_cases().len())
            .unwrap_or(0),
        schedule,
        saved_favorite: config
            .save_as_favorite
            .then(|| config.favorite_name.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ExecutionType;
    use crate::config::patch::ConfigPatch;
    use crate::identity::SequenceIdentityGenerator;
    use crate::schedule::model::{RepeatFrequency, ScheduleConfig};

    struct FailingGateway;

    impl SubmissionGateway for FailingGateway {
        fn submit_job(
            &self,
            _config: &RunConfig,
        ) -> BoxFuture<'static, Result<Confirmation, SubmissionError>> {
            Box::pin(async { Err(SubmissionError::Gateway("queue unavailable".to_string())) })
        }
    }

    fn sessions_with(session: WizardSession) -> RwLock<HashMap<String, WizardSession>> {
        let mut map = HashMap::new();
        map.insert(session.id.clone(), session);
        RwLock::new(map)
    }

    /// The full run-now scenario: iPhone / Sit1 / 25.10_BalGen / stable /
    /// 25.10.0 with one device reaches Confirmation at step 3 and submits
    /// successfully.
    #[tokio::test]
    async fn run_now_wizard_submits_end_to_end() {
        let mut session = WizardSession::new();
        session
            .apply_patch(ConfigPatch {
                platform: Some("iPhone".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        session
            .apply_patch(ConfigPatch {
                environment: Some("Sit1".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        session
            .apply_patch(ConfigPatch {
                suite: Some("25.10_BalGen".to_string()),
                build: Some("stable".to_string()),
                release_version: Some("25.10.0".to_string()),
                device_list: Some(vec!["iphone-15-pro".to_string()]),
                ..ConfigPatch::default()
            })
            .unwrap();

        assert_eq!(session.advance().unwrap(), 2);
        assert_eq!(session.advance().unwrap(), 3);
        assert_eq!(session.current_step_kind(), StepKind::Confirmation);

        let id = session.id.clone();
        let sessions = sessions_with(session);
        let gateway = SimulatedGateway::with_delay(Duration::from_millis(0));
        let confirmation = submit_session(&sessions, &gateway, &id).await.unwrap();

        assert!(!confirmation.job_id.is_empty());
        assert!(confirmation.job_id.starts_with("JOB-"));
        let guard = sessions.read().await;
        assert!(matches!(
            guard[&id].submission_status,
            SubmissionStatus::Submitted { .. }
        ));
    }

    #[tokio::test]
    async fn a_pending_submission_rejects_a_second_one() {
        let mut session = WizardSession::new();
        session.submission_status = SubmissionStatus::Submitting;
        let id = session.id.clone();
        let sessions = sessions_with(session);
        let gateway = SimulatedGateway::with_delay(Duration::from_millis(0));

        let result = submit_session(&sessions, &gateway, &id).await;
        assert!(matches!(result, Err(AppError::Processing(_))));
    }

    #[tokio::test]
    async fn submitting_before_the_confirmation_step_is_rejected() {
        let session = WizardSession::new();
        let id = session.id.clone();
        let sessions = sessions_with(session);
        let gateway = SimulatedGateway::with_delay(Duration::from_millis(0));

        // a fresh step-1 session with an empty config must not reach the
        // gateway
        let result = submit_session(&sessions, &gateway, &id).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        let guard = sessions.read().await;
        assert_eq!(guard[&id].submission_status, SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn an_unsaved_favorite_name_blocks_submission() {
        let mut session = WizardSession::new();
        session.current_step = 3;
        session.config.save_as_favorite = true;
        let id = session.id.clone();
        let sessions = sessions_with(session);
        let gateway = SimulatedGateway::with_delay(Duration::from_millis(0));

        let result = submit_session(&sessions, &gateway, &id).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn gateway_failure_returns_the_session_to_idle_with_config_intact() {
        let mut session = WizardSession::new();
        session.current_step = 3;
        session.config.platform = "iPhone".to_string();
        let id = session.id.clone();
        let sessions = sessions_with(session);

        let result = submit_session(&sessions, &FailingGateway, &id).await;
        assert!(matches!(result, Err(AppError::Processing(_))));

        let guard = sessions.read().await;
        assert_eq!(guard[&id].submission_status, SubmissionStatus::Idle);
        assert_eq!(guard[&id].config.platform, "iPhone");
    }

    #[tokio::test]
    async fn unknown_sessions_cannot_submit() {
        let sessions = RwLock::new(HashMap::new());
        let gateway = SimulatedGateway::with_delay(Duration::from_millis(0));
        let result = submit_session(&sessions, &gateway, "ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn summary_projects_labels_schedule_and_favorite() {
        let catalog = CatalogService::new();
        let identities = SequenceIdentityGenerator::new();
        let mut session = WizardSession::new();
        session
            .apply_patch(ConfigPatch {
                platform: Some("AndroidTablet".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        session
            .apply_patch(ConfigPatch {
                environment: Some("Sit1".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        session
            .apply_patch(ConfigPatch {
                suite: Some("25.10_BalGen".to_string()),
                release_version: Some("25.10.0".to_string()),
                build: Some("stable".to_string()),
                execution_type: Some(ExecutionType::Schedule),
                device_list: Some(vec!["galaxy-s24".to_string()]),
                schedule_config: Some(ScheduleConfig {
                    from_date: "2024-01-15".to_string(),
                    trigger_time: "09:00".to_string(),
                    repeat_frequency: RepeatFrequency::Weekly,
                    days_of_week: vec!["monday".to_string(), "friday".to_string()],
                    ..ScheduleConfig::default()
                }),
                save_as_favorite: Some(true),
                favorite_name: Some("weekly balgen".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        session.begin_selection(&catalog, &identities).unwrap();
        session.complete_selection(&catalog).unwrap();
        session.submission_status = SubmissionStatus::Submitted {
            confirmation: Confirmation {
                job_id: "JOB-cafebabe".to_string(),
                created_at: "2024-01-10T12:00:00Z".to_string(),
            },
        };

        let summary = build_summary(&session, &catalog).unwrap();
        assert_eq!(summary.platform, "Android Tablet");
        assert_eq!(summary.execution_type, "Scheduled Job");
        assert_eq!(summary.devices, vec!["Samsung Galaxy S24"]);
        assert_eq!(summary.os_comparison, "equals to iOS 17.x");
        assert_eq!(summary.test_case_count, 5);
        assert_eq!(summary.saved_favorite.as_deref(), Some("weekly balgen"));

        let schedule = summary.schedule.unwrap();
        assert_eq!(schedule.end_date, "No end date");
        assert_eq!(schedule.frequency, "Weekly");
        assert_eq!(schedule.days, "mon, fri");
        assert_eq!(schedule.upcoming_runs.len(), 5);
    }

    #[test]
    fn summary_requires_a_submitted_session() {
        let catalog = CatalogService::new();
        let session = WizardSession::new();
        assert!(matches!(
            build_summary(&session, &catalog),
            Err(AppError::Validation(_))
        ));
    }
}

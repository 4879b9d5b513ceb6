use serde::Serialize;
use uuid::Uuid;

use crate::config::model::RunConfig;
use crate::submission::model::Confirmation;
use crate::suite::model::SuiteSelection;

#[derive(Serialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepKind {
    CoreConfig,
    AdvancedOptions,
    ScheduleConfig,
    Confirmation,
}

impl StepKind {
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::CoreConfig => "Core Config",
            StepKind::AdvancedOptions => "Advanced Options",
            StepKind::ScheduleConfig => "Schedule Config",
            StepKind::Confirmation => "Confirmation",
        }
    }
}

/// One visible step with its contiguous display number. Derived from the
/// execution type on demand, never stored.
#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
pub struct StepInfo {
    pub kind: StepKind,
    pub name: &'static str,
    pub display_number: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Submitted { confirmation: Confirmation },
}

/// One operator's in-progress wizard: the run configuration being
/// assembled, the current step, the suite-selection sub-flow, and the
/// submission state. Exclusively owned; discarded on close.
#[derive(Serialize, Clone, Debug)]
pub struct WizardSession {
    pub id: String,
    pub config: RunConfig,
    pub current_step: u32,
    pub submission_status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SuiteSelection>,
}

impl WizardSession {
    pub fn new() -> Self {
        WizardSession {
            id: Uuid::new_v4().to_string(),
            config: RunConfig::default(),
            current_step: 1,
            submission_status: SubmissionStatus::Idle,
            selection: None,
        }
    }

    /// "Create another": back to step 1 with fresh defaults. The session id
    /// survives; everything else is discarded.
    pub fn reset(&mut self) {
        self.config = RunConfig::default();
        self.current_step = 1;
        self.submission_status = SubmissionStatus::Idle;
        self.selection = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submission_status == SubmissionStatus::Submitting
    }
}

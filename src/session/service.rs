use crate::api::AppError;
use crate::catalog::service::CatalogService;
use crate::config::model::{ExecutionType, RunConfig};
use crate::config::patch::ConfigPatch;
use crate::identity::IdentityGenerator;
use crate::session::model::{StepInfo, StepKind, WizardSession};
use crate::suite::model::{SuiteSelection, CUSTOM_SUITE_ID};

/// Pure function from execution type to the visible, contiguously
/// renumbered step sequence. Schedule Config only exists for scheduled
/// jobs.
pub fn visible_steps(execution_type: ExecutionType) -> Vec<StepInfo> {
    let kinds: &[StepKind] = match execution_type {
        ExecutionType::Schedule => &[
            StepKind::CoreConfig,
            StepKind::AdvancedOptions,
            StepKind::ScheduleConfig,
            StepKind::Confirmation,
        ],
        ExecutionType::RunNow => &[
            StepKind::CoreConfig,
            StepKind::AdvancedOptions,
            StepKind::Confirmation,
        ],
    };
    kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| StepInfo {
            kind: *kind,
            name: kind.name(),
            display_number: index as u32 + 1,
        })
        .collect()
}

/// Per-step guard predicate: whether the step's required inputs are
/// complete. The disabled "next" affordance is the only signal a failed
/// guard produces.
pub fn step_complete(config: &RunConfig, kind: StepKind) -> bool {
    match kind {
        StepKind::CoreConfig => {
            !config.platform.is_empty()
                && !config.environment.is_empty()
                && !config.suite.is_empty()
                && !config.release_version.is_empty()
                && !config.build.is_empty()
        }
        StepKind::AdvancedOptions => !config.device_list.is_empty(),
        StepKind::ScheduleConfig => config
            .schedule_config
            .as_ref()
            .map(|schedule| !schedule.from_date.is_empty() && !schedule.trigger_time.is_empty())
            .unwrap_or(false),
        StepKind::Confirmation => !config.save_as_favorite || !config.favorite_name.is_empty(),
    }
}

impl WizardSession {
    pub fn steps(&self) -> Vec<StepInfo> {
        visible_steps(self.config.execution_type)
    }

    pub fn current_step_kind(&self) -> StepKind {
        let steps = self.steps();
        let index = (self.current_step as usize - 1).min(steps.len() - 1);
        steps[index].kind
    }

    /// Progress through the visible steps, as a percentage.
    pub fn progress(&self) -> f64 {
        let steps = self.steps();
        let index = (self.current_step as usize - 1).min(steps.len() - 1);
        (index + 1) as f64 / steps.len() as f64 * 100.0
    }

    /// Move to the next visible step. No-op at the last step; rejected
    /// when the current step's guard fails or a submission is pending.
    pub fn advance(&mut self) -> Result<u32, AppError> {
        self.reject_while_submitting()?;
        let steps = self.steps();
        if self.current_step >= steps.len() as u32 {
            return Ok(self.current_step);
        }
        let kind = self.current_step_kind();
        if !step_complete(&self.config, kind) {
            return Err(AppError::Validation(format!(
                "{} step is incomplete",
                kind.name()
            )));
        }
        self.current_step += 1;
        Ok(self.current_step)
    }

    /// Move to the previous step. No-op at step 1.
    pub fn retreat(&mut self) -> Result<u32, AppError> {
        self.reject_while_submitting()?;
        if self.current_step > 1 {
            self.current_step -= 1;
        }
        Ok(self.current_step)
    }

    /// Merge a partial update into the configuration. Switching execution
    /// type does not revalidate already-entered data; it only changes
    /// which steps are reachable going forward, so the current position is
    /// clamped to the (possibly shorter) visible sequence.
    pub fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), AppError> {
        self.reject_while_submitting()?;
        patch.apply(&mut self.config);
        let total = self.steps().len() as u32;
        if self.current_step > total {
            self.current_step = total;
        }
        Ok(())
    }

    /// Enter the suite-selection sub-flow: the reserved `custom` suite id
    /// opens the custom builder, any other id resolves a premade suite.
    pub fn begin_selection(
        &mut self,
        catalog: &CatalogService,
        identities: &dyn IdentityGenerator,
    ) -> Result<(), AppError> {
        self.reject_while_submitting()?;
        if self.config.suite.is_empty() {
            return Err(AppError::Validation(
                "No test suite selected yet".to_string(),
            ));
        }
        if self.config.suite == CUSTOM_SUITE_ID {
            self.selection = Some(SuiteSelection::custom());
            return Ok(());
        }
        let suite = catalog.premade_suite(&self.config.suite).ok_or_else(|| {
            AppError::NotFound(format!("Premade suite {} not found", self.config.suite))
        })?;
        self.selection = Some(SuiteSelection::premade(suite, identities));
        Ok(())
    }

    pub fn selection_mut(&mut self) -> Result<&mut SuiteSelection, AppError> {
        self.selection.as_mut().ok_or_else(|| {
            AppError::Validation("No test selection in progress".to_string())
        })
    }

    /// Finalize the sub-flow and merge the resulting suite configuration
    /// into the run configuration.
    pub fn complete_selection(&mut self, catalog: &CatalogService) -> Result<(), AppError> {
        let selection = self.selection.take().ok_or_else(|| {
            AppError::Validation("No test selection in progress".to_string())
        })?;
        self.config.test_suite_config = Some(selection.into_config(catalog));
        Ok(())
    }

    fn reject_while_submitting(&self) -> Result<(), AppError> {
        if self.is_submitting() {
            return Err(AppError::Processing(
                "A submission is in progress".to_string(),
            ));
        }
        Ok(())
    }
}

use std::collections::BTreeMap;

use crate::api::AppError;
use crate::catalog::model::{PremadeSuite, TestCase, TestModule};
use crate::catalog::service::CatalogService;
use crate::config::model::{SelectedTestCase, TestSuiteConfig};
use crate::identity::IdentityGenerator;
use crate::suite::model::{ModulePage, SelectionMode, SuiteSelection, MODULES_PER_PAGE};

impl SuiteSelection {
    /// Premade mode: every test case of the suite's modules starts
    /// selected, against its full supported-app set, with a fresh user id
    /// per app.
    pub fn premade(suite: &PremadeSuite, identities: &dyn IdentityGenerator) -> Self {
        SuiteSelection {
            mode: SelectionMode::Premade {
                suite_id: suite.id.clone(),
            },
            selected: suite
                .test_cases()
                .map(|case| select_all_apps(case, identities))
                .collect(),
        }
    }

    /// Custom mode starts empty; cases are added explicitly.
    pub fn custom() -> Self {
        SuiteSelection {
            mode: SelectionMode::Custom,
            selected: vec![],
        }
    }

    pub fn is_selected(&self, test_case_id: &str) -> bool {
        self.selected.iter().any(|s| s.test_case_id == test_case_id)
    }

    /// Toggle a whole test case in or out. Re-selecting a case brings back
    /// its full supported-app set with fresh user ids, not any prior
    /// partial selection.
    pub fn toggle_case(&mut self, case: &TestCase, identities: &dyn IdentityGenerator) {
        if self.is_selected(&case.id) {
            self.selected.retain(|s| s.test_case_id != case.id);
        } else {
            self.selected.push(select_all_apps(case, identities));
        }
    }

    /// Idempotent: adding an already-selected case is a no-op.
    pub fn add_case(&mut self, case: &TestCase, identities: &dyn IdentityGenerator) {
        if !self.is_selected(&case.id) {
            self.selected.push(select_all_apps(case, identities));
        }
    }

    pub fn remove_case(&mut self, test_case_id: &str) {
        self.selected.retain(|s| s.test_case_id != test_case_id);
    }

    /// Toggle one app within a selected test case. Toggling an app out
    /// deletes its user-id entry; toggling it in allocates a fresh one.
    pub fn toggle_app(
        &mut self,
        case: &TestCase,
        app_id: &str,
        identities: &dyn IdentityGenerator,
    ) -> Result<(), AppError> {
        let selected = self
            .selected
            .iter_mut()
            .find(|s| s.test_case_id == case.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Test case {} is not selected", case.id))
            })?;

        if selected.selected_apps.iter().any(|a| a == app_id) {
            selected.selected_apps.retain(|a| a != app_id);
            selected.user_ids.remove(app_id);
            return Ok(());
        }

        if !case.supported_apps.iter().any(|a| a == app_id) {
            return Err(AppError::Validation(format!(
                "App {} is not supported by test case {}",
                app_id, case.id
            )));
        }
        selected.selected_apps.push(app_id.to_string());
        selected
            .user_ids
            .insert(app_id.to_string(), identities.next_user_id());
        Ok(())
    }

    /// Finalize the sub-flow into the tagged config merged back into the
    /// run configuration. Custom mode snapshots the full module catalog it
    /// was built from.
    pub fn into_config(self, catalog: &CatalogService) -> TestSuiteConfig {
        match self.mode {
            SelectionMode::Premade { suite_id } => TestSuiteConfig::Premade {
                premade_id: suite_id,
                selected_test_cases: self.selected,
            },
            SelectionMode::Custom => TestSuiteConfig::Custom {
                modules: catalog.modules().to_vec(),
                selected_test_cases: self.selected,
            },
        }
    }
}

fn select_all_apps(case: &TestCase, identities: &dyn IdentityGenerator) -> SelectedTestCase {
    let mut user_ids = BTreeMap::new();
    for app in &case.supported_apps {
        user_ids.insert(app.clone(), identities.next_user_id());
    }
    SelectedTestCase {
        test_case_id: case.id.clone(),
        selected_apps: case.supported_apps.clone(),
        user_ids,
    }
}

/// Case-insensitive substring search over module name/description and test
/// case name/description. Matching modules are returned whole, paginated
/// for display.
pub fn search_modules(catalog: &CatalogService, term: &str, page: usize) -> ModulePage {
    let needle = term.to_lowercase();
    let filtered: Vec<&TestModule> = catalog
        .modules()
        .iter()
        .filter(|module| needle.is_empty() || module_matches(module, &needle))
        .collect();

    let total_cases = filtered.iter().map(|m| m.test_cases.len()).sum();
    let total_pages = filtered.len().div_ceil(MODULES_PER_PAGE);
    let page = page.max(1);
    // page arrives straight from the query string, so it can be anything
    let start = page.saturating_sub(1).saturating_mul(MODULES_PER_PAGE);
    let modules = filtered
        .into_iter()
        .skip(start)
        .take(MODULES_PER_PAGE)
        .cloned()
        .collect();

    ModulePage {
        modules,
        page,
        total_pages,
        total_cases,
    }
}

fn module_matches(module: &TestModule, needle: &str) -> bool {
    module.name.to_lowercase().contains(needle)
        || module.description.to_lowercase().contains(needle)
        || module.test_cases.iter().any(|case| {
            case.name.to_lowercase().contains(needle)
                || case.description.to_lowercase().contains(needle)
        })
}

use serde::{Deserialize, Serialize};

use crate::catalog::model::TestModule;
use crate::config::model::SelectedTestCase;

/// Reserved suite identifier that switches the wizard into the custom
/// test-suite builder instead of a premade suite.
pub const CUSTOM_SUITE_ID: &str = "custom";

/// Modules shown per page in the custom builder. Pagination is display
/// only; search always filters the full catalog.
pub const MODULES_PER_PAGE: usize = 10;

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SelectionMode {
    Premade { suite_id: String },
    Custom,
}

/// The in-progress test selection sub-flow of the suite-selection step.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct SuiteSelection {
    pub mode: SelectionMode,
    pub selected: Vec<SelectedTestCase>,
}

/// One page of filtered modules from the custom builder's search.
#[derive(Serialize, Clone, Debug)]
pub struct ModulePage {
    pub modules: Vec<TestModule>,
    pub page: usize,
    pub total_pages: usize,
    pub total_cases: usize,
}

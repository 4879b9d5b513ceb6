use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::model::TestModule;
use crate::schedule::model::ScheduleConfig;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionType {
    #[serde(rename = "run-now")]
    RunNow,
    #[serde(rename = "schedule")]
    Schedule,
}

impl ExecutionType {
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionType::RunNow => "Run Immediately",
            ExecutionType::Schedule => "Scheduled Job",
        }
    }
}

/// One test case chosen for execution, with the subset of its supported
/// apps it will run against and the user id allocated for each app.
///
/// Invariant: the key set of `user_ids` always equals `selected_apps`.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct SelectedTestCase {
    pub test_case_id: String,
    pub selected_apps: Vec<String>,
    pub user_ids: BTreeMap<String, String>,
}

/// The finalized test selection merged back into [`RunConfig`], tagged by
/// how it was produced.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TestSuiteConfig {
    Premade {
        premade_id: String,
        selected_test_cases: Vec<SelectedTestCase>,
    },
    Custom {
        modules: Vec<TestModule>,
        selected_test_cases: Vec<SelectedTestCase>,
    },
}

impl TestSuiteConfig {
    pub fn selected_test_cases(&self) -> &[SelectedTestCase] {
        match self {
            TestSuiteConfig::Premade {
                selected_test_cases,
                ..
            }
            | TestSuiteConfig::Custom {
                selected_test_cases,
                ..
            } => selected_test_cases,
        }
    }
}

/// The single run configuration assembled by the wizard. Mutated only
/// through [`ConfigPatch::apply`](crate::config::patch::ConfigPatch::apply).
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct RunConfig {
    pub platform: String,
    pub environment: String,
    pub suite: String,
    pub release_version: String,
    pub build: String,
    pub execution_type: ExecutionType,
    pub custom_script: String,
    pub device_farm: String,
    pub comparison_type: String,
    pub os_version: String,
    pub device_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_suite_config: Option<TestSuiteConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_config: Option<ScheduleConfig>,
    pub save_as_favorite: bool,
    pub favorite_name: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            platform: String::new(),
            environment: String::new(),
            suite: String::new(),
            release_version: String::new(),
            build: String::new(),
            execution_type: ExecutionType::RunNow,
            custom_script: "default".to_string(),
            device_farm: "aws-device-farm".to_string(),
            comparison_type: "=".to_string(),
            os_version: "ios-17".to_string(),
            device_list: vec![],
            test_suite_config: None,
            schedule_config: None,
            save_as_favorite: false,
            favorite_name: String::new(),
        }
    }
}

impl RunConfig {
    /// Idempotent: adding a device already in the list is a no-op.
    pub fn add_device(&mut self, device: &str) {
        if !self.device_list.iter().any(|d| d == device) {
            self.device_list.push(device.to_string());
        }
    }

    pub fn remove_device(&mut self, device: &str) {
        self.device_list.retain(|d| d != device);
    }
}

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A selectable value/label pair, the shape every catalog listing returns.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(value: &str, label: &str) -> Self {
        OptionItem {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// An application a test case can run against.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct App {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct TestCase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub supported_apps: Vec<String>,
    pub estimated_duration: u32,
    pub module_id: String,
}

/// A named grouping of related test cases.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct TestModule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub test_cases: Vec<TestCase>,
}

/// A fixed bundle of modules selectable as a ready-made suite.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct PremadeSuite {
    pub id: String,
    pub name: String,
    pub description: String,
    pub modules: Vec<TestModule>,
}

impl PremadeSuite {
    pub fn test_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.modules.iter().flat_map(|module| module.test_cases.iter())
    }
}

use std::collections::HashMap;

use crate::catalog::model::{App, OptionItem, PremadeSuite, TestCase, TestModule};

/// Read-only lookup service over the selectable catalog: platforms,
/// environments, suites, versions, devices, apps, test modules and premade
/// suites. Absence of a key always yields an empty result, never an error.
pub struct CatalogService {
    platforms: Vec<OptionItem>,
    environments: HashMap<String, Vec<OptionItem>>,
    suites: HashMap<(String, String), Vec<OptionItem>>,
    release_versions: Vec<OptionItem>,
    builds: Vec<OptionItem>,
    custom_scripts: Vec<OptionItem>,
    device_farms: Vec<OptionItem>,
    comparison_types: Vec<OptionItem>,
    os_versions: Vec<OptionItem>,
    devices: Vec<OptionItem>,
    apps: Vec<App>,
    modules: Vec<TestModule>,
    premade_suites: Vec<PremadeSuite>,
}

impl CatalogService {
    pub fn new() -> Self {
        let modules = build_modules();
        let premade_suites = build_premade_suites(&modules);

        let platform_values = ["iPhone", "android", "iPad", "AndroidTablet"];
        let environment_options = vec![
            OptionItem::new("Sit1", "Sit1"),
            OptionItem::new("Sit2", "Sit2"),
            OptionItem::new("DSA", "DSA"),
        ];
        let mut environments = HashMap::new();
        for platform in platform_values {
            environments.insert(platform.to_string(), environment_options.clone());
        }

        // Suites are only provisioned for the Sit1 environments today.
        let suite_options = vec![
            OptionItem::new("custom", "Custom"),
            OptionItem::new("25.10_BalGen", "25.10_BalGen"),
            OptionItem::new("25.10_Tests", "25.10_Tests"),
        ];
        let mut suites = HashMap::new();
        for platform in platform_values {
            suites.insert(
                (platform.to_string(), "Sit1".to_string()),
                suite_options.clone(),
            );
        }

        CatalogService {
            platforms: vec![
                OptionItem::new("iPhone", "iPhone"),
                OptionItem::new("android", "Android"),
                OptionItem::new("iPad", "iPad"),
                OptionItem::new("AndroidTablet", "Android Tablet"),
            ],
            environments,
            suites,
            release_versions: vec![
                OptionItem::new("25.09.0", "25.09.0"),
                OptionItem::new("25.10.0", "25.10.0"),
                OptionItem::new("25.12.0", "25.12.0"),
            ],
            builds: vec![
                OptionItem::new("stable", "Stable"),
                OptionItem::new("beta", "Beta"),
                OptionItem::new("nightly", "Nightly"),
            ],
            custom_scripts: vec![
                OptionItem::new("default", "Default Script"),
                OptionItem::new("performance-test", "Performance Test Script"),
                OptionItem::new("security-scan", "Security Scan Script"),
                OptionItem::new("load-test", "Load Test Script"),
                OptionItem::new("custom-validation", "Custom Validation Script"),
            ],
            device_farms: vec![
                OptionItem::new("aws-device-farm", "AWS Device Farm"),
                OptionItem::new("browserstack", "BrowserStack"),
                OptionItem::new("sauce-labs", "Sauce Labs"),
                OptionItem::new("internal-farm", "Internal Device Farm"),
            ],
            comparison_types: vec![
                OptionItem::new("=", "="),
                OptionItem::new(">", ">"),
                OptionItem::new("<", "<"),
                OptionItem::new(">=", ">="),
                OptionItem::new("<=", "<="),
            ],
            os_versions: vec![
                OptionItem::new("ios-17", "iOS 17.x"),
                OptionItem::new("ios-16", "iOS 16.x"),
                OptionItem::new("android-14", "Android 14"),
                OptionItem::new("android-13", "Android 13"),
                OptionItem::new("windows-11", "Windows 11"),
                OptionItem::new("macos-sonoma", "macOS Sonoma"),
            ],
            devices: vec![
                OptionItem::new("iphone-15-pro", "iPhone 15 Pro"),
                OptionItem::new("iphone-14", "iPhone 14"),
                OptionItem::new("pixel-8", "Google Pixel 8"),
                OptionItem::new("galaxy-s24", "Samsung Galaxy S24"),
                OptionItem::new("ipad-pro", "iPad Pro 12.9\""),
                OptionItem::new("surface-pro", "Microsoft Surface Pro"),
            ],
            apps: vec![
                App {
                    id: "mobile-app".to_string(),
                    name: "Mobile App".to_string(),
                },
                App {
                    id: "web-app".to_string(),
                    name: "Web App".to_string(),
                },
                App {
                    id: "desktop-app".to_string(),
                    name: "Desktop App".to_string(),
                },
                App {
                    id: "tablet-app".to_string(),
                    name: "Tablet App".to_string(),
                },
                App {
                    id: "admin-portal".to_string(),
                    name: "Admin Portal".to_string(),
                },
            ],
            modules,
            premade_suites,
        }
    }

    pub fn platforms(&self) -> Vec<OptionItem> {
        self.platforms.clone()
    }

    pub fn environments_for(&self, platform: &str) -> Vec<OptionItem> {
        self.environments.get(platform).cloned().unwrap_or_default()
    }

    pub fn suites_for(&self, platform: &str, environment: &str) -> Vec<OptionItem> {
        self.suites
            .get(&(platform.to_string(), environment.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn release_versions(&self) -> Vec<OptionItem> {
        self.release_versions.clone()
    }

    pub fn builds(&self) -> Vec<OptionItem> {
        self.builds.clone()
    }

    pub fn custom_scripts(&self) -> Vec<OptionItem> {
        self.custom_scripts.clone()
    }

    pub fn device_farms(&self) -> Vec<OptionItem> {
        self.device_farms.clone()
    }

    pub fn comparison_types(&self) -> Vec<OptionItem> {
        self.comparison_types.clone()
    }

    pub fn os_versions(&self) -> Vec<OptionItem> {
        self.os_versions.clone()
    }

    pub fn devices(&self) -> Vec<OptionItem> {
        self.devices.clone()
    }

    pub fn apps(&self) -> Vec<App> {
        self.apps.clone()
    }

    pub fn modules(&self) -> &[TestModule] {
        &self.modules
    }

    pub fn premade_suites(&self) -> &[PremadeSuite] {
        &self.premade_suites
    }

    pub fn premade_suite(&self, id: &str) -> Option<&PremadeSuite> {
        self.premade_suites.iter().find(|suite| suite.id == id)
    }

    pub fn test_case(&self, id: &str) -> Option<&TestCase> {
        self.modules
            .iter()
            .flat_map(|module| module.test_cases.iter())
            .find(|case| case.id == id)
    }

    pub fn platform_label(&self, value: &str) -> String {
        label_of(&self.platforms, value)
    }

    pub fn suite_label(&self, platform: &str, environment: &str, value: &str) -> String {
        self.suites
            .get(&(platform.to_string(), environment.to_string()))
            .and_then(|options| options.iter().find(|option| option.value == value))
            .map(|option| option.label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    pub fn device_label(&self, value: &str) -> String {
        label_of(&self.devices, value)
    }

    pub fn os_version_label(&self, value: &str) -> String {
        label_of(&self.os_versions, value)
    }

    pub fn app_name(&self, id: &str) -> String {
        self.apps
            .iter()
            .find(|app| app.id == id)
            .map(|app| app.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Spelled-out comparison operator used in the confirmation summary.
    pub fn comparison_label(&self, value: &str) -> String {
        match value {
            "=" => "equals to".to_string(),
            ">" => "greater than".to_string(),
            "<" => "less than".to_string(),
            ">=" => "greater than or equals to".to_string(),
            "<=" => "less than or equals to".to_string(),
            other => other.to_string(),
        }
    }
}

fn label_of(options: &[OptionItem], value: &str) -> String {
    options
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| value.to_string())
}

fn build_modules() -> Vec<TestModule> {
    vec![
        TestModule::builder()
            .id("module-1")
            .name("Authentication Module")
            .description("User login, logout, and authentication flows")
            .test_cases(vec![
                TestCase::builder()
                    .id("auth-001")
                    .name("User Login Flow")
                    .description("Test successful user login with valid credentials")
                    .supported_apps(vec![
                        "mobile-app".to_string(),
                        "web-app".to_string(),
                        "tablet-app".to_string(),
                    ])
                    .estimated_duration(15)
                    .module_id("module-1")
                    .build(),
                TestCase::builder()
                    .id("auth-002")
                    .name("Password Reset")
                    .description("Test password reset functionality")
                    .supported_apps(vec!["mobile-app".to_string(), "web-app".to_string()])
                    .estimated_duration(10)
                    .module_id("module-1")
                    .build(),
                TestCase::builder()
                    .id("auth-003")
                    .name("Multi-factor Authentication")
                    .description("Test MFA setup and verification")
                    .supported_apps(vec![
                        "web-app".to_string(),
                        "desktop-app".to_string(),
                        "admin-portal".to_string(),
                    ])
                    .estimated_duration(20)
                    .module_id("module-1")
                    .build(),
            ])
            .build(),
        TestModule::builder()
            .id("module-2")
            .name("Transaction Processing")
            .description("Payment and transaction related tests")
            .test_cases(vec![
                TestCase::builder()
                    .id("txn-001")
                    .name("Payment Processing")
                    .description("Test successful payment transactions")
                    .supported_apps(vec![
                        "mobile-app".to_string(),
                        "web-app".to_string(),
                        "tablet-app".to_string(),
                    ])
                    .estimated_duration(25)
                    .module_id("module-2")
                    .build(),
                TestCase::builder()
                    .id("txn-002")
                    .name("Refund Process")
                    .description("Test refund functionality")
                    .supported_apps(vec!["web-app".to_string(), "admin-portal".to_string()])
                    .estimated_duration(15)
                    .module_id("module-2")
                    .build(),
            ])
            .build(),
        TestModule::builder()
            .id("module-3")
            .name("User Profile Management")
            .description("Profile creation, editing, and management")
            .test_cases(vec![
                TestCase::builder()
                    .id("profile-001")
                    .name("Profile Creation")
                    .description("Test new user profile creation")
                    .supported_apps(vec!["mobile-app".to_string(), "web-app".to_string()])
                    .estimated_duration(12)
                    .module_id("module-3")
                    .build(),
                TestCase::builder()
                    .id("profile-002")
                    .name("Profile Picture Upload")
                    .description("Test profile picture upload and validation")
                    .supported_apps(vec![
                        "mobile-app".to_string(),
                        "web-app".to_string(),
                        "tablet-app".to_string(),
                    ])
                    .estimated_duration(8)
                    .module_id("module-3")
                    .build(),
            ])
            .build(),
    ]
}

fn build_premade_suites(modules: &[TestModule]) -> Vec<PremadeSuite> {
    vec![
        PremadeSuite::builder()
            .id("25.10_BalGen")
            .name("25.10 Balance Generation Suite")
            .description("Comprehensive test suite for balance generation functionality")
            .modules(vec![modules[0].clone(), modules[1].clone()])
            .build(),
        PremadeSuite::builder()
            .id("25.10_Tests")
            .name("25.10 Complete Test Suite")
            .description("Full regression test suite for 25.10 release")
            .modules(modules.to_vec())
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_composite_keys_yield_empty_lists() {
        let catalog = CatalogService::new();
        assert!(catalog.environments_for("playstation").is_empty());
        assert!(catalog.suites_for("iPhone", "Sit2").is_empty());
        assert!(catalog.suites_for("nope", "Sit1").is_empty());
    }

    #[test]
    fn known_composite_keys_resolve() {
        let catalog = CatalogService::new();
        assert_eq!(catalog.environments_for("iPhone").len(), 3);
        let suites = catalog.suites_for("iPhone", "Sit1");
        assert_eq!(suites.len(), 3);
        assert_eq!(suites[0].value, "custom");
    }

    #[test]
    fn premade_suites_bundle_the_expected_modules() {
        let catalog = CatalogService::new();
        let balgen = catalog.premade_suite("25.10_BalGen").unwrap();
        assert_eq!(balgen.modules.len(), 2);
        assert_eq!(balgen.test_cases().count(), 5);

        let full = catalog.premade_suite("25.10_Tests").unwrap();
        assert_eq!(full.test_cases().count(), 7);

        assert!(catalog.premade_suite("25.99_Nope").is_none());
    }

    #[test]
    fn labels_fall_back_to_the_raw_value() {
        let catalog = CatalogService::new();
        assert_eq!(catalog.platform_label("AndroidTablet"), "Android Tablet");
        assert_eq!(catalog.platform_label("vax"), "vax");
        assert_eq!(catalog.device_label("iphone-15-pro"), "iPhone 15 Pro");
        assert_eq!(catalog.comparison_label(">="), "greater than or equals to");
    }
}

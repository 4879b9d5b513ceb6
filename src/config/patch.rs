use serde::Deserialize;

use crate::config::model::{ExecutionType, RunConfig};
use crate::schedule::model::ScheduleConfig;

/// A merge-style partial update of [`RunConfig`]: only the fields present
/// in the patch are written.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ConfigPatch {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub suite: Option<String>,
    #[serde(default)]
    pub release_version: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub execution_type: Option<ExecutionType>,
    #[serde(default)]
    pub custom_script: Option<String>,
    #[serde(default)]
    pub device_farm: Option<String>,
    #[serde(default)]
    pub comparison_type: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub device_list: Option<Vec<String>>,
    #[serde(default)]
    pub schedule_config: Option<ScheduleConfig>,
    #[serde(default)]
    pub save_as_favorite: Option<bool>,
    #[serde(default)]
    pub favorite_name: Option<String>,
}

impl ConfigPatch {
    /// Merge the patch into `config`, then enforce the cascading resets:
    /// a platform change empties environment and suite, an environment
    /// change empties suite. The cascade wins over values carried in the
    /// same patch, so dependent selections are never stale relative to
    /// their parent.
    pub fn apply(self, config: &mut RunConfig) {
        let platform_changed = matches!(&self.platform, Some(p) if *p != config.platform);
        let environment_changed =
            matches!(&self.environment, Some(e) if *e != config.environment);

        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if let Some(suite) = self.suite {
            config.suite = suite;
        }
        if let Some(release_version) = self.release_version {
            config.release_version = release_version;
        }
        if let Some(build) = self.build {
            config.build = build;
        }
        if let Some(execution_type) = self.execution_type {
            config.execution_type = execution_type;
        }
        if let Some(custom_script) = self.custom_script {
            config.custom_script = custom_script;
        }
        if let Some(device_farm) = self.device_farm {
            config.device_farm = device_farm;
        }
        if let Some(comparison_type) = self.comparison_type {
            config.comparison_type = comparison_type;
        }
        if let Some(os_version) = self.os_version {
            config.os_version = os_version;
        }
        if let Some(device_list) = self.device_list {
            config.device_list.clear();
            for device in &device_list {
                config.add_device(device);
            }
        }
        if let Some(schedule_config) = self.schedule_config {
            config.schedule_config = Some(schedule_config);
        }
        if let Some(save_as_favorite) = self.save_as_favorite {
            config.save_as_favorite = save_as_favorite;
        }
        if let Some(favorite_name) = self.favorite_name {
            config.favorite_name = favorite_name;
        }

        if platform_changed {
            config.environment.clear();
            config.suite.clear();
        } else if environment_changed {
            config.suite.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> RunConfig {
        let mut config = RunConfig::default();
        config.platform = "iPhone".to_string();
        config.environment = "Sit1".to_string();
        config.suite = "25.10_BalGen".to_string();
        config.release_version = "25.10.0".to_string();
        config.build = "stable".to_string();
        config
    }

    #[test]
    fn platform_change_resets_environment_and_suite() {
        let mut config = configured();
        ConfigPatch {
            platform: Some("android".to_string()),
            ..ConfigPatch::default()
        }
        .apply(&mut config);

        assert_eq!(config.platform, "android");
        assert_eq!(config.environment, "");
        assert_eq!(config.suite, "");
        // unrelated fields are untouched by the cascade
        assert_eq!(config.release_version, "25.10.0");
    }

    #[test]
    fn platform_cascade_wins_over_values_in_the_same_patch() {
        let mut config = configured();
        ConfigPatch {
            platform: Some("iPad".to_string()),
            environment: Some("Sit2".to_string()),
            suite: Some("custom".to_string()),
            ..ConfigPatch::default()
        }
        .apply(&mut config);

        assert_eq!(config.environment, "");
        assert_eq!(config.suite, "");
    }

    #[test]
    fn environment_change_resets_suite_only() {
        let mut config = configured();
        ConfigPatch {
            environment: Some("Sit2".to_string()),
            ..ConfigPatch::default()
        }
        .apply(&mut config);

        assert_eq!(config.platform, "iPhone");
        assert_eq!(config.environment, "Sit2");
        assert_eq!(config.suite, "");
    }

    #[test]
    fn writing_the_same_platform_does_not_cascade() {
        let mut config = configured();
        ConfigPatch {
            platform: Some("iPhone".to_string()),
            ..ConfigPatch::default()
        }
        .apply(&mut config);

        assert_eq!(config.environment, "Sit1");
        assert_eq!(config.suite, "25.10_BalGen");
    }

    #[test]
    fn absent_fields_are_left_alone() {
        let mut config = configured();
        ConfigPatch {
            build: Some("beta".to_string()),
            ..ConfigPatch::default()
        }
        .apply(&mut config);

        assert_eq!(config.build, "beta");
        assert_eq!(config.platform, "iPhone");
        assert_eq!(config.custom_script, "default");
    }

    #[test]
    fn device_list_patch_deduplicates() {
        let mut config = configured();
        ConfigPatch {
            device_list: Some(vec![
                "iphone-15-pro".to_string(),
                "pixel-8".to_string(),
                "iphone-15-pro".to_string(),
            ]),
            ..ConfigPatch::default()
        }
        .apply(&mut config);

        assert_eq!(config.device_list, vec!["iphone-15-pro", "pixel-8"]);
    }

    #[test]
    fn device_add_and_remove_are_by_value() {
        let mut config = RunConfig::default();
        config.add_device("iphone-14");
        config.add_device("iphone-14");
        assert_eq!(config.device_list.len(), 1);
        config.remove_device("iphone-14");
        assert!(config.device_list.is_empty());
    }
}

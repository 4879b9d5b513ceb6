use serde::{Deserialize, Serialize};

/// The sentinel stored in `end_date` when the schedule has no end date.
pub const NO_END_DATE: &str = "-";

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ScheduleConfig {
    pub from_date: String,
    pub end_date: String,
    pub trigger_time: String,
    pub repeat_frequency: RepeatFrequency,
    pub days_of_week: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            from_date: String::new(),
            end_date: NO_END_DATE.to_string(),
            trigger_time: String::new(),
            repeat_frequency: RepeatFrequency::Never,
            days_of_week: vec![],
        }
    }
}

impl ScheduleConfig {
    pub fn has_end_date(&self) -> bool {
        !self.end_date.is_empty() && self.end_date != NO_END_DATE
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepeatFrequency {
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "1hr")]
    Every1Hr,
    #[serde(rename = "2hr")]
    Every2Hr,
    #[serde(rename = "4hr")]
    Every4Hr,
    #[serde(rename = "6hr")]
    Every6Hr,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl RepeatFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            RepeatFrequency::Never => "Don't Repeat (One-time)",
            RepeatFrequency::Every1Hr => "Every 1 hour",
            RepeatFrequency::Every2Hr => "Every 2 hours",
            RepeatFrequency::Every4Hr => "Every 4 hours",
            RepeatFrequency::Every6Hr => "Every 6 hours",
            RepeatFrequency::Daily => "Daily",
            RepeatFrequency::Weekly => "Weekly",
            RepeatFrequency::Monthly => "Monthly",
        }
    }

    /// Days of week only apply to repeating schedules.
    pub fn uses_days_of_week(&self) -> bool {
        !matches!(self, RepeatFrequency::Never)
    }
}

/// The computed schedule preview returned to the operator.
#[derive(Serialize, Clone, Debug)]
pub struct SchedulePreview {
    pub description: String,
    pub runs: Vec<String>,
}

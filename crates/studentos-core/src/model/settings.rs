//! User settings and the shallow patch merge applied by `update_settings`.
//!
//! The merge is top-level only: a patch carrying `notificationPreferences`
//! replaces the whole nested value. Callers that want to change one nested
//! flag copy the current nested value first.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

/// Voice of the backlog burner messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BacklogTone {
    Gentle,
    #[default]
    Firm,
    Savage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuietHours {
    pub enabled: bool,
    pub start: String,
    pub end: String,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: "22:00".into(),
            end: "08:00".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub in_app: bool,
    pub email: bool,
    pub intensity: Intensity,
    pub quiet_hours: QuietHours,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            in_app: true,
            email: false,
            intensity: Intensity::Medium,
            quiet_hours: QuietHours::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleVisibility {
    pub academic: bool,
    pub career: bool,
    pub life: bool,
}

impl Default for ModuleVisibility {
    fn default() -> Self {
        Self {
            academic: true,
            career: true,
            life: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthTargets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workouts_per_week: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

/// Weekday-based laundry drop/pickup loop (0 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaundryPlan {
    #[serde(deserialize_with = "null_as_default")]
    pub drop_days: BTreeSet<u8>,
    #[serde(deserialize_with = "null_as_default")]
    pub pickup_days: BTreeSet<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_lag_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub theme: Theme,
    pub accent_color: String,
    pub notification_preferences: NotificationPreferences,
    pub module_visibility: ModuleVisibility,
    pub backlog_burner_tone: BacklogTone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeforces_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_targets: Option<HealthTargets>,
    #[serde(deserialize_with = "null_as_default")]
    pub laundry_plan: LaundryPlan,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            accent_color: "#3B82F6".into(),
            notification_preferences: NotificationPreferences::default(),
            module_visibility: ModuleVisibility::default(),
            backlog_burner_tone: BacklogTone::Firm,
            codeforces_handle: None,
            health_targets: None,
            laundry_plan: LaundryPlan::default(),
        }
    }
}

/// Top-level partial update for [`UserSettings`].
///
/// `None` leaves a field alone. For the optional settings, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub accent_color: Option<String>,
    pub notification_preferences: Option<NotificationPreferences>,
    pub module_visibility: Option<ModuleVisibility>,
    pub backlog_burner_tone: Option<BacklogTone>,
    #[serde(deserialize_with = "double_option")]
    pub codeforces_handle: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub health_targets: Option<Option<HealthTargets>>,
    pub laundry_plan: Option<LaundryPlan>,
}

impl UserSettings {
    /// Returns a copy with every field present in `patch` replaced wholesale.
    pub fn merged(&self, patch: SettingsPatch) -> UserSettings {
        let mut next = self.clone();
        if let Some(theme) = patch.theme {
            next.theme = theme;
        }
        if let Some(accent) = patch.accent_color {
            next.accent_color = accent;
        }
        if let Some(prefs) = patch.notification_preferences {
            next.notification_preferences = prefs;
        }
        if let Some(visibility) = patch.module_visibility {
            next.module_visibility = visibility;
        }
        if let Some(tone) = patch.backlog_burner_tone {
            next.backlog_burner_tone = tone;
        }
        if let Some(handle) = patch.codeforces_handle {
            next.codeforces_handle = handle;
        }
        if let Some(targets) = patch.health_targets {
            next.health_targets = targets;
        }
        if let Some(plan) = patch.laundry_plan {
            next.laundry_plan = plan;
        }
        next
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
